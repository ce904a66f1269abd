//! Density-based spatial clustering with noise (DBSCAN)

use std::collections::VecDeque;

use bitvec::prelude::*;

use crate::clustering::NOISE;
use crate::error::{Result, invalid_parameter};
use crate::spatial::grid::SpatialGrid;

/// DBSCAN configuration
#[derive(Debug, Clone, Copy)]
pub struct DbscanParams {
    /// Neighborhood radius for the density test (positive and finite)
    pub eps: f64,
    /// Minimum neighborhood size for a core point, counting the point
    /// itself (at least 1)
    pub min_pts: usize,
}

/// Outcome of a DBSCAN run
#[derive(Debug, Clone)]
pub struct DbscanResult {
    /// Cluster id per point, or [`NOISE`] for points reachable from no core
    /// point; ids are assigned in discovery order over the point index
    pub labels: Vec<i32>,
    /// Number of clusters found
    pub cluster_count: usize,
}

/// Cluster the indexed point set by density connectivity
///
/// A point is a core point when its `eps`-neighborhood (itself included)
/// holds at least `min_pts` points. Clusters grow from unvisited core
/// points through chains of core points; non-core points reached from a
/// core point join as border points without propagating further, and
/// everything else is noise. Cluster id values depend on discovery order,
/// but the partition itself is deterministic for a given input.
///
/// # Errors
///
/// Returns an error if `eps` is not a positive finite value or
/// `min_pts < 1`.
pub fn cluster(index: &SpatialGrid, params: &DbscanParams) -> Result<DbscanResult> {
    if !params.eps.is_finite() || params.eps <= 0.0 {
        return Err(invalid_parameter(
            "eps",
            &params.eps,
            &"must be a positive finite value",
        ));
    }
    if params.min_pts < 1 {
        return Err(invalid_parameter(
            "min_pts",
            &params.min_pts,
            &"must be at least 1",
        ));
    }

    let points = index.points();
    let mut labels = vec![NOISE; points.len()];
    let mut visited = bitvec![0; points.len()];
    let mut cluster_id = 0_i32;

    for point_index in 0..points.len() {
        if visited.get(point_index).as_deref() == Some(&true) {
            continue;
        }
        visited.set(point_index, true);

        let Some(&p) = points.get(point_index) else {
            continue;
        };
        let neighborhood = index.within_radius(p, params.eps)?;
        if neighborhood.len() < params.min_pts {
            // Stays noise unless a later cluster reaches it as a border point
            continue;
        }

        if let Some(label) = labels.get_mut(point_index) {
            *label = cluster_id;
        }

        let mut frontier: VecDeque<usize> = neighborhood.into();
        while let Some(candidate) = frontier.pop_front() {
            if let Some(label) = labels.get_mut(candidate) {
                if *label == NOISE {
                    // Border promotion for previously rejected points
                    *label = cluster_id;
                }
            }

            if visited.get(candidate).as_deref() == Some(&true) {
                continue;
            }
            visited.set(candidate, true);

            let Some(&q) = points.get(candidate) else {
                continue;
            };
            let reachable = index.within_radius(q, params.eps)?;
            if reachable.len() >= params.min_pts {
                // Core point: keep expanding the cluster through it
                for next in reachable {
                    if visited.get(next).as_deref() != Some(&true) {
                        frontier.push_back(next);
                    }
                }
            }
        }

        cluster_id += 1;
    }

    Ok(DbscanResult {
        labels,
        cluster_count: cluster_id as usize,
    })
}
