//! Angular distribution functions over the neighbor graph

use std::f64::consts::PI;

use crate::error::{Result, invalid_input, invalid_parameter};
use crate::metrics::neighbors::NeighborGraph;
use crate::spatial::grid::SpatialGrid;
use crate::statistics::histogram::Histogram;

/// Distribution of bond directions from each point to its nearest neighbors
///
/// For every point and each of its graph neighbors, the direction angle
/// `atan2(dy, dx)` is wrapped into the fixed `[0, 2π)` domain and binned.
/// Values are normalized to integrate to 1 over that domain, making the
/// result a probability density rather than a raw count. A flat density of
/// `1 / 2π` indicates isotropy; peaks mark preferred bond directions.
///
/// Coincident neighbor pairs contribute no direction and are skipped. A
/// graph with no usable bonds (single-point set) yields an all-zero
/// histogram.
///
/// # Errors
///
/// Returns an error if `bins < 1` or the graph was not built over the
/// given index (length mismatch).
pub fn angle_distribution(
    index: &SpatialGrid,
    graph: &NeighborGraph,
    bins: usize,
) -> Result<Histogram> {
    check_alignment(index, graph)?;
    if bins < 1 {
        return Err(invalid_parameter("bins", &bins, &"must be at least 1"));
    }

    let points = index.points();
    let bin_width = 2.0 * PI / bins as f64;
    let mut counts = vec![0.0_f64; bins];

    for (p, neighbors) in points.iter().zip(graph.entries()) {
        for neighbor in neighbors {
            let Some(q) = points.get(neighbor.index) else {
                continue;
            };
            let bond = *q - *p;
            if bond.length_squared() <= 0.0 {
                continue;
            }

            let angle = bond.y.atan2(bond.x).rem_euclid(2.0 * PI);
            let bin = ((angle / bin_width) as usize).min(bins - 1);
            if let Some(slot) = counts.get_mut(bin) {
                *slot += 1.0;
            }
        }
    }

    Ok(into_density(counts, bin_width))
}

/// Distribution of angles between pairs of nearest neighbors
///
/// For every point, each unordered pair of its graph neighbors forms a
/// bond angle `acos(v₁·v₂ / |v₁||v₂|)` in `[0, π]`, binned over that
/// domain and normalized to integrate to 1. A flat density indicates a
/// random uniform pattern; peaks at characteristic angles reveal local
/// order (a hexagonal lattice peaks at 60°) and depletions mark angular
/// avoidance.
///
/// # Errors
///
/// Returns an error if `bins < 1` or the graph was not built over the
/// given index (length mismatch).
pub fn bond_angle_distribution(
    index: &SpatialGrid,
    graph: &NeighborGraph,
    bins: usize,
) -> Result<Histogram> {
    check_alignment(index, graph)?;
    if bins < 1 {
        return Err(invalid_parameter("bins", &bins, &"must be at least 1"));
    }

    let points = index.points();
    let bin_width = PI / bins as f64;
    let mut counts = vec![0.0_f64; bins];

    for (p, neighbors) in points.iter().zip(graph.entries()) {
        for (first, a) in neighbors.iter().enumerate() {
            for b in neighbors.iter().skip(first + 1) {
                let (Some(pa), Some(pb)) = (points.get(a.index), points.get(b.index)) else {
                    continue;
                };
                let v1 = *pa - *p;
                let v2 = *pb - *p;

                let norms = v1.length() * v2.length();
                if norms <= 0.0 {
                    continue;
                }

                let angle = (v1.dot(&v2) / norms).clamp(-1.0, 1.0).acos();
                let bin = ((angle / bin_width) as usize).min(bins - 1);
                if let Some(slot) = counts.get_mut(bin) {
                    *slot += 1.0;
                }
            }
        }
    }

    Ok(into_density(counts, bin_width))
}

/// Reject a graph whose entries do not align with the index
fn check_alignment(index: &SpatialGrid, graph: &NeighborGraph) -> Result<()> {
    if graph.len() == index.len() {
        Ok(())
    } else {
        Err(invalid_input(&format!(
            "neighbor graph covers {} points but the index holds {}",
            graph.len(),
            index.len()
        )))
    }
}

/// Convert raw bin counts into a probability density over the bin domain
fn into_density(counts: Vec<f64>, bin_width: f64) -> Histogram {
    let total: f64 = counts.iter().sum();

    let centers = (0..counts.len())
        .map(|bin| (bin as f64 + 0.5) * bin_width)
        .collect();
    let values = if total > 0.0 {
        counts.iter().map(|c| c / (total * bin_width)).collect()
    } else {
        counts
    };

    Histogram::new(centers, values, bin_width)
}
