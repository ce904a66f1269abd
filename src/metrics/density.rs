//! Local point density estimated from k-nearest-neighbor distances

use std::f64::consts::PI;

use crate::error::{Result, invalid_input};
use crate::spatial::grid::SpatialGrid;

/// Estimate the local density around every point from its k nearest neighbors
///
/// The density at a point is `m / (π r²)` where `r` is the distance to its
/// k-th nearest neighbor and `m` the number of neighbors actually found
/// (which is below `k` only for point sets smaller than `k + 1`). Low `k`
/// captures local fluctuations; high `k` smooths the estimate.
///
/// Coincident points produce an infinite density for the affected entries,
/// since their neighbor radius is zero.
///
/// # Errors
///
/// Returns an error if `k < 1` or the point set holds fewer than two points
/// (no neighbor radius exists to estimate from).
pub fn local_density(index: &SpatialGrid, k: usize) -> Result<Vec<f64>> {
    if index.len() < 2 {
        return Err(invalid_input(&format!(
            "density estimation needs at least 2 points, got {}",
            index.len()
        )));
    }

    let mut densities = Vec::with_capacity(index.len());

    for point_index in 0..index.len() {
        let neighbors = index.k_nearest(point_index, k)?;
        let count = neighbors.len() as f64;
        let radius = neighbors.last().map_or(0.0, |n| n.distance);

        densities.push(count / (PI * radius * radius));
    }

    Ok(densities)
}
