//! Nearest-neighbor distances and the k-nearest-neighbor graph

use crate::error::Result;
use crate::spatial::grid::{Neighbor, SpatialGrid};

/// Sentinel distance for points with no defined neighbor
///
/// A single-point set has no nearest-neighbor distance; the sentinel keeps
/// the output aligned with the point set without inventing a zero.
pub const UNDEFINED_DISTANCE: f64 = f64::INFINITY;

/// Distance from every point to its closest other point
///
/// Output is aligned 1:1 with the indexed point set. A single-point set
/// yields [`UNDEFINED_DISTANCE`] for its only entry.
///
/// # Errors
///
/// Propagates index query failures; none occur for a built index.
pub fn nearest_neighbor_distances(index: &SpatialGrid) -> Result<Vec<f64>> {
    let mut distances = Vec::with_capacity(index.len());

    for point_index in 0..index.len() {
        let nearest = index.k_nearest(point_index, 1)?;
        distances.push(nearest.first().map_or(UNDEFINED_DISTANCE, |n| n.distance));
    }

    Ok(distances)
}

/// K-nearest-neighbor graph over an indexed point set
///
/// For each point, the ordered list of its k closest other points with the
/// corresponding distances. Built once and consumed by the angular
/// distribution function and local density estimation. Entries hold fewer
/// than k neighbors when the point set itself is smaller than k + 1.
#[derive(Debug, Clone)]
pub struct NeighborGraph {
    k: usize,
    entries: Vec<Vec<Neighbor>>,
}

impl NeighborGraph {
    /// Build the graph by repeated k-nearest queries against the index
    ///
    /// # Errors
    ///
    /// Returns an error if `k < 1`.
    pub fn build(index: &SpatialGrid, k: usize) -> Result<Self> {
        let mut entries = Vec::with_capacity(index.len());

        for point_index in 0..index.len() {
            entries.push(index.k_nearest(point_index, k)?);
        }

        Ok(Self { k, entries })
    }

    /// The requested neighbor count
    pub const fn k(&self) -> usize {
        self.k
    }

    /// Number of points the graph was built over
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the graph covers no points
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Ordered neighbors of the given point, empty if out of range
    pub fn neighbors(&self, point_index: usize) -> &[Neighbor] {
        self.entries
            .get(point_index)
            .map_or(&[], Vec::as_slice)
    }

    /// All per-point neighbor lists in point order
    pub fn entries(&self) -> impl Iterator<Item = &[Neighbor]> {
        self.entries.iter().map(Vec::as_slice)
    }
}
