//! Clustering algorithms over the spatial index
//!
//! Three independent algorithms share the index but keep distinct state
//! machines: k-means (centroid iteration), DBSCAN (density connectivity),
//! and percolation (fixed-radius connected components). Callers select one
//! explicitly through the closed [`Clustering`] variant set, or call the
//! algorithm modules directly for their richer result types.

/// Density-based clustering with noise
pub mod dbscan;
/// Lloyd's-algorithm k-means
pub mod kmeans;
/// Fixed-radius connected components
pub mod percolation;

pub use dbscan::{DbscanParams, DbscanResult};
pub use kmeans::{KMeansParams, KMeansResult};
pub use percolation::{PercolationParams, PercolationResult};

use crate::error::Result;
use crate::spatial::grid::SpatialGrid;

/// Cluster id reserved for noise points
///
/// Only DBSCAN produces it; k-means and percolation assign every point a
/// real cluster.
pub const NOISE: i32 = -1;

/// Cluster assignment shared by all algorithms
///
/// Cluster id values are arbitrary (assigned in discovery order) and not
/// comparable across runs; only the partition they induce is meaningful.
/// Noise points carry the [`NOISE`] sentinel.
#[derive(Debug, Clone)]
pub struct ClusterLabels {
    /// Cluster id per point, aligned with the indexed point set
    pub labels: Vec<i32>,
    /// Number of clusters (noise excluded)
    pub cluster_count: usize,
}

/// Algorithm selection for a clustering run
///
/// A closed set of variants with algorithm-specific parameters; each run
/// returns the shared [`ClusterLabels`] shape. The per-algorithm modules
/// expose richer results (centroids, convergence status) for callers that
/// need them.
#[derive(Debug, Clone)]
pub enum Clustering {
    /// Lloyd's-algorithm k-means
    KMeans(KMeansParams),
    /// Density-based clustering with noise
    Dbscan(DbscanParams),
    /// Fixed-radius connected components
    Percolation(PercolationParams),
}

impl Clustering {
    /// Run the selected algorithm over the indexed point set
    ///
    /// # Errors
    ///
    /// Propagates the selected algorithm's parameter validation errors.
    pub fn run(&self, index: &SpatialGrid) -> Result<ClusterLabels> {
        match self {
            Self::KMeans(params) => {
                let result = kmeans::cluster(index, params)?;
                Ok(ClusterLabels {
                    labels: result.labels.iter().map(|&label| label as i32).collect(),
                    cluster_count: result.centroids.len(),
                })
            }
            Self::Dbscan(params) => {
                let result = dbscan::cluster(index, params)?;
                Ok(ClusterLabels {
                    labels: result.labels,
                    cluster_count: result.cluster_count,
                })
            }
            Self::Percolation(params) => {
                let result = percolation::cluster(index, params)?;
                Ok(ClusterLabels {
                    labels: result.labels.iter().map(|&label| label as i32).collect(),
                    cluster_count: result.cluster_count,
                })
            }
        }
    }
}
