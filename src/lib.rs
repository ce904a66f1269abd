//! Spatial point-pattern analysis and clustering for 2D point sets
//!
//! The crate consumes point sets produced by an external sampler or
//! simulation, builds a read-only spatial index over them, and computes
//! nearest-neighbor statistics, clusterings, pair/angular distribution
//! functions, and graph distance fields. All outputs are numeric arrays
//! aligned 1:1 with the input point set; the crate performs no I/O.

#![forbid(unsafe_code)]

/// K-means, DBSCAN, and percolation clustering over the spatial index
pub mod clustering;
/// Error types shared by all analysis operations
pub mod error;
/// Shortest-path distance fields over externally supplied connectivity
pub mod graph;
/// Nearest-neighbor, boundary-distance, and local-density metrics
pub mod metrics;
/// Point, domain, and spatial index primitives
pub mod spatial;
/// Radial and angular distribution functions
pub mod statistics;

pub use error::{AnalysisError, Result};
pub use spatial::{Domain, Point2, SpatialGrid};
