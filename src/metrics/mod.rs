//! Proximity and distance metrics over an indexed point set
//!
//! This module contains the per-point measurements derived directly from
//! the spatial index:
//! - Nearest-neighbor distances and the k-nearest-neighbor graph
//! - Distance to the domain boundary
//! - Local density estimation

/// Distance-to-boundary computation
pub mod boundary;
/// Local density estimation from neighbor distances
pub mod density;
/// Nearest-neighbor distances and neighbor graph construction
pub mod neighbors;

pub use boundary::{BoundaryDistances, distance_to_boundary};
pub use density::local_density;
pub use neighbors::{NeighborGraph, UNDEFINED_DISTANCE, nearest_neighbor_distances};
