//! Spatial primitives and the read-only spatial index
//!
//! This module contains the geometric foundations shared by every analysis:
//! - The 2D point value type
//! - Bounding domains (rectangle or sampled polygon boundary)
//! - The uniform-grid spatial index answering neighbor and radius queries

/// Bounding domains for boundary-relative metrics
pub mod domain;
/// Uniform-grid spatial index
pub mod grid;
/// 2D point value type and geometric helpers
pub mod point;

pub use domain::Domain;
pub use grid::{Neighbor, SpatialGrid};
pub use point::Point2;
