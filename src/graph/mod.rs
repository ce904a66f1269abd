//! Graph distance fields along filament structures
//!
//! Connectivity is supplied by the external producer; this module measures
//! shortest-path distances along it from a designated root set.

/// Filament graph representation and the distance-field sweep
pub mod distance;

pub use distance::{FilamentGraph, UNREACHABLE, distance_field};
