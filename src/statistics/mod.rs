//! Pair and angular statistics of a point pattern
//!
//! This module contains the binned distribution functions:
//! - The radial distribution function g(r) against a uniform baseline
//! - Angular distributions of neighbor bond directions and bond angles

/// Angular distribution functions
pub mod angular;
/// Shared histogram output type
pub mod histogram;
/// Radial distribution function
pub mod radial;

pub use angular::{angle_distribution, bond_angle_distribution};
pub use histogram::Histogram;
pub use radial::radial_distribution;
