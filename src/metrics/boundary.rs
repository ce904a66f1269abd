//! Distance from each point to the domain boundary

use crate::error::{AnalysisError, Result, invalid_input};
use crate::spatial::domain::Domain;
use crate::spatial::point::Point2;

/// Per-point distances to the domain boundary
#[derive(Debug, Clone)]
pub struct BoundaryDistances {
    /// One distance per point, aligned with the input point set
    pub distances: Vec<f64>,
    /// True when distances are exact (rectangular domains); false when they
    /// are approximated against resampled boundary points
    pub exact: bool,
}

/// Compute the shortest distance from every point to the domain boundary
///
/// For a rectangular domain the result is the exact perpendicular distance
/// to the nearest edge. For a polygonal domain the result is the minimum
/// distance to the boundary samples taken at the domain's construction
/// spacing, and the returned [`BoundaryDistances::exact`] flag is false.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingDomain`] when no domain is supplied, and
/// an invalid-input error for an empty point slice or non-finite
/// coordinates.
pub fn distance_to_boundary(
    points: &[Point2],
    domain: Option<&Domain>,
) -> Result<BoundaryDistances> {
    let Some(domain) = domain else {
        return Err(AnalysisError::MissingDomain {
            operation: "distance to boundary",
        });
    };

    if points.is_empty() {
        return Err(invalid_input(&"point set is empty"));
    }
    if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
        return Err(invalid_input(&format!(
            "point {bad} has non-finite coordinates"
        )));
    }

    let distances = match domain {
        Domain::Rectangle { min, max } => points
            .iter()
            .map(|p| rectangle_edge_distance(*p, *min, *max))
            .collect(),
        Domain::Polygon {
            boundary_samples, ..
        } => points
            .iter()
            .map(|p| sampled_boundary_distance(*p, boundary_samples))
            .collect(),
    };

    Ok(BoundaryDistances {
        distances,
        exact: domain.boundary_is_exact(),
    })
}

/// Smallest absolute distance to any of the four rectangle edges
fn rectangle_edge_distance(p: Point2, min: Point2, max: Point2) -> f64 {
    let to_left = (p.x - min.x).abs();
    let to_right = (max.x - p.x).abs();
    let to_bottom = (p.y - min.y).abs();
    let to_top = (max.y - p.y).abs();

    to_left.min(to_right).min(to_bottom).min(to_top)
}

/// Minimum distance to the resampled boundary points
fn sampled_boundary_distance(p: Point2, samples: &[Point2]) -> f64 {
    samples
        .iter()
        .map(|s| p.distance(s))
        .fold(f64::INFINITY, f64::min)
}
