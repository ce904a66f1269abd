//! Radial distribution function g(r)

use std::f64::consts::PI;

use crate::error::{AnalysisError, Result, invalid_input, invalid_parameter};
use crate::spatial::domain::Domain;
use crate::spatial::grid::SpatialGrid;
use crate::statistics::histogram::Histogram;

/// Estimate the pair-correlation function g(r) of the indexed point set
///
/// Pair distances below `max_radius` are accumulated into `bins` radial
/// bins through index radius queries and normalized against the expected
/// count for a uniform Poisson process of the same overall density, so
/// that g(r) ≈ 1 signals randomness, g(r) > 1 clustering, and g(r) < 1
/// depletion at distance r.
///
/// Normalization convention: no edge correction is applied. Shells
/// reaching past the domain boundary are normalized by their full area, so
/// the estimate is biased low within `max_radius` of the boundary; keep
/// `max_radius` small relative to the domain extent when that matters.
///
/// # Errors
///
/// Returns [`AnalysisError::MissingDomain`] without a domain, an invalid
/// input error for a zero-area domain, and invalid parameter errors when
/// `max_radius` is not positive and finite or `bins < 1`.
pub fn radial_distribution(
    index: &SpatialGrid,
    domain: Option<&Domain>,
    max_radius: f64,
    bins: usize,
) -> Result<Histogram> {
    let Some(domain) = domain else {
        return Err(AnalysisError::MissingDomain {
            operation: "radial distribution",
        });
    };

    if !max_radius.is_finite() || max_radius <= 0.0 {
        return Err(invalid_parameter(
            "max_radius",
            &max_radius,
            &"must be a positive finite value",
        ));
    }
    if bins < 1 {
        return Err(invalid_parameter("bins", &bins, &"must be at least 1"));
    }

    let area = domain.area();
    if area <= 0.0 {
        return Err(invalid_input(&format!(
            "domain area must be positive, got {area}"
        )));
    }

    let points = index.points();
    let count = points.len() as f64;
    let density = count / area;
    let bin_width = max_radius / bins as f64;

    // Each ordered pair is counted once, covering both directions
    let mut pair_counts = vec![0.0_f64; bins];
    for (point_index, p) in points.iter().enumerate() {
        for neighbor in index.within_radius(*p, max_radius)? {
            if neighbor == point_index {
                continue;
            }
            let Some(q) = points.get(neighbor) else {
                continue;
            };
            let distance = p.distance(q);
            if distance < max_radius {
                let bin = (distance / bin_width) as usize;
                if let Some(slot) = pair_counts.get_mut(bin.min(bins - 1)) {
                    *slot += 1.0;
                }
            }
        }
    }

    let mut centers = Vec::with_capacity(bins);
    let mut values = Vec::with_capacity(bins);
    for (bin, pairs) in pair_counts.iter().enumerate() {
        let r_inner = bin as f64 * bin_width;
        let r_outer = (bin as f64 + 1.0) * bin_width;
        let shell_area = PI * r_outer.mul_add(r_outer, -(r_inner * r_inner));

        centers.push((bin as f64 + 0.5) * bin_width);
        values.push(pairs / (count * density * shell_area));
    }

    Ok(Histogram::new(centers, values, bin_width))
}
