//! Bounding domains for boundary-distance and density-normalization queries

use crate::error::{Result, invalid_input, invalid_parameter};
use crate::spatial::point::Point2;

/// Planar region bounding a point set
///
/// A domain is optional for most analyses but required for boundary-relative
/// metrics and for the density normalization of the radial distribution
/// function. Operations that need one fail with
/// [`AnalysisError::MissingDomain`](crate::error::AnalysisError::MissingDomain)
/// when it is absent rather than assuming a default region.
#[derive(Debug, Clone)]
pub enum Domain {
    /// Axis-aligned rectangular region; boundary distances are exact
    Rectangle {
        /// Minimum corner (inclusive)
        min: Point2,
        /// Maximum corner (inclusive)
        max: Point2,
    },

    /// Closed polygonal region; boundary distances are approximated against
    /// points resampled along the boundary at construction time
    Polygon {
        /// Polygon vertices in order, implicitly closed
        vertices: Vec<Point2>,
        /// Boundary densified at the requested sample spacing
        boundary_samples: Vec<Point2>,
    },
}

impl Domain {
    /// Create an axis-aligned rectangular domain
    ///
    /// # Errors
    ///
    /// Returns an error if either corner has non-finite coordinates or the
    /// rectangle has non-positive extent along either axis.
    pub fn rectangle(min: Point2, max: Point2) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(invalid_input(&"rectangle corners must be finite"));
        }
        if max.x <= min.x || max.y <= min.y {
            return Err(invalid_input(&format!(
                "rectangle extent must be positive, got {} x {}",
                max.x - min.x,
                max.y - min.y
            )));
        }

        Ok(Self::Rectangle { min, max })
    }

    /// Create a closed polygonal domain
    ///
    /// The boundary is densified into sample points spaced at most
    /// `sample_spacing` apart along each edge. Boundary distances computed
    /// against a polygonal domain are approximations whose resolution is set
    /// by this spacing.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 3 vertices are given, any vertex has
    /// non-finite coordinates, or `sample_spacing` is not a positive finite
    /// value.
    pub fn polygon(vertices: Vec<Point2>, sample_spacing: f64) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(invalid_input(&format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if vertices.iter().any(|v| !v.is_finite()) {
            return Err(invalid_input(&"polygon vertices must be finite"));
        }
        if !sample_spacing.is_finite() || sample_spacing <= 0.0 {
            return Err(invalid_parameter(
                "sample_spacing",
                &sample_spacing,
                &"must be a positive finite value",
            ));
        }

        let boundary_samples = densify_boundary(&vertices, sample_spacing);

        Ok(Self::Polygon {
            vertices,
            boundary_samples,
        })
    }

    /// Area of the domain
    ///
    /// Rectangles report width times height; polygons use the shoelace
    /// formula over their vertices.
    pub fn area(&self) -> f64 {
        match self {
            Self::Rectangle { min, max } => (max.x - min.x) * (max.y - min.y),
            Self::Polygon { vertices, .. } => shoelace_area(vertices),
        }
    }

    /// Test whether a point lies inside the domain
    ///
    /// Rectangle bounds are inclusive; polygon membership uses ray casting,
    /// with points exactly on an edge resolved by the crossing parity.
    pub fn contains(&self, point: Point2) -> bool {
        match self {
            Self::Rectangle { min, max } => {
                point.x >= min.x && point.x <= max.x && point.y >= min.y && point.y <= max.y
            }
            Self::Polygon { vertices, .. } => polygon_contains(vertices, point),
        }
    }

    /// Whether boundary distances against this domain are exact
    pub const fn boundary_is_exact(&self) -> bool {
        matches!(self, Self::Rectangle { .. })
    }
}

/// Resample the closed boundary polyline at the given spacing
fn densify_boundary(vertices: &[Point2], spacing: f64) -> Vec<Point2> {
    let mut samples = Vec::new();

    for (i, start) in vertices.iter().enumerate() {
        let Some(end) = vertices.get(i + 1).or_else(|| vertices.first()) else {
            break;
        };

        let edge_length = start.distance(end);
        let steps = (edge_length / spacing).ceil().max(1.0) as usize;

        // Endpoint excluded: it opens the next edge
        for step in 0..steps {
            let t = step as f64 / steps as f64;
            samples.push(start.lerp(end, t));
        }
    }

    samples
}

/// Signed shoelace area, returned as an absolute value
fn shoelace_area(vertices: &[Point2]) -> f64 {
    let mut twice_area = 0.0;

    for (i, a) in vertices.iter().enumerate() {
        let Some(b) = vertices.get(i + 1).or_else(|| vertices.first()) else {
            break;
        };
        twice_area += a.x.mul_add(b.y, -(b.x * a.y));
    }

    twice_area.abs() / 2.0
}

/// Ray-casting point-in-polygon test
fn polygon_contains(vertices: &[Point2], point: Point2) -> bool {
    let mut inside = false;

    for (i, a) in vertices.iter().enumerate() {
        let Some(b) = vertices.get(i + 1).or_else(|| vertices.first()) else {
            break;
        };

        let crosses = (a.y > point.y) != (b.y > point.y);
        if crosses {
            let t = (point.y - a.y) / (b.y - a.y);
            let x_at_y = (b.x - a.x).mul_add(t, a.x);
            if point.x < x_at_y {
                inside = !inside;
            }
        }
    }

    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_validation() {
        assert!(Domain::rectangle(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)).is_ok());
        assert!(Domain::rectangle(Point2::new(0.0, 0.0), Point2::new(0.0, 1.0)).is_err());
        assert!(Domain::rectangle(Point2::new(f64::NAN, 0.0), Point2::new(1.0, 1.0)).is_err());
    }

    #[test]
    fn test_rectangle_area_and_contains() {
        let domain = Domain::rectangle(Point2::new(0.0, 0.0), Point2::new(2.0, 3.0))
            .unwrap_or_else(|_| unreachable!("valid rectangle"));

        assert!((domain.area() - 6.0).abs() < 1e-12);
        assert!(domain.contains(Point2::new(1.0, 1.0)));
        assert!(domain.contains(Point2::new(0.0, 0.0)));
        assert!(!domain.contains(Point2::new(2.5, 1.0)));
        assert!(domain.boundary_is_exact());
    }

    #[test]
    fn test_polygon_area_matches_shoelace() {
        // Unit square as a polygon
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let domain = Domain::polygon(vertices, 0.25)
            .unwrap_or_else(|_| unreachable!("valid polygon"));

        assert!((domain.area() - 1.0).abs() < 1e-12);
        assert!(domain.contains(Point2::new(0.5, 0.5)));
        assert!(!domain.contains(Point2::new(1.5, 0.5)));
        assert!(!domain.boundary_is_exact());
    }

    #[test]
    fn test_polygon_boundary_sampling_spacing() {
        let vertices = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ];
        let domain = Domain::polygon(vertices, 0.25)
            .unwrap_or_else(|_| unreachable!("valid polygon"));

        let Domain::Polygon {
            boundary_samples, ..
        } = &domain
        else {
            unreachable!("constructed as polygon");
        };

        // Four unit edges at 0.25 spacing give four samples per edge
        assert_eq!(boundary_samples.len(), 16);
    }

    #[test]
    fn test_polygon_rejects_degenerate_input() {
        let two = vec![Point2::new(0.0, 0.0), Point2::new(1.0, 0.0)];
        assert!(Domain::polygon(two, 0.1).is_err());

        let triangle = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        ];
        assert!(Domain::polygon(triangle.clone(), 0.0).is_err());
        assert!(Domain::polygon(triangle, f64::NAN).is_err());
    }
}
