//! Uniform-grid spatial index for nearest-neighbor and radius queries
//!
//! The index buckets points into a regular grid of cells sized so that the
//! average occupancy is about one point per cell, giving sub-linear
//! nearest-neighbor and range queries over static point sets. The structure
//! is built once and never mutated; rebuilding requires a fresh index.

use ndarray::Array2;

use crate::error::{Result, invalid_input, invalid_parameter};
use crate::spatial::point::Point2;

/// A point returned from a nearest-neighbor query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index of the point in the original point set
    pub index: usize,
    /// Euclidean distance from the query location
    pub distance: f64,
}

/// Read-only spatial index over a 2D point set
///
/// Owns the point set it was built from; the index position of each point is
/// its stable identity for all derived outputs. All queries take `&self`, so
/// a built index may be shared freely across threads.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    points: Vec<Point2>,
    min: Point2,
    cell_size: f64,
    dimensions: (usize, usize),
    cells: Array2<Vec<usize>>,
}

impl SpatialGrid {
    /// Build an index over the given point set
    ///
    /// Cell size targets one point per cell on average; point sets with a
    /// degenerate (zero-area) bounding box collapse to a single-row or
    /// single-cell grid.
    ///
    /// # Errors
    ///
    /// Returns an error if the point set is empty or any coordinate is
    /// non-finite.
    pub fn build(points: Vec<Point2>) -> Result<Self> {
        if points.is_empty() {
            return Err(invalid_input(&"point set is empty"));
        }
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(invalid_input(&format!(
                "point {bad} has non-finite coordinates"
            )));
        }

        let mut min = Point2::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
        for p in &points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        let extent = max - min;
        let count = points.len() as f64;
        let area = extent.x * extent.y;
        let max_extent = extent.x.max(extent.y);

        let cell_size = if area > 0.0 {
            (area / count).sqrt()
        } else if max_extent > 0.0 {
            max_extent / count.sqrt()
        } else {
            // All points coincide
            1.0
        };

        let columns = ((extent.x / cell_size).ceil() as usize).max(1);
        let rows = ((extent.y / cell_size).ceil() as usize).max(1);
        let dimensions = (rows, columns);

        let mut cells = Array2::from_elem(dimensions, Vec::new());
        for (index, p) in points.iter().enumerate() {
            let (row, column) = clamp_cell(raw_cell(*p, min, cell_size), dimensions);
            if let Some(bucket) = cells.get_mut([row, column]) {
                bucket.push(index);
            }
        }

        Ok(Self {
            points,
            min,
            cell_size,
            dimensions,
            cells,
        })
    }

    /// The indexed point set, in input order
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    /// Number of indexed points
    pub const fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the index is empty (never true for a built index)
    pub const fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The k nearest points to the point at `index`, excluding itself
    ///
    /// Results are ordered by non-decreasing distance with ties broken by
    /// ascending point index. Requests for more neighbors than exist are
    /// capped to all available candidates.
    ///
    /// # Errors
    ///
    /// Returns an error if `k < 1` or `index` is out of range.
    pub fn k_nearest(&self, index: usize, k: usize) -> Result<Vec<Neighbor>> {
        let Some(query) = self.points.get(index).copied() else {
            return Err(invalid_parameter(
                "index",
                &index,
                &format!("point set has {} points", self.points.len()),
            ));
        };
        if k < 1 {
            return Err(invalid_parameter("k", &k, &"must be at least 1"));
        }

        Ok(self.nearest_search(query, k, Some(index)))
    }

    /// The k nearest points to an arbitrary query coordinate
    ///
    /// Indexed points coincident with the query location are included.
    /// Ordering and capping behave as in [`Self::k_nearest`].
    ///
    /// # Errors
    ///
    /// Returns an error if `k < 1` or the query coordinate is non-finite.
    pub fn k_nearest_to(&self, query: Point2, k: usize) -> Result<Vec<Neighbor>> {
        if !query.is_finite() {
            return Err(invalid_parameter(
                "query",
                &format!("({}, {})", query.x, query.y),
                &"coordinates must be finite",
            ));
        }
        if k < 1 {
            return Err(invalid_parameter("k", &k, &"must be at least 1"));
        }

        Ok(self.nearest_search(query, k, None))
    }

    /// All points within `radius` of a query coordinate
    ///
    /// Distances compare inclusively (`distance <= radius`); the result
    /// order is unspecified, so callers sort when they need determinism
    /// beyond the index's own row-major cell walk.
    ///
    /// # Errors
    ///
    /// Returns an error if `radius` is negative or NaN, or the query
    /// coordinate is non-finite.
    pub fn within_radius(&self, query: Point2, radius: f64) -> Result<Vec<usize>> {
        if !query.is_finite() {
            return Err(invalid_parameter(
                "query",
                &format!("({}, {})", query.x, query.y),
                &"coordinates must be finite",
            ));
        }
        if radius.is_nan() || radius < 0.0 {
            return Err(invalid_parameter(
                "radius",
                &radius,
                &"must be non-negative",
            ));
        }

        let (rows, columns) = self.dimensions;
        let radius_sq = radius * radius;

        let (row_lo, col_lo) = raw_cell(
            Point2::new(query.x - radius, query.y - radius),
            self.min,
            self.cell_size,
        );
        let (row_hi, col_hi) = raw_cell(
            Point2::new(query.x + radius, query.y + radius),
            self.min,
            self.cell_size,
        );

        let row_range = row_lo.max(0) as usize..=row_hi.clamp(0, rows as i64 - 1) as usize;
        let col_start = col_lo.max(0) as usize;
        let col_end = col_hi.clamp(0, columns as i64 - 1) as usize;

        let mut matches = Vec::new();
        if row_hi < 0 || col_hi < 0 || row_lo >= rows as i64 || col_lo >= columns as i64 {
            return Ok(matches);
        }

        for row in row_range {
            for column in col_start..=col_end {
                let Some(bucket) = self.cells.get([row, column]) else {
                    continue;
                };
                for &candidate in bucket {
                    let Some(p) = self.points.get(candidate) else {
                        continue;
                    };
                    if p.distance_squared(&query) <= radius_sq {
                        matches.push(candidate);
                    }
                }
            }
        }

        Ok(matches)
    }

    /// Expanding-ring nearest-neighbor search around a query location
    ///
    /// Visits grid cells in rings of increasing Chebyshev distance from the
    /// query's cell. After finishing ring R every unvisited point is at
    /// least `R * cell_size` away, so the search stops once the current
    /// k-th best distance drops below that bound.
    fn nearest_search(&self, query: Point2, k: usize, exclude: Option<usize>) -> Vec<Neighbor> {
        let (rows, columns) = self.dimensions;
        let (center_row, center_col) = raw_cell(query, self.min, self.cell_size);

        let max_row_dist = center_row.abs().max((rows as i64 - 1 - center_row).abs());
        let max_col_dist = center_col.abs().max((columns as i64 - 1 - center_col).abs());
        let max_ring = max_row_dist.max(max_col_dist);

        let mut candidates: Vec<Neighbor> = Vec::new();

        for ring in 0..=max_ring {
            self.visit_ring((center_row, center_col), ring, |candidate, p| {
                if exclude == Some(candidate) {
                    return;
                }
                candidates.push(Neighbor {
                    index: candidate,
                    distance: p.distance(&query),
                });
            });

            if candidates.len() >= k {
                let (_, kth, _) = candidates
                    .select_nth_unstable_by(k - 1, |a, b| a.distance.total_cmp(&b.distance));
                // Strict comparison: a point exactly on the bound could
                // still appear in the next ring with a lower index
                if kth.distance < ring as f64 * self.cell_size {
                    break;
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.index.cmp(&b.index))
        });
        candidates.truncate(k);
        candidates
    }

    /// Apply `visit` to every indexed point in cells at exactly the given
    /// Chebyshev ring distance from `center`, skipping out-of-bounds cells
    fn visit_ring(
        &self,
        center: (i64, i64),
        ring: i64,
        mut visit: impl FnMut(usize, &Point2),
    ) {
        let (center_row, center_col) = center;

        let mut visit_cell = |row: i64, column: i64| {
            let (rows, columns) = self.dimensions;
            if row < 0 || column < 0 || row >= rows as i64 || column >= columns as i64 {
                return;
            }
            let Some(bucket) = self.cells.get([row as usize, column as usize]) else {
                return;
            };
            for &candidate in bucket {
                if let Some(p) = self.points.get(candidate) {
                    visit(candidate, p);
                }
            }
        };

        if ring == 0 {
            visit_cell(center_row, center_col);
            return;
        }

        for column in (center_col - ring)..=(center_col + ring) {
            visit_cell(center_row - ring, column);
            visit_cell(center_row + ring, column);
        }
        for row in (center_row - ring + 1)..=(center_row + ring - 1) {
            visit_cell(row, center_col - ring);
            visit_cell(row, center_col + ring);
        }
    }
}

/// Unclamped cell coordinates of a location, as (row, column)
fn raw_cell(p: Point2, min: Point2, cell_size: f64) -> (i64, i64) {
    let column = ((p.x - min.x) / cell_size).floor() as i64;
    let row = ((p.y - min.y) / cell_size).floor() as i64;
    (row, column)
}

/// Clamp signed cell coordinates into the grid
fn clamp_cell(cell: (i64, i64), dimensions: (usize, usize)) -> (usize, usize) {
    let (rows, columns) = dimensions;
    let row = cell.0.clamp(0, rows as i64 - 1) as usize;
    let column = cell.1.clamp(0, columns as i64 - 1) as usize;
    (row, column)
}
