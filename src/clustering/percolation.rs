//! Percolation clustering: connected components of a proximity graph

use crate::error::{Result, invalid_parameter};
use crate::spatial::grid::SpatialGrid;

/// Percolation clustering configuration
#[derive(Debug, Clone, Copy)]
pub struct PercolationParams {
    /// Maximum distance at which two points count as connected (positive
    /// and finite)
    pub connection_radius: f64,
}

/// Outcome of a percolation clustering run
#[derive(Debug, Clone)]
pub struct PercolationResult {
    /// Component id per point; ids are compacted in order of each
    /// component's first appearance by point index
    pub labels: Vec<usize>,
    /// Number of connected components
    pub cluster_count: usize,
}

/// Label connected components of the radius-`r` proximity graph
///
/// Two points are adjacent when their distance is at most the connection
/// radius; adjacency is discovered through index radius queries, never an
/// explicit adjacency matrix. Every point belongs to exactly one component
/// (possibly a singleton); there is no noise concept.
///
/// # Errors
///
/// Returns an error if the connection radius is not a positive finite
/// value.
pub fn cluster(index: &SpatialGrid, params: &PercolationParams) -> Result<PercolationResult> {
    let radius = params.connection_radius;
    if !radius.is_finite() || radius <= 0.0 {
        return Err(invalid_parameter(
            "connection_radius",
            &radius,
            &"must be a positive finite value",
        ));
    }

    let points = index.points();
    let mut components = DisjointSet::new(points.len());

    for (point_index, p) in points.iter().enumerate() {
        for neighbor in index.within_radius(*p, radius)? {
            if neighbor != point_index {
                components.union(point_index, neighbor);
            }
        }
    }

    // Compact root ids into dense labels ordered by first appearance
    let mut labels = Vec::with_capacity(points.len());
    let mut root_to_label = std::collections::HashMap::new();

    for point_index in 0..points.len() {
        let root = components.find(point_index);
        let next_label = root_to_label.len();
        let label = *root_to_label.entry(root).or_insert(next_label);
        labels.push(label);
    }

    Ok(PercolationResult {
        cluster_count: root_to_label.len(),
        labels,
    })
}

/// Union-find with path compression and union by rank
#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    /// Find the root of `element`, halving the path along the way
    fn find(&mut self, mut element: usize) -> usize {
        while let Some(&parent) = self.parent.get(element) {
            if parent == element {
                break;
            }
            let grandparent = self.parent.get(parent).copied().unwrap_or(parent);
            if let Some(slot) = self.parent.get_mut(element) {
                *slot = grandparent;
            }
            element = grandparent;
        }
        element
    }

    /// Merge the components containing `a` and `b`
    fn union(&mut self, a: usize, b: usize) {
        let first = self.find(a);
        let second = self.find(b);
        if first == second {
            return;
        }

        let first_rank = self.rank.get(first).copied().unwrap_or(0);
        let second_rank = self.rank.get(second).copied().unwrap_or(0);

        let (child, new_root) = if first_rank < second_rank {
            (first, second)
        } else {
            (second, first)
        };

        if let Some(slot) = self.parent.get_mut(child) {
            *slot = new_root;
        }
        if first_rank == second_rank {
            if let Some(rank) = self.rank.get_mut(new_root) {
                *rank += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spatial::point::Point2;

    #[test]
    fn test_parameter_validation() {
        let index = SpatialGrid::build(vec![Point2::new(0.0, 0.0)])
            .unwrap_or_else(|_| unreachable!("valid input"));

        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let params = PercolationParams {
                connection_radius: bad,
            };
            assert!(cluster(&index, &params).is_err(), "radius {bad} must fail");
        }
    }

    #[test]
    fn test_every_point_gets_exactly_one_component() {
        let points = vec![
            Point2::new(0.1, 0.2),
            Point2::new(0.15, 0.22),
            Point2::new(0.9, 0.9),
        ];
        let index = SpatialGrid::build(points).unwrap_or_else(|_| unreachable!("valid input"));

        let result = cluster(
            &index,
            &PercolationParams {
                connection_radius: 0.1,
            },
        )
        .unwrap_or_else(|_| unreachable!("valid params"));

        assert_eq!(result.labels, vec![0, 0, 1]);
        assert_eq!(result.cluster_count, 2);
    }

    #[test]
    fn test_union_find_merges_transitively() {
        let mut set = DisjointSet::new(5);
        set.union(0, 1);
        set.union(1, 2);
        set.union(3, 4);

        assert_eq!(set.find(0), set.find(2));
        assert_eq!(set.find(3), set.find(4));
        assert_ne!(set.find(0), set.find(4));
    }
}
