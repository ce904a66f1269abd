//! Multi-source shortest-path distance fields over filament connectivity

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{Result, invalid_input, invalid_parameter};
use crate::spatial::point::Point2;

/// Sentinel distance for points with no path to any root
pub const UNREACHABLE: f64 = f64::INFINITY;

/// Undirected weighted connectivity over a point set
///
/// The graph is supplied externally, typically as the connectivity of a
/// random-walk filament structure produced alongside the point set. This
/// component only measures distances along it; it never constructs
/// filaments itself. Node ids are point indices, so distance fields align
/// 1:1 with the point set.
#[derive(Debug, Clone)]
pub struct FilamentGraph {
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl FilamentGraph {
    /// Build a graph whose edge weights are the Euclidean distances
    /// between the endpoints' coordinates
    ///
    /// # Errors
    ///
    /// Returns an error if any endpoint index is out of range or any
    /// coordinate is non-finite.
    pub fn with_euclidean_edges(points: &[Point2], edges: &[(usize, usize)]) -> Result<Self> {
        if let Some(bad) = points.iter().position(|p| !p.is_finite()) {
            return Err(invalid_input(&format!(
                "point {bad} has non-finite coordinates"
            )));
        }

        let mut graph = Self::with_node_count(points.len());
        for &(a, b) in edges {
            let (Some(pa), Some(pb)) = (points.get(a), points.get(b)) else {
                return Err(invalid_parameter(
                    "edges",
                    &format!("({a}, {b})"),
                    &format!("endpoints must be below {}", points.len()),
                ));
            };
            graph.insert_edge(a, b, pa.distance(pb));
        }

        Ok(graph)
    }

    /// Build a graph from explicitly weighted edges
    ///
    /// # Errors
    ///
    /// Returns an error if any endpoint index is at or above `node_count`
    /// or any weight is negative or non-finite.
    pub fn with_weighted_edges(
        node_count: usize,
        edges: &[(usize, usize, f64)],
    ) -> Result<Self> {
        let mut graph = Self::with_node_count(node_count);

        for &(a, b, weight) in edges {
            if a >= node_count || b >= node_count {
                return Err(invalid_parameter(
                    "edges",
                    &format!("({a}, {b})"),
                    &format!("endpoints must be below {node_count}"),
                ));
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(invalid_parameter(
                    "edges",
                    &weight,
                    &"edge weights must be non-negative finite values",
                ));
            }
            graph.insert_edge(a, b, weight);
        }

        Ok(graph)
    }

    /// Number of nodes (points) the graph spans
    pub const fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Neighbors of a node with their edge weights, empty if out of range
    pub fn edges_of(&self, node: usize) -> &[(usize, f64)] {
        self.adjacency.get(node).map_or(&[], Vec::as_slice)
    }

    fn with_node_count(node_count: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); node_count],
        }
    }

    fn insert_edge(&mut self, a: usize, b: usize, weight: f64) {
        if let Some(neighbors) = self.adjacency.get_mut(a) {
            neighbors.push((b, weight));
        }
        if a != b {
            if let Some(neighbors) = self.adjacency.get_mut(b) {
                neighbors.push((a, weight));
            }
        }
    }
}

/// Pending heap entry for the shortest-path sweep
#[derive(Debug, PartialEq)]
struct Visit {
    distance: f64,
    node: usize,
}

impl Eq for Visit {}

impl Ord for Visit {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so the binary max-heap pops the closest node first
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Visit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest-path distance from every node to the nearest root
///
/// Runs a multi-source Dijkstra sweep in edge-weight units; with Euclidean
/// edge weights this is the geodesic distance along the filament structure.
/// Nodes with no path to any root receive [`UNREACHABLE`].
///
/// # Errors
///
/// Returns an error if the root set is empty or contains an out-of-range
/// node id.
pub fn distance_field(graph: &FilamentGraph, roots: &[usize]) -> Result<Vec<f64>> {
    if roots.is_empty() {
        return Err(invalid_parameter(
            "roots",
            &"empty",
            &"root set must not be empty",
        ));
    }

    let mut distances = vec![UNREACHABLE; graph.node_count()];
    let mut pending = BinaryHeap::new();

    for &root in roots {
        let Some(slot) = distances.get_mut(root) else {
            return Err(invalid_parameter(
                "roots",
                &root,
                &format!("node ids must be below {}", graph.node_count()),
            ));
        };
        *slot = 0.0;
        pending.push(Visit {
            distance: 0.0,
            node: root,
        });
    }

    while let Some(visit) = pending.pop() {
        let settled = distances.get(visit.node).copied().unwrap_or(UNREACHABLE);
        if visit.distance > settled {
            continue;
        }

        for &(neighbor, weight) in graph.edges_of(visit.node) {
            let candidate = visit.distance + weight;
            let Some(current) = distances.get_mut(neighbor) else {
                continue;
            };
            if candidate < *current {
                *current = candidate;
                pending.push(Visit {
                    distance: candidate,
                    node: neighbor,
                });
            }
        }
    }

    Ok(distances)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_chain_distances() {
        // 0 - 1 - 2 - 3 with unit edges
        let edges = [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)];
        let graph = FilamentGraph::with_weighted_edges(4, &edges)
            .unwrap_or_else(|_| unreachable!("valid edges"));

        let field = distance_field(&graph, &[0]).unwrap_or_else(|_| unreachable!("valid roots"));

        for (node, distance) in field.iter().enumerate() {
            assert!((distance - node as f64).abs() < 1e-12);
        }
    }

    #[test]
    fn test_isolated_node_is_unreachable() {
        let graph = FilamentGraph::with_weighted_edges(3, &[(0, 1, 2.0)])
            .unwrap_or_else(|_| unreachable!("valid edges"));

        let field = distance_field(&graph, &[0]).unwrap_or_else(|_| unreachable!("valid roots"));

        assert_eq!(field.first().copied(), Some(0.0));
        assert_eq!(field.get(1).copied(), Some(2.0));
        assert_eq!(field.last().copied(), Some(UNREACHABLE));
    }

    #[test]
    fn test_multiple_roots_take_the_nearest() {
        // 0 - 1 - 2 - 3 - 4 chain, roots at both ends
        let edges = [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0)];
        let graph = FilamentGraph::with_weighted_edges(5, &edges)
            .unwrap_or_else(|_| unreachable!("valid edges"));

        let field =
            distance_field(&graph, &[0, 4]).unwrap_or_else(|_| unreachable!("valid roots"));

        let expected = [0.0, 1.0, 2.0, 1.0, 0.0];
        for (distance, want) in field.iter().zip(expected.iter()) {
            assert!((distance - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_validation_of_roots_and_edges() {
        let graph = FilamentGraph::with_weighted_edges(2, &[(0, 1, 1.0)])
            .unwrap_or_else(|_| unreachable!("valid edges"));

        assert!(distance_field(&graph, &[]).is_err());
        assert!(distance_field(&graph, &[5]).is_err());

        assert!(FilamentGraph::with_weighted_edges(2, &[(0, 3, 1.0)]).is_err());
        assert!(FilamentGraph::with_weighted_edges(2, &[(0, 1, -1.0)]).is_err());
        assert!(FilamentGraph::with_weighted_edges(2, &[(0, 1, f64::NAN)]).is_err());
    }

    #[test]
    fn test_euclidean_edges_measure_geometry() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 4.0),
            Point2::new(3.0, 8.0),
        ];
        let graph = FilamentGraph::with_euclidean_edges(&points, &[(0, 1), (1, 2)])
            .unwrap_or_else(|_| unreachable!("valid edges"));

        let field = distance_field(&graph, &[0]).unwrap_or_else(|_| unreachable!("valid roots"));

        let expected = [0.0, 5.0, 9.0];
        for (distance, want) in field.iter().zip(expected.iter()) {
            assert!((distance - want).abs() < 1e-12);
        }
    }
}
