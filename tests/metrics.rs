//! Validates proximity metrics: neighbor distances, boundary distances, density

use pointstat::AnalysisError;
use pointstat::metrics::{
    NeighborGraph, UNDEFINED_DISTANCE, distance_to_boundary, local_density,
    nearest_neighbor_distances,
};
use pointstat::spatial::{Domain, Point2, SpatialGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_points(seed: u64, count: usize) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| Point2::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

#[test]
fn test_nearest_neighbor_distance_matches_brute_force() {
    let points = random_points(21, 300);
    let index =
        SpatialGrid::build(points.clone()).unwrap_or_else(|_| unreachable!("valid input"));

    let distances =
        nearest_neighbor_distances(&index).unwrap_or_else(|_| unreachable!("valid index"));
    assert_eq!(distances.len(), points.len());

    for (point_index, p) in points.iter().enumerate() {
        let brute = points
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != point_index)
            .map(|(_, q)| p.distance(q))
            .fold(f64::INFINITY, f64::min);

        let found = distances
            .get(point_index)
            .copied()
            .unwrap_or(UNDEFINED_DISTANCE);
        assert!(
            (found - brute).abs() < 1e-12,
            "point {point_index}: index gave {found}, brute force gave {brute}"
        );
    }
}

#[test]
fn test_single_point_has_undefined_distance() {
    let index = SpatialGrid::build(vec![Point2::new(0.1, 0.9)])
        .unwrap_or_else(|_| unreachable!("valid input"));
    let distances =
        nearest_neighbor_distances(&index).unwrap_or_else(|_| unreachable!("valid index"));

    assert_eq!(distances, vec![UNDEFINED_DISTANCE]);
}

#[test]
fn test_neighbor_graph_is_ordered_and_self_free() {
    let points = random_points(33, 120);
    let index = SpatialGrid::build(points).unwrap_or_else(|_| unreachable!("valid input"));
    let graph = NeighborGraph::build(&index, 6).unwrap_or_else(|_| unreachable!("valid k"));

    for point_index in 0..graph.len() {
        let neighbors = graph.neighbors(point_index);
        assert_eq!(neighbors.len(), 6);

        for pair in neighbors.windows(2) {
            let (Some(closer), Some(farther)) = (pair.first(), pair.last()) else {
                unreachable!("windows of 2");
            };
            assert!(closer.distance <= farther.distance);
        }
        assert!(neighbors.iter().all(|n| n.index != point_index));
    }
}

#[test]
fn test_boundary_distance_rectangle_and_missing_domain() {
    let domain = Domain::rectangle(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
        .unwrap_or_else(|_| unreachable!("valid rectangle"));
    let points = vec![Point2::new(0.2, 0.8), Point2::new(0.9, 0.1)];

    let result = distance_to_boundary(&points, Some(&domain))
        .unwrap_or_else(|_| unreachable!("valid input"));
    assert!(result.exact);

    let expected = [0.2, 0.1];
    for (distance, want) in result.distances.iter().zip(expected.iter()) {
        assert!((distance - want).abs() < 1e-12);
    }

    // No domain is an explicit error, not a silent default
    assert!(matches!(
        distance_to_boundary(&points, None),
        Err(AnalysisError::MissingDomain { .. })
    ));
}

#[test]
fn test_boundary_distance_polygon_approximates_rectangle() {
    // The same unit square expressed as a finely sampled polygon should
    // approximate the exact rectangle distances
    let rectangle = Domain::rectangle(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0))
        .unwrap_or_else(|_| unreachable!("valid rectangle"));
    let polygon = Domain::polygon(
        vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(0.0, 1.0),
        ],
        0.005,
    )
    .unwrap_or_else(|_| unreachable!("valid polygon"));

    let points = random_points(55, 50);

    let exact = distance_to_boundary(&points, Some(&rectangle))
        .unwrap_or_else(|_| unreachable!("valid input"));
    let approximate = distance_to_boundary(&points, Some(&polygon))
        .unwrap_or_else(|_| unreachable!("valid input"));

    assert!(exact.exact);
    assert!(!approximate.exact);

    for (a, b) in exact.distances.iter().zip(approximate.distances.iter()) {
        assert!((a - b).abs() < 0.01, "exact {a} vs sampled {b}");
    }
}

#[test]
fn test_local_density_tracks_point_spacing() {
    // Two patches with 4x4 points each: tight spacing on the left,
    // loose spacing on the right
    let mut points = Vec::new();
    for i in 0..4 {
        for j in 0..4 {
            points.push(Point2::new(f64::from(i) * 0.1, f64::from(j) * 0.1));
        }
    }
    for i in 0..4 {
        for j in 0..4 {
            points.push(Point2::new(10.0 + f64::from(i), f64::from(j)));
        }
    }

    let index = SpatialGrid::build(points).unwrap_or_else(|_| unreachable!("valid input"));
    let densities = local_density(&index, 3).unwrap_or_else(|_| unreachable!("valid k"));

    let tight_mean: f64 = densities.iter().take(16).sum::<f64>() / 16.0;
    let loose_mean: f64 = densities.iter().skip(16).sum::<f64>() / 16.0;

    assert!(
        tight_mean > loose_mean * 10.0,
        "tight patch {tight_mean} should dwarf loose patch {loose_mean}"
    );
}
