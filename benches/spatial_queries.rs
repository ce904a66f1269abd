//! Performance measurement for spatial index construction and neighbor queries

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pointstat::spatial::{Point2, SpatialGrid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

fn random_points(count: usize) -> Vec<Point2> {
    let mut rng = StdRng::seed_from_u64(12345);
    (0..count)
        .map(|_| Point2::new(rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}

/// Measures index construction cost as the point count grows
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");

    for size in &[1_000, 10_000, 100_000] {
        let points = random_points(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let Ok(index) = SpatialGrid::build(black_box(points.clone())) else {
                    return;
                };
                black_box(index.len());
            });
        });
    }

    group.finish();
}

/// Measures k-nearest queries against a 10k-point index
fn bench_k_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("k_nearest");

    let Ok(index) = SpatialGrid::build(random_points(10_000)) else {
        return;
    };

    for k in &[1_usize, 8, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(k), k, |b, &k| {
            b.iter(|| {
                for query_index in (0..index.len()).step_by(100) {
                    let Ok(neighbors) = index.k_nearest(black_box(query_index), k) else {
                        return;
                    };
                    black_box(neighbors.len());
                }
            });
        });
    }

    group.finish();
}

/// Measures radius queries at growing search radii
fn bench_within_radius(c: &mut Criterion) {
    let mut group = c.benchmark_group("within_radius");

    let Ok(index) = SpatialGrid::build(random_points(10_000)) else {
        return;
    };

    for radius in &[0.01, 0.05, 0.1] {
        group.bench_with_input(
            BenchmarkId::from_parameter(radius),
            radius,
            |b, &radius| {
                b.iter(|| {
                    let Ok(matches) =
                        index.within_radius(black_box(Point2::new(0.5, 0.5)), radius)
                    else {
                        return;
                    };
                    black_box(matches.len());
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_k_nearest,
    bench_within_radius
);
criterion_main!(benches);
