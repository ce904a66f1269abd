//! Lloyd's-algorithm k-means clustering with explicit seeding

use rand::rngs::StdRng;
use rand::{SeedableRng, seq::index::sample};

use crate::error::{Result, invalid_parameter};
use crate::spatial::grid::SpatialGrid;
use crate::spatial::point::Point2;

/// K-means configuration
///
/// Randomness is confined to centroid initialization and is driven by the
/// explicit `seed` field; two runs with identical parameters and seed
/// produce identical labelings and centroids.
#[derive(Debug, Clone)]
pub struct KMeansParams {
    /// Number of clusters to fit (at least 1, at most the point count)
    pub clusters: usize,
    /// Iteration budget; hitting it is reported as non-convergence, not an
    /// error (at least 1)
    pub max_iterations: usize,
    /// Starting centroids; when absent, initialized by sampling points
    /// without replacement
    pub initial_centroids: Option<Vec<Point2>>,
    /// Seed for centroid initialization; unseeded runs draw from OS entropy
    /// and are not reproducible
    pub seed: Option<u64>,
}

impl KMeansParams {
    /// Parameters for `clusters` clusters with a 100-iteration budget
    pub const fn new(clusters: usize) -> Self {
        Self {
            clusters,
            max_iterations: 100,
            initial_centroids: None,
            seed: None,
        }
    }
}

/// Outcome of a k-means run
#[derive(Debug, Clone)]
pub struct KMeansResult {
    /// Cluster assignment per point, aligned with the point set
    pub labels: Vec<usize>,
    /// Final centroid coordinates, indexed by cluster id
    pub centroids: Vec<Point2>,
    /// Iterations executed, counting the final stability check
    pub iterations: usize,
    /// False when the iteration budget was exhausted before assignments
    /// stabilized; the partial clustering is still usable
    pub converged: bool,
}

impl KMeansResult {
    /// Total within-cluster sum of squared distances
    ///
    /// Lets callers running parallel restarts with different seeds pick the
    /// best clustering.
    pub fn within_cluster_variance(&self, points: &[Point2]) -> f64 {
        points
            .iter()
            .zip(self.labels.iter())
            .map(|(p, &label)| {
                self.centroids
                    .get(label)
                    .map_or(0.0, |centroid| p.distance_squared(centroid))
            })
            .sum()
    }
}

/// Run Lloyd's algorithm over the indexed point set
///
/// Each iteration assigns every point to its nearest centroid (ties broken
/// by the lowest centroid index) and recomputes centroids as the mean of
/// their assigned points; a centroid with no assigned points keeps its
/// position. The loop stops when no assignment changes or the iteration
/// budget runs out.
///
/// # Errors
///
/// Returns an error if `clusters < 1`, `clusters` exceeds the point count,
/// `max_iterations < 1`, or supplied initial centroids have the wrong count
/// or non-finite coordinates.
pub fn cluster(index: &SpatialGrid, params: &KMeansParams) -> Result<KMeansResult> {
    let points = index.points();
    let k = params.clusters;

    if k < 1 {
        return Err(invalid_parameter("clusters", &k, &"must be at least 1"));
    }
    if k > points.len() {
        return Err(invalid_parameter(
            "clusters",
            &k,
            &format!("point set has only {} points", points.len()),
        ));
    }
    if params.max_iterations < 1 {
        return Err(invalid_parameter(
            "max_iterations",
            &params.max_iterations,
            &"must be at least 1",
        ));
    }

    let mut centroids = initial_centroids(points, params)?;

    // A sentinel assignment forces the first pass to register as a change
    let mut labels = vec![usize::MAX; points.len()];
    let mut iterations = 0;
    let mut converged = false;

    for iteration in 1..=params.max_iterations {
        iterations = iteration;

        let mut changed = false;
        for (p, label) in points.iter().zip(labels.iter_mut()) {
            let assignment = nearest_centroid(p, &centroids);
            if *label != assignment {
                *label = assignment;
                changed = true;
            }
        }

        if !changed {
            converged = true;
            break;
        }

        update_centroids(points, &labels, &mut centroids);
    }

    Ok(KMeansResult {
        labels,
        centroids,
        iterations,
        converged,
    })
}

/// Resolve starting centroids from the parameters
fn initial_centroids(points: &[Point2], params: &KMeansParams) -> Result<Vec<Point2>> {
    if let Some(initial) = &params.initial_centroids {
        if initial.len() != params.clusters {
            return Err(invalid_parameter(
                "initial_centroids",
                &initial.len(),
                &format!("expected {} centroids", params.clusters),
            ));
        }
        if initial.iter().any(|c| !c.is_finite()) {
            return Err(invalid_parameter(
                "initial_centroids",
                &"non-finite",
                &"centroid coordinates must be finite",
            ));
        }
        return Ok(initial.clone());
    }

    let mut rng = params
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let chosen = sample(&mut rng, points.len(), params.clusters);
    Ok(chosen
        .into_iter()
        .filter_map(|point_index| points.get(point_index).copied())
        .collect())
}

/// Index of the closest centroid, lowest index winning ties
fn nearest_centroid(p: &Point2, centroids: &[Point2]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;

    for (centroid_index, centroid) in centroids.iter().enumerate() {
        let distance = p.distance_squared(centroid);
        if distance < best_distance {
            best_distance = distance;
            best = centroid_index;
        }
    }

    best
}

/// Recompute each centroid as the mean of its assigned points
fn update_centroids(points: &[Point2], labels: &[usize], centroids: &mut [Point2]) {
    let mut sums = vec![Point2::default(); centroids.len()];
    let mut counts = vec![0_usize; centroids.len()];

    for (p, &label) in points.iter().zip(labels.iter()) {
        if let (Some(sum), Some(count)) = (sums.get_mut(label), counts.get_mut(label)) {
            *sum += *p;
            *count += 1;
        }
    }

    for ((centroid, sum), &count) in centroids.iter_mut().zip(sums).zip(counts.iter()) {
        if count > 0 {
            *centroid = sum / count as f64;
        }
    }
}
