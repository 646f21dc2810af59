//! k-means clustering of bounding-box centers.

use log::debug;
use lumen_math::Vec3;
use rand::seq::index;
use rand::Rng;

/// Upper bound on assignment/update rounds.
pub const MAX_KMEANS_ITERATIONS: usize = 100;

/// Partition `points` into at most `k` clusters.
///
/// Returns the cluster index of every point. Initial centroids are `k`
/// distinct points drawn with `rng`, so a seeded generator gives a
/// reproducible partition. A cluster that loses all its points keeps its
/// previous centroid. `k` is clamped to the number of points.
pub fn kmeans<R: Rng + ?Sized>(points: &[Vec3], k: usize, rng: &mut R) -> Vec<usize> {
    let k = k.min(points.len());
    if k == 0 {
        return vec![0; points.len()];
    }

    let mut centroids: Vec<Vec3> = index::sample(rng, points.len(), k)
        .into_iter()
        .map(|i| points[i])
        .collect();
    let mut assignments = vec![usize::MAX; points.len()];

    for iteration in 0..MAX_KMEANS_ITERATIONS {
        let mut changed = false;
        for (point, assigned) in points.iter().zip(assignments.iter_mut()) {
            let nearest = nearest_centroid(&centroids, *point);
            if nearest != *assigned {
                *assigned = nearest;
                changed = true;
            }
        }

        if !changed {
            debug!("k-means converged after {} iterations (k={})", iteration, k);
            return assignments;
        }

        let mut sums = vec![Vec3::ZERO; k];
        let mut counts = vec![0usize; k];
        for (point, &cluster) in points.iter().zip(&assignments) {
            sums[cluster] += *point;
            counts[cluster] += 1;
        }
        for ((centroid, sum), count) in centroids.iter_mut().zip(sums).zip(counts) {
            if count > 0 {
                *centroid = sum / count as f32;
            }
        }
    }

    debug!(
        "k-means stopped at the {} iteration cap (k={})",
        MAX_KMEANS_ITERATIONS, k
    );
    assignments
}

/// Index of the closest centroid; ties go to the lower index.
fn nearest_centroid(centroids: &[Vec3], point: Vec3) -> usize {
    let mut best = 0;
    let mut best_dist = f32::INFINITY;
    for (i, c) in centroids.iter().enumerate() {
        let dist = c.distance_squared(point);
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
