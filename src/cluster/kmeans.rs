// Lloyd's k-means over the reduced document vectors.
//
// Centroid seeding follows the k-means++ scheme (squared-distance weighted
// draws from the fixed Lcg), so a given seed always yields the same
// partition. Ties during assignment go to the lowest-numbered cluster, and
// a centroid whose cluster empties out keeps its previous position rather
// than being redrawn.

use tracing::debug;

use crate::cluster::rng::Lcg;
use crate::error::AnalysisError;

pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// K-means configuration.
pub struct KMeans {
    pub n_clusters: usize,
    pub max_iterations: usize,
    pub seed: u64,
}

/// Outcome of a fit: one cluster label per input row, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct KMeansFit {
    pub assignments: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub iterations: usize,
    pub converged: bool,
}

impl KMeansFit {
    /// Member count per cluster label, including empty clusters.
    pub fn member_counts(&self) -> Vec<usize> {
        let mut counts = vec![0; self.centroids.len()];
        for &label in &self.assignments {
            counts[label] += 1;
        }
        counts
    }
}

impl KMeans {
    pub fn new(n_clusters: usize, max_iterations: usize, seed: u64) -> Self {
        Self {
            n_clusters,
            max_iterations,
            seed,
        }
    }

    pub fn fit(&self, points: &[Vec<f64>]) -> Result<KMeansFit, AnalysisError> {
        if self.n_clusters == 0 || self.n_clusters > points.len() {
            return Err(AnalysisError::invalid_cluster_count(
                self.n_clusters,
                points.len(),
            ));
        }

        let mut rng = Lcg::new(self.seed);
        let mut centroids = init_centroids(points, self.n_clusters, &mut rng);
        let mut assignments = vec![usize::MAX; points.len()];
        let mut iterations = 0;
        let mut converged = false;

        // A cap of zero would leave the sentinel labels in place, so at
        // least one assignment pass always runs
        let cap = self.max_iterations.max(1);
        for iteration in 1..=cap {
            iterations = iteration;

            let mut changed = false;
            for (point, label) in points.iter().zip(assignments.iter_mut()) {
                let nearest = nearest_centroid(point, &centroids);
                if nearest != *label {
                    *label = nearest;
                    changed = true;
                }
            }
            if !changed {
                converged = true;
                break;
            }

            let mut sums = vec![vec![0.0; centroids[0].len()]; centroids.len()];
            let mut counts = vec![0usize; centroids.len()];
            for (point, &label) in points.iter().zip(&assignments) {
                counts[label] += 1;
                for (s, &x) in sums[label].iter_mut().zip(point) {
                    *s += x;
                }
            }
            for (label, count) in counts.iter().enumerate() {
                // Empty clusters keep their previous centroid
                if *count > 0 {
                    for s in &mut sums[label] {
                        *s /= *count as f64;
                    }
                    centroids[label] = std::mem::take(&mut sums[label]);
                }
            }
        }

        debug!(
            clusters = self.n_clusters,
            iterations, converged, "Fit k-means partition"
        );

        Ok(KMeansFit {
            assignments,
            centroids,
            iterations,
            converged,
        })
    }
}

/// k-means++ seeding: the first centroid is a uniform draw, each later one
/// a draw weighted by squared distance to the nearest centroid so far.
fn init_centroids(points: &[Vec<f64>], n_clusters: usize, rng: &mut Lcg) -> Vec<Vec<f64>> {
    let mut chosen: Vec<usize> = Vec::with_capacity(n_clusters);
    chosen.push(rng.next_index(points.len()));

    while chosen.len() < n_clusters {
        let distances: Vec<f64> = points
            .iter()
            .map(|point| {
                chosen
                    .iter()
                    .map(|&c| squared_distance(point, &points[c]))
                    .fold(f64::INFINITY, f64::min)
            })
            .collect();
        let total: f64 = distances.iter().sum();

        let next = if total > 0.0 {
            let target = rng.next_f64() * total;
            let mut cumulative = 0.0;
            let mut pick = points.len() - 1;
            for (i, &d) in distances.iter().enumerate() {
                cumulative += d;
                if cumulative > target {
                    pick = i;
                    break;
                }
            }
            pick
        } else {
            // All remaining spread is zero (duplicate points); fall back to
            // the first index not already chosen
            (0..points.len())
                .find(|i| !chosen.contains(i))
                .unwrap_or(0)
        };
        chosen.push(next);
    }

    chosen.iter().map(|&i| points[i].clone()).collect()
}

/// Index of the closest centroid; the strict comparison keeps the lowest
/// index on exact ties.
fn nearest_centroid(point: &[f64], centroids: &[Vec<f64>]) -> usize {
    let mut best = 0;
    let mut best_distance = f64::INFINITY;
    for (i, centroid) in centroids.iter().enumerate() {
        let d = squared_distance(point, centroid);
        if d < best_distance {
            best_distance = d;
            best = i;
        }
    }
    best
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}
