//! Seeded k-means with k-means++ initialisation.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::ClusterError;

#[derive(Debug, Clone, Copy)]
pub(crate) struct KMeans {
    pub k: usize,
    pub seed: u64,
    pub restarts: usize,
    pub max_iterations: usize,
    pub tolerance: f64,
}

/// Best restart: labels relabelled by first appearance, centroids in the same order.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct KMeansFit {
    pub labels: Vec<usize>,
    pub centroids: Vec<Vec<f64>>,
    pub inertia: f64,
}

impl KMeans {
    /// Cluster `points`, keeping the restart with the lowest inertia.
    ///
    /// One RNG seeded from `seed` drives every restart, so identical input
    /// always yields identical output.
    pub(crate) fn fit(&self, points: &[Vec<f64>]) -> Result<KMeansFit, ClusterError> {
        if points.is_empty() {
            return Err(ClusterError::Degenerate("no points".into()));
        }
        if self.k == 0 || self.k > points.len() {
            return Err(ClusterError::Degenerate(format!("k={} for {} points", self.k, points.len())));
        }
        let dims = points[0].len();
        if dims == 0 || points.iter().any(|p| p.len() != dims) {
            return Err(ClusterError::Degenerate("inconsistent dimensions".into()));
        }

        let tolerance = self.tolerance * mean_variance(points);
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let mut best: Option<KMeansFit> = None;

        for restart in 0..self.restarts.max(1) {
            let initial = kmeans_plus_plus(points, self.k, &mut rng);
            let fit = self.lloyd(points, initial, tolerance);
            tracing::trace!(restart, inertia = fit.inertia, "k-means restart finished");
            if best.as_ref().is_none_or(|b| fit.inertia < b.inertia) {
                best = Some(fit);
            }
        }

        best.map(relabel).ok_or_else(|| ClusterError::Degenerate("no restart completed".into()))
    }

    fn lloyd(&self, points: &[Vec<f64>], mut centroids: Vec<Vec<f64>>, tolerance: f64) -> KMeansFit {
        let mut labels = assign(points, &centroids);
        for _ in 0..self.max_iterations {
            let updated = update(points, &labels, &centroids);
            let shift: f64 = centroids.iter().zip(&updated).map(|(a, b)| squared_distance(a, b)).sum();
            centroids = updated;
            labels = assign(points, &centroids);
            if shift <= tolerance {
                break;
            }
        }
        let inertia = points
            .iter()
            .zip(&labels)
            .map(|(p, &label)| squared_distance(p, &centroids[label]))
            .sum();
        KMeansFit { labels, centroids, inertia }
    }
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

fn mean_variance(points: &[Vec<f64>]) -> f64 {
    let n = points.len() as f64;
    let dims = points[0].len();
    let total: f64 = (0..dims)
        .map(|j| {
            let mean = points.iter().map(|p| p[j]).sum::<f64>() / n;
            points.iter().map(|p| (p[j] - mean).powi(2)).sum::<f64>() / n
        })
        .sum();
    total / dims as f64
}

/// Index of the nearest centroid for every point; the lowest index wins ties.
fn assign(points: &[Vec<f64>], centroids: &[Vec<f64>]) -> Vec<usize> {
    points
        .iter()
        .map(|p| {
            let mut best = 0;
            let mut best_distance = f64::MAX;
            for (j, c) in centroids.iter().enumerate() {
                let d = squared_distance(p, c);
                if d < best_distance {
                    best_distance = d;
                    best = j;
                }
            }
            best
        })
        .collect()
}

/// Mean of each cluster's members. An empty cluster keeps its previous centroid.
fn update(points: &[Vec<f64>], labels: &[usize], previous: &[Vec<f64>]) -> Vec<Vec<f64>> {
    let dims = points[0].len();
    let mut sums = vec![vec![0.0; dims]; previous.len()];
    let mut counts = vec![0usize; previous.len()];
    for (p, &label) in points.iter().zip(labels) {
        counts[label] += 1;
        for (s, v) in sums[label].iter_mut().zip(p) {
            *s += v;
        }
    }
    sums.into_iter()
        .zip(counts)
        .zip(previous)
        .map(|((sum, count), prev)| {
            if count == 0 {
                prev.clone()
            } else {
                sum.into_iter().map(|s| s / count as f64).collect()
            }
        })
        .collect()
}

/// k-means++ seeding: each further centroid is drawn with probability
/// proportional to its squared distance from the nearest chosen one.
fn kmeans_plus_plus(points: &[Vec<f64>], k: usize, rng: &mut ChaCha8Rng) -> Vec<Vec<f64>> {
    let mut centroids = Vec::with_capacity(k);
    centroids.push(points[rng.gen_range(0..points.len())].clone());

    while centroids.len() < k {
        let distances: Vec<f64> = points
            .iter()
            .map(|p| centroids.iter().map(|c| squared_distance(p, c)).fold(f64::MAX, f64::min))
            .collect();
        let total: f64 = distances.iter().sum();

        let chosen = if total > 0.0 {
            let target = rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            distances
                .iter()
                .position(|d| {
                    cumulative += d;
                    cumulative >= target && *d > 0.0
                })
                .unwrap_or(points.len() - 1)
        } else {
            rng.gen_range(0..points.len())
        };
        centroids.push(points[chosen].clone());
    }
    centroids
}

/// Renumber clusters in order of first appearance in `labels`.
fn relabel(fit: KMeansFit) -> KMeansFit {
    let mut mapping: Vec<Option<usize>> = vec![None; fit.centroids.len()];
    let mut order = Vec::new();
    for &label in &fit.labels {
        if mapping[label].is_none() {
            mapping[label] = Some(order.len());
            order.push(label);
        }
    }
    let labels = fit
        .labels
        .iter()
        .map(|&label| mapping[label].unwrap_or(label))
        .collect();
    let centroids = order.iter().map(|&old| fit.centroids[old].clone()).collect();
    KMeansFit { labels, centroids, inertia: fit.inertia }
}
