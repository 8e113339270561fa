use geo::{Centroid, Coord};
use rand::{distr::{weighted::WeightedIndex, Distribution}, Rng};

use crate::error::{PlanError, Result};
use crate::model::Sited;

const MAX_ITERATIONS: usize = 300;

/// Convergence threshold on squared center movement, relative to the data variance.
const RELATIVE_TOLERANCE: f64 = 1e-4;

/// Partition entities into exactly `k` groups by k-means over their centroids.
///
/// Groups are returned as index lists into `entities`, ordered by the first
/// entity of each group. Results depend on `rng`; seed it for reproducible
/// runs.
pub fn cluster_by_centroid<T: Sited>(entities: &[T], k: usize, rng: &mut impl Rng) -> Result<Vec<Vec<usize>>> {
    if k == 0 {
        return Err(PlanError::Config("cannot cluster into zero groups".into()));
    }
    if k > entities.len() {
        return Err(PlanError::ClusterCount { requested: k, available: entities.len() });
    }

    let points = entities.iter()
        .map(|entity| entity.geometry().centroid()
            .map(|p| p.0)
            .ok_or_else(|| PlanError::EmptyGeometry(entity.id().to_string())))
        .collect::<Result<Vec<_>>>()?;

    let labels = kmeans(&points, k, rng);

    // Group in order of first appearance.
    let mut slot = vec![usize::MAX; k];
    let mut groups: Vec<Vec<usize>> = Vec::with_capacity(k);
    for (i, &label) in labels.iter().enumerate() {
        if slot[label] == usize::MAX {
            slot[label] = groups.len();
            groups.push(Vec::new());
        }
        groups[slot[label]].push(i);
    }
    Ok(groups)
}

/// Lloyd iterations from k-means++ seeds. Requires `1 <= k <= points.len()`.
fn kmeans(points: &[Coord<f64>], k: usize, rng: &mut impl Rng) -> Vec<usize> {
    let tolerance = RELATIVE_TOLERANCE * mean_variance(points);
    let mut centers = seed_centers(points, k, rng);
    let mut labels = vec![0; points.len()];

    for _ in 0..MAX_ITERATIONS {
        for (label, point) in labels.iter_mut().zip(points) {
            *label = nearest_center(point, &centers);
        }
        fill_empty_clusters(points, &mut labels, &centers, k);

        let mut sums = vec![Coord { x: 0.0, y: 0.0 }; k];
        let mut counts = vec![0usize; k];
        for (&label, point) in labels.iter().zip(points) {
            sums[label] = sums[label] + *point;
            counts[label] += 1;
        }
        let next = sums.iter().zip(&counts)
            .map(|(&sum, &count)| sum / count as f64)
            .collect::<Vec<_>>();

        let shift = centers.iter().zip(&next)
            .map(|(a, b)| squared_distance(a, b))
            .sum::<f64>();
        centers = next;
        if shift <= tolerance { break }
    }

    labels
}

/// k-means++: first center uniform, each next one drawn with probability
/// proportional to its squared distance from the nearest chosen center.
fn seed_centers(points: &[Coord<f64>], k: usize, rng: &mut impl Rng) -> Vec<Coord<f64>> {
    let mut centers = Vec::with_capacity(k);
    centers.push(points[rng.random_range(0..points.len())]);

    while centers.len() < k {
        let weights = points.iter()
            .map(|p| centers.iter().map(|c| squared_distance(p, c)).fold(f64::INFINITY, f64::min))
            .collect::<Vec<_>>();
        let next = match WeightedIndex::new(&weights) {
            Ok(distribution) => distribution.sample(rng),
            // Every point coincides with a center already.
            Err(_) => rng.random_range(0..points.len()),
        };
        centers.push(points[next]);
    }
    centers
}

/// Move the farthest member of a multi-member cluster into each empty cluster.
fn fill_empty_clusters(points: &[Coord<f64>], labels: &mut [usize], centers: &[Coord<f64>], k: usize) {
    let mut counts = vec![0usize; k];
    for &label in labels.iter() { counts[label] += 1 }

    for empty in 0..k {
        if counts[empty] > 0 { continue }

        let mut farthest: Option<(usize, f64)> = None;
        for (i, &label) in labels.iter().enumerate() {
            if counts[label] < 2 { continue }
            let d = squared_distance(&points[i], &centers[label]);
            if farthest.is_none_or(|(_, best)| d > best) { farthest = Some((i, d)) }
        }

        // n >= k guarantees a donor whenever a cluster is empty.
        if let Some((i, _)) = farthest {
            counts[labels[i]] -= 1;
            labels[i] = empty;
            counts[empty] += 1;
        }
    }
}

#[inline]
fn nearest_center(point: &Coord<f64>, centers: &[Coord<f64>]) -> usize {
    let mut best = (0, f64::INFINITY);
    for (i, center) in centers.iter().enumerate() {
        let d = squared_distance(point, center);
        if d < best.1 { best = (i, d) }
    }
    best.0
}

#[inline]
fn squared_distance(a: &Coord<f64>, b: &Coord<f64>) -> f64 {
    (a.x - b.x).powi(2) + (a.y - b.y).powi(2)
}

fn mean_variance(points: &[Coord<f64>]) -> f64 {
    let n = points.len() as f64;
    let mean = points.iter().fold(Coord { x: 0.0, y: 0.0 }, |acc, &p| acc + p) / n;
    let (vx, vy) = points.iter()
        .fold((0.0, 0.0), |(vx, vy), p| (vx + (p.x - mean.x).powi(2), vy + (p.y - mean.y).powi(2)));
    (vx / n + vy / n) / 2.0
}
