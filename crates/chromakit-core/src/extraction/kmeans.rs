//! Dominant-color extraction by k-means clustering in RGB space.
//!
//! # Algorithm
//! 1. Seed with k-means++: the first centroid is a uniform sample, each
//!    later one is drawn with probability ∝ squared distance to the nearest
//!    centroid chosen so far.
//! 2. Assign every sample to its nearest centroid (squared Euclidean).
//! 3. Move each centroid to the mean of its members. An empty cluster is
//!    re-seeded at the sample farthest from its own centroid, each sample
//!    being used at most once per pass.
//! 4. Repeat 2–3 until the largest centroid shift drops below the
//!    convergence threshold, or the iteration cap is hit.
//! 5. Round centroids, merge those that round to the same color and sort by
//!    weight, heaviest first.
//!
//! When the input holds fewer distinct colors than requested the run
//! clusters into that many groups and the result is partial.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{ColorError, Result};

/// Ceiling on [`KMeansConfig::max_iterations`].
pub const MAX_KMEANS_ITERATIONS: u32 = 100;

/// Refinement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansConfig {
    /// Upper bound on assign/update passes.
    pub max_iterations: u32,
    /// Stop once no centroid moves further than this (RGB units).
    pub convergence_threshold: f64,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            max_iterations: 16,
            convergence_threshold: 0.5,
        }
    }
}

impl KMeansConfig {
    /// Iterations capped at [`MAX_KMEANS_ITERATIONS`]; a negative or NaN
    /// threshold becomes 0.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        Self {
            max_iterations: self.max_iterations.min(MAX_KMEANS_ITERATIONS),
            convergence_threshold: self.convergence_threshold.max(0.0),
        }
    }
}

/// Snapshot emitted after every refinement pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KMeansStep {
    /// 1-based pass number.
    pub iteration: u32,
    /// Largest centroid movement during this pass.
    pub max_shift: f64,
    /// Centroids after this pass, rounded.
    pub centroids: Vec<Color>,
}

/// One color of an [`Extraction`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DominantColor {
    pub color: Color,
    /// Number of samples in the cluster.
    pub weight: usize,
    /// `weight` as a fraction of all samples.
    pub share: f64,
}

/// Result of a finished k-means run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Heaviest first.
    pub colors: Vec<DominantColor>,
    pub iterations: u32,
    pub converged: bool,
    pub requested: usize,
    /// Distinct colors present in the input.
    pub distinct: usize,
}

impl Extraction {
    /// Fewer colors came back than were requested.
    pub fn is_partial(&self) -> bool {
        self.colors.len() < self.requested
    }

    /// Strict form: fail instead of returning a partial result.
    ///
    /// # Errors
    /// [`ColorError::InsufficientData`] carrying the number of colors
    /// actually returned, when the extraction is partial.
    pub fn require_complete(self) -> Result<Self> {
        if self.is_partial() {
            Err(ColorError::InsufficientData {
                distinct: self.colors.len(),
                requested: self.requested,
            })
        } else {
            Ok(self)
        }
    }

    pub fn palette(&self) -> Vec<Color> {
        self.colors.iter().map(|d| d.color).collect()
    }
}

#[derive(Debug, Clone)]
struct Cluster {
    centroid: [f64; 3],
    weight: usize,
    members: Vec<usize>,
}

/// A k-means run, advanced one refinement pass per [`Iterator::next`].
///
/// The iterator ends on convergence or at the iteration cap; call
/// [`KMeans::finish`] at any point to collect the current clustering.
#[derive(Debug, Clone)]
pub struct KMeans {
    samples: Vec<[f64; 3]>,
    clusters: Vec<Cluster>,
    config: KMeansConfig,
    requested: usize,
    distinct: usize,
    iteration: u32,
    converged: bool,
}

impl KMeans {
    /// Seed a run over `pixels` with `k` clusters. `config` is
    /// [`sanitized`](KMeansConfig::sanitized) first.
    ///
    /// # Errors
    /// [`ColorError::InvalidArgument`] when `k == 0`.
    pub fn new<R: Rng + ?Sized>(
        pixels: &[Color],
        k: usize,
        config: KMeansConfig,
        rng: &mut R,
    ) -> Result<Self> {
        if k == 0 {
            return Err(ColorError::InvalidArgument(
                "cluster count must be at least 1".into(),
            ));
        }

        let distinct = pixels.iter().collect::<HashSet<_>>().len();
        let effective = k.min(distinct);
        if effective < k {
            tracing::warn!(
                "only {} distinct colors for {} clusters, extracting {}",
                distinct,
                k,
                effective
            );
        }

        let samples: Vec<[f64; 3]> = pixels
            .iter()
            .map(|c| [f64::from(c.r), f64::from(c.g), f64::from(c.b)])
            .collect();
        let clusters = seed_plus_plus(&samples, effective, rng)
            .into_iter()
            .map(|centroid| Cluster {
                centroid,
                weight: 0,
                members: Vec::new(),
            })
            .collect();

        Ok(Self {
            converged: samples.is_empty(),
            samples,
            clusters,
            config: config.sanitized(),
            requested: k,
            distinct,
            iteration: 0,
        })
    }

    pub fn iterations(&self) -> u32 {
        self.iteration
    }

    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Number of clusters actually in play.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    pub fn centroids(&self) -> Vec<Color> {
        self.clusters.iter().map(|c| round_color(c.centroid)).collect()
    }

    /// Assign samples to the current centroids and build the result.
    pub fn finish(mut self) -> Extraction {
        self.assign();

        let mut merged: Vec<(Color, usize)> = Vec::with_capacity(self.clusters.len());
        for cluster in self.clusters.iter().filter(|c| c.weight > 0) {
            let color = round_color(cluster.centroid);
            match merged.iter_mut().find(|(c, _)| *c == color) {
                Some((_, weight)) => *weight += cluster.weight,
                None => merged.push((color, cluster.weight)),
            }
        }
        merged.sort_by(|a, b| b.1.cmp(&a.1));

        let total = self.samples.len().max(1) as f64;
        let colors = merged
            .into_iter()
            .map(|(color, weight)| DominantColor {
                color,
                weight,
                share: weight as f64 / total,
            })
            .collect();

        Extraction {
            colors,
            iterations: self.iteration,
            converged: self.converged,
            requested: self.requested,
            distinct: self.distinct,
        }
    }

    /// Returns, per sample, the squared distance to its assigned centroid.
    fn assign(&mut self) -> Vec<f64> {
        for cluster in &mut self.clusters {
            cluster.members.clear();
        }
        let mut distances = Vec::with_capacity(self.samples.len());
        for (i, sample) in self.samples.iter().enumerate() {
            let mut best = 0;
            let mut best_d = f64::INFINITY;
            for (j, cluster) in self.clusters.iter().enumerate() {
                let d = distance_squared(sample, &cluster.centroid);
                if d < best_d {
                    best = j;
                    best_d = d;
                }
            }
            if let Some(cluster) = self.clusters.get_mut(best) {
                cluster.members.push(i);
            }
            distances.push(best_d);
        }
        for cluster in &mut self.clusters {
            cluster.weight = cluster.members.len();
        }
        distances
    }

    /// Move centroids to their member means; returns the largest shift.
    fn update(&mut self, distances: &[f64]) -> f64 {
        let mut used = vec![false; self.samples.len()];
        let mut max_shift = 0.0_f64;

        for cluster in &mut self.clusters {
            let next = if cluster.members.is_empty() {
                let farthest = distances
                    .iter()
                    .enumerate()
                    .filter(|&(i, &d)| !used[i] && d > 0.0)
                    .max_by(|a, b| a.1.total_cmp(b.1))
                    .map(|(i, _)| i);
                match farthest {
                    Some(i) => {
                        used[i] = true;
                        tracing::trace!("re-seeding empty cluster at sample {}", i);
                        self.samples[i]
                    }
                    None => cluster.centroid,
                }
            } else {
                let n = cluster.members.len() as f64;
                let mut sum = [0.0_f64; 3];
                for &m in &cluster.members {
                    for (acc, v) in sum.iter_mut().zip(self.samples[m]) {
                        *acc += v;
                    }
                }
                sum.map(|s| s / n)
            };
            max_shift = max_shift.max(distance_squared(&cluster.centroid, &next).sqrt());
            cluster.centroid = next;
        }
        max_shift
    }
}

impl Iterator for KMeans {
    type Item = KMeansStep;

    fn next(&mut self) -> Option<KMeansStep> {
        if self.converged || self.iteration >= self.config.max_iterations {
            return None;
        }

        let distances = self.assign();
        let max_shift = self.update(&distances);
        self.iteration += 1;
        self.converged = max_shift < self.config.convergence_threshold;

        tracing::trace!(
            "k-means pass {}: max shift {:.3}",
            self.iteration,
            max_shift
        );
        Some(KMeansStep {
            iteration: self.iteration,
            max_shift,
            centroids: self.centroids(),
        })
    }
}

/// Extract up to `k` dominant colors using the thread RNG.
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `k == 0`.
pub fn extract(pixels: &[Color], k: usize) -> Result<Extraction> {
    extract_with(pixels, k, &KMeansConfig::default(), &mut rand::thread_rng())
}

/// Extract up to `k` dominant colors with explicit settings and RNG.
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `k == 0`.
pub fn extract_with<R: Rng + ?Sized>(
    pixels: &[Color],
    k: usize,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<Extraction> {
    let mut run = start(pixels, k, config, rng)?;
    for _ in run.by_ref() {}
    Ok(finish(run))
}

/// Like [`extract_with`], polling `is_cancelled` before every pass.
///
/// Returns `Ok(None)` when the run was cancelled.
///
/// # Errors
/// [`ColorError::InvalidArgument`] when `k == 0`.
pub fn extract_cancellable<R, F>(
    pixels: &[Color],
    k: usize,
    config: &KMeansConfig,
    rng: &mut R,
    is_cancelled: F,
) -> Result<Option<Extraction>>
where
    R: Rng + ?Sized,
    F: Fn() -> bool,
{
    let mut run = start(pixels, k, config, rng)?;
    loop {
        if is_cancelled() {
            tracing::debug!("extraction cancelled after {} passes", run.iterations());
            return Ok(None);
        }
        if run.next().is_none() {
            break;
        }
    }
    Ok(Some(finish(run)))
}

fn start<R: Rng + ?Sized>(
    pixels: &[Color],
    k: usize,
    config: &KMeansConfig,
    rng: &mut R,
) -> Result<KMeans> {
    let run = KMeans::new(pixels, k, config.clone(), rng)?;
    tracing::debug!(
        "extracting {} colors from {} samples",
        run.cluster_count(),
        pixels.len()
    );
    Ok(run)
}

fn finish(run: KMeans) -> Extraction {
    let extraction = run.finish();
    tracing::debug!(
        "extraction finished: {} colors, {} passes, converged {}",
        extraction.colors.len(),
        extraction.iterations,
        extraction.converged
    );
    extraction
}

fn seed_plus_plus<R: Rng + ?Sized>(samples: &[[f64; 3]], k: usize, rng: &mut R) -> Vec<[f64; 3]> {
    let mut centroids = Vec::with_capacity(k);
    if samples.is_empty() || k == 0 {
        return centroids;
    }

    let first = samples[rng.gen_range(0..samples.len())];
    centroids.push(first);
    let mut nearest: Vec<f64> = samples.iter().map(|s| distance_squared(s, &first)).collect();

    while centroids.len() < k {
        let total: f64 = nearest.iter().sum();
        if total <= 0.0 {
            break;
        }
        let target = rng.r#gen::<f64>() * total;
        let mut acc = 0.0;
        let mut pick = None;
        for (i, &d) in nearest.iter().enumerate() {
            if d <= 0.0 {
                continue;
            }
            acc += d;
            pick = Some(i);
            if acc > target {
                break;
            }
        }
        let Some(i) = pick else { break };

        let chosen = samples[i];
        centroids.push(chosen);
        for (d, s) in nearest.iter_mut().zip(samples) {
            *d = d.min(distance_squared(s, &chosen));
        }
    }
    centroids
}

fn distance_squared(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn round_color(c: [f64; 3]) -> Color {
    let [r, g, b] = c.map(|v| v.round().clamp(0.0, 255.0) as u8);
    Color::new(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const EPSILON: f64 = 1e-12;

    fn solid(color: Color, n: usize) -> Vec<Color> {
        vec![color; n]
    }

    fn two_blobs() -> Vec<Color> {
        let mut pixels = solid(Color::new(250, 10, 10), 60);
        pixels.extend(solid(Color::new(10, 10, 250), 40));
        pixels
    }

    #[test]
    fn test_zero_clusters_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let result = extract_with(&two_blobs(), 0, &KMeansConfig::default(), &mut rng);
        assert!(matches!(result, Err(ColorError::InvalidArgument(_))));
    }

    #[test]
    fn test_solid_image_yields_one_color() {
        let base = Color::from_hex("#3366cc").unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let ex = extract_with(&solid(base, 500), 5, &KMeansConfig::default(), &mut rng).unwrap();
        assert_eq!(ex.palette(), vec![base]);
        assert_eq!(ex.colors[0].weight, 500);
        assert!((ex.colors[0].share - 1.0).abs() < EPSILON);
        assert!(ex.is_partial());
        assert_eq!(
            ex.require_complete(),
            Err(ColorError::InsufficientData {
                distinct: 1,
                requested: 5
            })
        );
    }

    #[test]
    fn test_two_blobs_sorted_by_weight() {
        let mut rng = StdRng::seed_from_u64(3);
        let ex = extract_with(&two_blobs(), 2, &KMeansConfig::default(), &mut rng).unwrap();
        assert_eq!(
            ex.palette(),
            vec![Color::new(250, 10, 10), Color::new(10, 10, 250)]
        );
        assert_eq!(ex.colors[0].weight, 60);
        assert!((ex.colors[1].share - 0.4).abs() < EPSILON);
        assert!(ex.converged);
        assert_eq!(ex.iterations, 1);
        assert!(ex.clone().require_complete().is_ok());
    }

    #[test]
    fn test_empty_input_is_partial() {
        let mut rng = StdRng::seed_from_u64(3);
        let ex = extract_with(&[], 4, &KMeansConfig::default(), &mut rng).unwrap();
        assert!(ex.colors.is_empty());
        assert!(ex.is_partial());
    }

    #[test]
    fn test_iteration_cap() {
        let gradient: Vec<Color> = (0..=255).map(|v| Color::new(v, 255 - v, v / 2)).collect();
        let config = KMeansConfig {
            max_iterations: 2,
            convergence_threshold: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(11);
        let mut run = KMeans::new(&gradient, 6, config, &mut rng).unwrap();
        let steps: Vec<KMeansStep> = run.by_ref().collect();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[1].iteration, 2);
        assert_eq!(steps[1].centroids.len(), 6);
        let ex = run.finish();
        assert_eq!(ex.iterations, 2);
        assert!(!ex.converged);
        assert_eq!(ex.colors.iter().map(|d| d.weight).sum::<usize>(), 256);
        for pair in ex.colors.windows(2) {
            assert!(pair[0].weight >= pair[1].weight);
        }
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let gradient: Vec<Color> = (0..200).map(|v| Color::new(v, 40, 200 - v)).collect();
        let config = KMeansConfig::default();
        let a = extract_with(&gradient, 4, &config, &mut StdRng::seed_from_u64(5)).unwrap();
        let b = extract_with(&gradient, 4, &config, &mut StdRng::seed_from_u64(5)).unwrap();
        assert_eq!(a, b);
        assert!(!a.colors.is_empty() && a.colors.len() <= 4);
    }

    #[test]
    fn test_cancellation() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = KMeansConfig::default();
        let cancelled = extract_cancellable(&two_blobs(), 2, &config, &mut rng, || true).unwrap();
        assert!(cancelled.is_none());
        let finished = extract_cancellable(&two_blobs(), 2, &config, &mut rng, || false).unwrap();
        assert!(finished.is_some());
    }

    #[test]
    fn test_config_is_sanitized() {
        let hostile = KMeansConfig {
            max_iterations: u32::MAX,
            convergence_threshold: -1.0,
        };
        let clean = hostile.sanitized();
        assert_eq!(clean.max_iterations, MAX_KMEANS_ITERATIONS);
        assert_eq!(clean.convergence_threshold, 0.0);
        assert_eq!(
            KMeansConfig {
                max_iterations: 4,
                convergence_threshold: f64::NAN,
            }
            .sanitized()
            .convergence_threshold,
            0.0
        );

        let gradient: Vec<Color> = (0..=255).map(|v| Color::new(v, 255 - v, v / 2)).collect();
        let mut rng = StdRng::seed_from_u64(4);
        let ex = extract_with(&gradient, 6, &hostile, &mut rng).unwrap();
        assert!(ex.iterations <= MAX_KMEANS_ITERATIONS);
    }

    #[test]
    fn test_merged_centroids_report_returned_count() {
        let ex = Extraction {
            colors: vec![
                DominantColor {
                    color: Color::BLACK,
                    weight: 8,
                    share: 0.8,
                },
                DominantColor {
                    color: Color::WHITE,
                    weight: 2,
                    share: 0.2,
                },
            ],
            iterations: 3,
            converged: true,
            requested: 5,
            distinct: 12,
        };
        assert_eq!(
            ex.require_complete(),
            Err(ColorError::InsufficientData {
                distinct: 2,
                requested: 5
            })
        );
    }

    fn cluster_at(centroid: [f64; 3]) -> Cluster {
        Cluster {
            centroid,
            weight: 0,
            members: Vec::new(),
        }
    }

    #[test]
    fn test_empty_clusters_reseed_at_farthest_samples() {
        let mut run = KMeans {
            samples: vec![[0.0, 0.0, 0.0], [10.0, 0.0, 0.0], [200.0, 0.0, 0.0]],
            clusters: vec![
                cluster_at([0.0, 0.0, 0.0]),
                cluster_at([255.0, 255.0, 255.0]),
                cluster_at([0.0, 255.0, 255.0]),
            ],
            config: KMeansConfig::default(),
            requested: 3,
            distinct: 3,
            iteration: 0,
            converged: false,
        };

        let distances = run.assign();
        assert_eq!(run.clusters[0].weight, 3);
        assert_eq!(run.clusters[1].weight, 0);
        assert_eq!(run.clusters[2].weight, 0);

        let shift = run.update(&distances);
        assert_eq!(run.clusters[0].centroid, [70.0, 0.0, 0.0]);
        // Farthest sample goes to the first empty cluster, the next one to
        // the second; no sample is used twice.
        assert_eq!(run.clusters[1].centroid, [200.0, 0.0, 0.0]);
        assert_eq!(run.clusters[2].centroid, [10.0, 0.0, 0.0]);
        assert!(shift > 0.0);

        // Both low samples now sit closer to the re-seeded cluster, so the
        // mean-centred one ends empty and is dropped.
        let ex = run.finish();
        assert_eq!(
            ex.palette(),
            vec![Color::new(10, 0, 0), Color::new(200, 0, 0)]
        );
        assert_eq!(ex.colors[0].weight, 2);
    }

    #[test]
    fn test_empty_cluster_stays_when_nothing_is_farther() {
        let mut run = KMeans {
            samples: vec![[5.0, 5.0, 5.0]; 4],
            clusters: vec![cluster_at([5.0, 5.0, 5.0]), cluster_at([90.0, 90.0, 90.0])],
            config: KMeansConfig::default(),
            requested: 2,
            distinct: 1,
            iteration: 0,
            converged: false,
        };
        let distances = run.assign();
        let shift = run.update(&distances);
        assert_eq!(run.clusters[1].centroid, [90.0, 90.0, 90.0]);
        assert_eq!(shift, 0.0);
    }

    #[test]
    fn test_seeds_are_distinct() {
        let samples = [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [9.0, 9.0, 9.0], [200.0, 0.0, 0.0]];
        let mut rng = StdRng::seed_from_u64(2);
        let mut seeds = seed_plus_plus(&samples, 3, &mut rng);
        seeds.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
        assert_eq!(seeds, vec![[0.0, 0.0, 0.0], [9.0, 9.0, 9.0], [200.0, 0.0, 0.0]]);
    }
}
