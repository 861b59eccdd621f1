//! K-means clustering of sampled pixels
//!
//! Groups samples into at most K clusters on raw RGB with Euclidean
//! distance, then keeps the dominant ones:
//! - Centroids seeded by uniform sampling with replacement
//! - Up to `max_iterations` assign/update rounds
//! - Early stop once total centroid displacement falls below the threshold
//! - Clusters under `min_dominance` percent dropped, survivors sorted and truncated
//!
//! Seeding is the only source of nondeterminism. Pass a seeded RNG through
//! [`RandomProvider`] for reproducible output.

use rand::Rng;

use super::conversion::RgbColor;
use crate::config::ClusteringConfig;
use crate::error::Result;
use crate::sampling::PixelSample;

/// Source of random indices for centroid seeding
///
/// Every [`rand::Rng`] is a provider, so `rand::thread_rng()` and
/// `StdRng::seed_from_u64(..)` can be passed directly.
pub trait RandomProvider {
    /// Uniform index in `0..len`; `len` is never zero
    fn pick_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomProvider for R {
    fn pick_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// A surviving cluster, before color-space enrichment
#[derive(Debug, Clone, PartialEq)]
pub struct ColorCluster {
    /// Integer-rounded mean of the member pixels
    pub centroid: RgbColor,
    /// Average sample location of the members
    pub position: (f32, f32),
    /// Number of member samples
    pub pixel_count: usize,
    /// Percentage of all samples in this cluster (0-100)
    pub dominance: f32,
    /// Reporting confidence on the 0-100 scale
    pub confidence: f32,
}

/// K-means color clusterer
#[derive(Debug, Clone)]
pub struct ColorClusterer {
    config: ClusteringConfig,
}

impl Default for ColorClusterer {
    fn default() -> Self {
        Self {
            config: ClusteringConfig::default(),
        }
    }
}

impl ColorClusterer {
    /// Create a clusterer with the given parameters
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` for a zero cluster count,
    /// iteration limit or color limit, or a confidence cap outside 0-100.
    pub fn new(config: ClusteringConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Cluster `samples`, returning survivors sorted by dominance (descending)
    pub fn cluster<R>(&self, samples: &[PixelSample], rng: &mut R) -> Vec<ColorCluster>
    where
        R: RandomProvider + ?Sized,
    {
        if samples.is_empty() || self.config.cluster_count == 0 {
            return Vec::new();
        }

        let mut centroids: Vec<RgbColor> = (0..self.config.cluster_count)
            .map(|_| {
                let s = &samples[rng.pick_index(samples.len())];
                RgbColor::new(s.r, s.g, s.b)
            })
            .collect();

        let mut assignments = vec![0usize; samples.len()];
        for iteration in 0..self.config.max_iterations {
            for (slot, sample) in assignments.iter_mut().zip(samples) {
                *slot = nearest_centroid(&centroids, sample);
            }

            let mut displacement = 0.0;
            for (index, centroid) in centroids.iter_mut().enumerate() {
                let Some(updated) = mean_color(samples, &assignments, index) else {
                    continue;
                };
                displacement += (centroid.distance_squared(&updated) as f64).sqrt();
                *centroid = updated;
            }

            tracing::trace!(iteration, displacement, "k-means round");
            if displacement < self.config.convergence_threshold {
                tracing::debug!(iterations = iteration + 1, "k-means converged");
                break;
            }
        }

        // Members follow the last assignment pass
        let mut clusters = self.summarize(samples, &assignments, &centroids);
        clusters.sort_by(|a, b| b.dominance.total_cmp(&a.dominance));
        clusters.truncate(self.config.max_colors);
        clusters
    }

    fn summarize(
        &self,
        samples: &[PixelSample],
        assignments: &[usize],
        centroids: &[RgbColor],
    ) -> Vec<ColorCluster> {
        let total = samples.len() as f32;
        let mut clusters = Vec::new();

        for (index, centroid) in centroids.iter().enumerate() {
            let (mut count, mut sum_x, mut sum_y) = (0usize, 0f64, 0f64);
            for (sample, _) in samples
                .iter()
                .zip(assignments)
                .filter(|(_, &assigned)| assigned == index)
            {
                count += 1;
                sum_x += sample.x as f64;
                sum_y += sample.y as f64;
            }
            if count == 0 {
                continue;
            }

            let dominance = 100.0 * count as f32 / total;
            if dominance < self.config.min_dominance {
                continue;
            }

            let confidence = (self.config.base_confidence
                + dominance * self.config.dominance_weight)
                .clamp(0.0, self.config.max_confidence);

            clusters.push(ColorCluster {
                centroid: *centroid,
                position: ((sum_x / count as f64) as f32, (sum_y / count as f64) as f32),
                pixel_count: count,
                dominance,
                confidence,
            });
        }
        clusters
    }
}

/// Index of the closest centroid; ties go to the lowest index
fn nearest_centroid(centroids: &[RgbColor], sample: &PixelSample) -> usize {
    let color = RgbColor::new(sample.r, sample.g, sample.b);
    let mut best = (0, u32::MAX);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = color.distance_squared(centroid);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best.0
}

/// Rounded mean color of the samples assigned to `index`, if any
fn mean_color(samples: &[PixelSample], assignments: &[usize], index: usize) -> Option<RgbColor> {
    let (mut count, mut r, mut g, mut b) = (0u64, 0u64, 0u64, 0u64);
    for (sample, _) in samples
        .iter()
        .zip(assignments)
        .filter(|(_, &assigned)| assigned == index)
    {
        count += 1;
        r += sample.r as u64;
        g += sample.g as u64;
        b += sample.b as u64;
    }
    if count == 0 {
        return None;
    }

    let mean = |sum: u64| (sum as f64 / count as f64).round() as u8;
    Some(RgbColor::new(mean(r), mean(g), mean(b)))
}

/// Deterministic seeding for tests across the crate
#[cfg(test)]
pub(crate) mod scripted {
    use super::RandomProvider;

    /// Replays a fixed list of indices, cycling when exhausted
    pub(crate) struct ScriptedIndices {
        indices: Vec<usize>,
        cursor: usize,
    }

    impl ScriptedIndices {
        pub(crate) fn new(indices: Vec<usize>) -> Self {
            Self { indices, cursor: 0 }
        }
    }

    impl RandomProvider for ScriptedIndices {
        fn pick_index(&mut self, len: usize) -> usize {
            let index = self.indices[self.cursor % self.indices.len()] % len;
            self.cursor += 1;
            index
        }
    }
}
