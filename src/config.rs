//! Configuration structures for the reagent_colorscan analysis pipeline.
//!
//! This module defines the tunable parameters for color analysis,
//! organized into groups for sampling, clustering and scene assessment.
//! Every default mirrors the values in [`crate::constants`].
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use reagent_colorscan::AnalyzerConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalyzerConfig::from_json_file(Path::new("analyzer.json"))?;
//!
//! // Or use defaults
//! let config = AnalyzerConfig::default();
//! # Ok::<(), reagent_colorscan::AnalysisError>(())
//! ```
//!
//! Missing sections and fields fall back to their defaults, so a file only
//! needs to name what it changes.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::constants::{clustering, sampling, scene};
use crate::{AnalysisError, Result};

/// Complete analyzer configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Pixel sampling and noise rejection
    pub sampling: SamplingConfig,

    /// K-means clustering
    pub clustering: ClusteringConfig,

    /// Lighting and quality classification
    pub scene: SceneConfig,
}

/// Pixel sampling parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Minimum alpha for a pixel to be sampled
    pub min_alpha: u8,

    /// Minimum `r + g + b` (inclusive)
    pub min_channel_sum: u32,

    /// Maximum `r + g + b` (inclusive)
    pub max_channel_sum: u32,

    /// Stride tiers, largest threshold first
    pub stride_tiers: Vec<StrideTier>,

    /// Stride when no tier applies
    pub default_stride: usize,
}

/// One row of the adaptive stride table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrideTier {
    /// Tier applies when the pixel count is strictly greater than this
    pub min_pixels_exclusive: u64,

    /// Sample every `stride`-th pixel
    pub stride: usize,
}

/// K-means clustering parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusteringConfig {
    /// Number of centroids (K)
    pub cluster_count: usize,

    /// Maximum refinement rounds
    pub max_iterations: usize,

    /// Stop once total centroid displacement in a round drops below this
    pub convergence_threshold: f64,

    /// Drop clusters below this dominance percentage
    pub min_dominance: f32,

    /// Keep at most this many clusters
    pub max_colors: usize,

    /// Confidence offset (0-100 scale)
    pub base_confidence: f32,

    /// Confidence gained per dominance percent
    pub dominance_weight: f32,

    /// Confidence ceiling (0-100 scale)
    pub max_confidence: f32,
}

/// Lighting and image quality thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Mean brightness strictly above this is bright
    pub bright_above: f64,

    /// Mean brightness strictly below this is dim
    pub dim_below: f64,

    /// Open interval (min, max) classified as normal
    pub normal_min: f64,
    pub normal_max: f64,

    /// Quality tiers, evaluated excellent → good → fair
    pub excellent: QualityTier,
    pub good: QualityTier,
    pub fair: QualityTier,
}

/// Resolution and variance both have to exceed the tier's values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QualityTier {
    pub min_resolution_exclusive: u64,
    pub min_variance_exclusive: f64,
}

impl QualityTier {
    fn from_pair((resolution, variance): (u64, f64)) -> Self {
        Self {
            min_resolution_exclusive: resolution,
            min_variance_exclusive: variance,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            min_alpha: sampling::MIN_ALPHA,
            min_channel_sum: sampling::MIN_CHANNEL_SUM,
            max_channel_sum: sampling::MAX_CHANNEL_SUM,
            stride_tiers: sampling::STRIDE_TIERS
                .iter()
                .map(|&(min_pixels_exclusive, stride)| StrideTier {
                    min_pixels_exclusive,
                    stride,
                })
                .collect(),
            default_stride: sampling::DEFAULT_STRIDE,
        }
    }
}

impl Default for ClusteringConfig {
    fn default() -> Self {
        Self {
            cluster_count: clustering::CLUSTER_COUNT,
            max_iterations: clustering::MAX_ITERATIONS,
            convergence_threshold: clustering::CONVERGENCE_THRESHOLD,
            min_dominance: clustering::MIN_DOMINANCE,
            max_colors: clustering::MAX_COLORS,
            base_confidence: clustering::BASE_CONFIDENCE,
            dominance_weight: clustering::DOMINANCE_WEIGHT,
            max_confidence: clustering::MAX_CONFIDENCE,
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            bright_above: scene::BRIGHT_ABOVE,
            dim_below: scene::DIM_BELOW,
            normal_min: scene::NORMAL_MIN,
            normal_max: scene::NORMAL_MAX,
            excellent: QualityTier::from_pair(scene::EXCELLENT),
            good: QualityTier::from_pair(scene::GOOD),
            fair: QualityTier::from_pair(scene::FAIR),
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::config(format!("cannot read {}", path.display()), e))?;
        Self::from_json_str(&content)
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| AnalysisError::config("invalid analyzer configuration", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| AnalysisError::config("cannot serialize configuration", e))?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::config(format!("cannot write {}", path.display()), e))?;
        Ok(())
    }

    /// Reject parameter combinations the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        self.sampling.validate()?;
        self.clustering.validate()?;
        self.scene.validate()
    }
}

impl SamplingConfig {
    /// Reject zero strides, inverted channel bounds and unordered tiers
    pub fn validate(&self) -> Result<()> {
        if self.min_channel_sum > self.max_channel_sum {
            return Err(AnalysisError::invalid_parameter(
                "sampling.min_channel_sum",
                format!("{} > max_channel_sum {}", self.min_channel_sum, self.max_channel_sum),
            ));
        }
        if self.default_stride == 0 {
            return Err(AnalysisError::invalid_parameter("sampling.default_stride", 0));
        }
        if let Some(tier) = self.stride_tiers.iter().find(|t| t.stride == 0) {
            return Err(AnalysisError::invalid_parameter(
                "sampling.stride_tiers",
                format!("zero stride above {} pixels", tier.min_pixels_exclusive),
            ));
        }
        if self
            .stride_tiers
            .windows(2)
            .any(|w| w[0].min_pixels_exclusive <= w[1].min_pixels_exclusive)
        {
            return Err(AnalysisError::invalid_parameter(
                "sampling.stride_tiers",
                "tiers must be ordered by descending pixel threshold",
            ));
        }
        Ok(())
    }
}

impl ClusteringConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cluster_count == 0 {
            return Err(AnalysisError::invalid_parameter("clustering.cluster_count", 0));
        }
        if self.max_iterations == 0 {
            return Err(AnalysisError::invalid_parameter("clustering.max_iterations", 0));
        }
        if self.max_colors == 0 {
            return Err(AnalysisError::invalid_parameter("clustering.max_colors", 0));
        }
        if !(0.0..=100.0).contains(&self.max_confidence) {
            return Err(AnalysisError::invalid_parameter(
                "clustering.max_confidence",
                self.max_confidence,
            ));
        }
        Ok(())
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        if self.normal_min >= self.normal_max {
            return Err(AnalysisError::invalid_parameter(
                "scene.normal_min",
                format!("{} >= normal_max {}", self.normal_min, self.normal_max),
            ));
        }
        Ok(())
    }
}
