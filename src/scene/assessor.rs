//! Lighting and image quality classification
//!
//! Both classifications read the same sample set as the clusterer. The
//! lighting bands are not contiguous: brightness in [dim, normal_min] or
//! [normal_max, bright] is reported as mixed.

use serde::{Deserialize, Serialize};

use crate::config::SceneConfig;
use crate::sampling::PixelSample;

/// Overall scene brightness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightingCondition {
    Bright,
    Normal,
    Dim,
    Mixed,
}

/// Capture quality from resolution and color spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// Scene classifier driven by a [`SceneConfig`]
#[derive(Debug, Clone, Default)]
pub struct SceneAssessor {
    config: SceneConfig,
}

impl SceneAssessor {
    pub fn new(config: SceneConfig) -> Self {
        Self { config }
    }

    /// Classify mean per-pixel brightness `(r + g + b) / 3`
    ///
    /// An empty sample set has no defined brightness and is reported as mixed.
    pub fn lighting_condition(&self, samples: &[PixelSample]) -> LightingCondition {
        match average_brightness(samples) {
            Some(brightness) => self.classify_brightness(brightness),
            None => LightingCondition::Mixed,
        }
    }

    /// Band a brightness value; checks run bright, dim, normal, then fall through
    pub fn classify_brightness(&self, brightness: f64) -> LightingCondition {
        let c = &self.config;
        if brightness > c.bright_above {
            LightingCondition::Bright
        } else if brightness < c.dim_below {
            LightingCondition::Dim
        } else if brightness > c.normal_min && brightness < c.normal_max {
            LightingCondition::Normal
        } else {
            LightingCondition::Mixed
        }
    }

    /// Classify from image resolution and the samples' RGB variance
    pub fn image_quality(&self, samples: &[PixelSample], width: u32, height: u32) -> ImageQuality {
        let resolution = width as u64 * height as u64;
        self.classify_quality(resolution, rgb_variance(samples))
    }

    /// First tier whose resolution and variance are both exceeded wins
    pub fn classify_quality(&self, resolution: u64, variance: f64) -> ImageQuality {
        let c = &self.config;
        let tiers = [
            (c.excellent, ImageQuality::Excellent),
            (c.good, ImageQuality::Good),
            (c.fair, ImageQuality::Fair),
        ];
        tiers
            .iter()
            .find(|(tier, _)| {
                resolution > tier.min_resolution_exclusive && variance > tier.min_variance_exclusive
            })
            .map(|(_, quality)| *quality)
            .unwrap_or(ImageQuality::Poor)
    }
}

/// Mean of `(r + g + b) / 3` over the samples
pub fn average_brightness(samples: &[PixelSample]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let total: f64 = samples.iter().map(|s| s.channel_sum() as f64 / 3.0).sum();
    Some(total / samples.len() as f64)
}

/// Sum of the per-channel population variances of R, G and B
///
/// Zero for an empty sample set.
pub fn rgb_variance(samples: &[PixelSample]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let n = samples.len() as f64;
    let channel_variance = |channel: fn(&PixelSample) -> u8| {
        let mean = samples.iter().map(|s| channel(s) as f64).sum::<f64>() / n;
        samples
            .iter()
            .map(|s| {
                let d = channel(s) as f64 - mean;
                d * d
            })
            .sum::<f64>()
            / n
    };
    channel_variance(|s| s.r) + channel_variance(|s| s.g) + channel_variance(|s| s.b)
}
