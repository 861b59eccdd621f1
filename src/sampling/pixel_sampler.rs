//! Adaptive-stride pixel sampling with noise rejection
//!
//! The stride grows with image size so clustering cost stays bounded on
//! large photographs while small images keep their sample density.

use serde::{Deserialize, Serialize};

use crate::config::SamplingConfig;
use crate::constants::sampling::BYTES_PER_PIXEL;
use crate::error::Result;

/// One accepted pixel with its location in the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelSample {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub x: u32,
    pub y: u32,
}

impl PixelSample {
    /// Sum of the three color channels
    pub fn channel_sum(&self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

/// Pixel sampler driven by a [`SamplingConfig`]
#[derive(Debug, Clone)]
pub struct PixelSampler {
    config: SamplingConfig,
}

impl Default for PixelSampler {
    fn default() -> Self {
        Self {
            config: SamplingConfig::default(),
        }
    }
}

impl PixelSampler {
    /// Create a sampler with the given thresholds
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidParameter` for a zero stride, inverted
    /// channel-sum bounds or unordered stride tiers.
    pub fn new(config: SamplingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Stride for an image with `total_pixels` pixels
    pub fn sample_rate(&self, total_pixels: u64) -> usize {
        self.config
            .stride_tiers
            .iter()
            .find(|tier| total_pixels > tier.min_pixels_exclusive)
            .map(|tier| tier.stride)
            .unwrap_or(self.config.default_stride)
    }

    /// Whether a pixel survives noise rejection
    pub fn accepts(&self, r: u8, g: u8, b: u8, a: u8) -> bool {
        if a < self.config.min_alpha {
            return false;
        }
        let sum = r as u32 + g as u32 + b as u32;
        sum >= self.config.min_channel_sum && sum <= self.config.max_channel_sum
    }

    /// Walk the buffer and collect accepted pixels
    ///
    /// The buffer shape is checked by the caller; a trailing partial pixel
    /// is ignored. An image where every pixel is rejected yields an empty list.
    pub fn sample(&self, buffer: &[u8], width: u32, height: u32) -> Vec<PixelSample> {
        let total_pixels = width as u64 * height as u64;
        let stride = self.sample_rate(total_pixels);
        let step = BYTES_PER_PIXEL * stride;

        let mut samples = Vec::with_capacity(buffer.len() / step + 1);
        for offset in (0..buffer.len()).step_by(step) {
            let Some(px) = buffer.get(offset..offset + BYTES_PER_PIXEL) else {
                break;
            };
            let (r, g, b, a) = (px[0], px[1], px[2], px[3]);
            if !self.accepts(r, g, b, a) {
                continue;
            }

            let index = (offset / BYTES_PER_PIXEL) as u64;
            samples.push(PixelSample {
                r,
                g,
                b,
                x: (index % width as u64) as u32,
                y: (index / width as u64) as u32,
            });
        }

        tracing::debug!(
            total_pixels,
            stride,
            accepted = samples.len(),
            "Sampled pixels"
        );
        samples
    }
}
