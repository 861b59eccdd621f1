//! Analysis pipeline
//!
//! Runs sampling, clustering, color-space enrichment, chemical matching
//! and scene assessment over one RGBA buffer and assembles the result.
//! The analyzer holds no per-call state; one instance can serve any
//! number of analyses, including concurrent ones.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use crate::color::{ColorCluster, ColorClusterer, ColorConverter, ColorNamer, RandomProvider};
use crate::config::AnalyzerConfig;
use crate::constants::sampling::BYTES_PER_PIXEL;
use crate::matching::{ChemicalMatcher, ReferenceTable};
use crate::sampling::PixelSampler;
use crate::scene::{Recommendations, SceneAssessor};
use crate::{AnalysisError, AnalysisResult, ColorData, Position, Result};

/// Configured analysis pipeline
pub struct ImageAnalyzer {
    sampler: PixelSampler,
    clusterer: ColorClusterer,
    converter: ColorConverter,
    namer: ColorNamer,
    matcher: ChemicalMatcher,
    assessor: SceneAssessor,
}

impl Default for ImageAnalyzer {
    fn default() -> Self {
        Self {
            sampler: PixelSampler::default(),
            clusterer: ColorClusterer::default(),
            converter: ColorConverter::new(),
            namer: ColorNamer::default(),
            matcher: ChemicalMatcher::new(Arc::new(ReferenceTable::standard())),
            assessor: SceneAssessor::default(),
        }
    }
}

impl ImageAnalyzer {
    /// Create an analyzer with the given configuration and the standard table
    pub fn new(config: AnalyzerConfig) -> Result<Self> {
        Self::with_reference_table(config, Arc::new(ReferenceTable::standard()))
    }

    /// Create an analyzer that matches against `table`
    pub fn with_reference_table(config: AnalyzerConfig, table: Arc<ReferenceTable>) -> Result<Self> {
        config.scene.validate()?;
        Ok(Self {
            sampler: PixelSampler::new(config.sampling)?,
            clusterer: ColorClusterer::new(config.clustering)?,
            converter: ColorConverter::new(),
            namer: ColorNamer::default(),
            matcher: ChemicalMatcher::new(table),
            assessor: SceneAssessor::new(config.scene),
        })
    }

    pub fn reference_table(&self) -> &ReferenceTable {
        self.matcher.table()
    }

    /// Analyze an RGBA buffer, seeding clusters from the thread RNG
    pub fn analyze(&self, buffer: &[u8], width: u32, height: u32) -> Result<AnalysisResult> {
        self.analyze_with_rng(buffer, width, height, &mut rand::thread_rng())
    }

    /// Analyze an RGBA buffer with an explicit random source
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError` if:
    /// - `width` or `height` is zero
    /// - `buffer.len() != width * height * 4`
    pub fn analyze_with_rng<R>(
        &self,
        buffer: &[u8],
        width: u32,
        height: u32,
        rng: &mut R,
    ) -> Result<AnalysisResult>
    where
        R: RandomProvider + ?Sized,
    {
        let started = Instant::now();
        check_shape(buffer, width, height)?;

        let samples = self.sampler.sample(buffer, width, height);
        if samples.is_empty() {
            tracing::warn!(width, height, "No pixels survived sampling");
        }

        let clusters = self.clusterer.cluster(&samples, rng);
        tracing::debug!(
            samples = samples.len(),
            clusters = clusters.len(),
            "Clustering complete"
        );

        let colors: Vec<ColorData> = clusters.iter().map(|c| self.describe(c)).collect();

        let lighting_condition = self.assessor.lighting_condition(&samples);
        let image_quality = self.assessor.image_quality(&samples, width, height);
        let recommendations =
            Recommendations::build(lighting_condition, image_quality, colors.len());

        let mut color_distribution = BTreeMap::new();
        for color in &colors {
            *color_distribution
                .entry(color.color_name.clone())
                .or_insert(0.0) += color.dominance;
        }

        let processing_time = started.elapsed().as_secs_f64() * 1000.0;
        tracing::info!(
            colors = colors.len(),
            lighting = ?lighting_condition,
            quality = ?image_quality,
            elapsed_ms = processing_time,
            "Analysis complete"
        );

        Ok(AnalysisResult {
            dominant_color: colors.first().cloned(),
            colors,
            color_distribution,
            lighting_condition,
            image_quality,
            recommendations: recommendations.messages,
            recommendations_localized: recommendations.messages_localized,
            processing_time,
        })
    }

    /// Enrich a cluster with color spaces, a name and chemical matches
    fn describe(&self, cluster: &ColorCluster) -> ColorData {
        let rgb = cluster.centroid;
        let hex = self.converter.rgb_to_hex(rgb);
        let chemical_matches = self.matcher.match_color(&hex, rgb);

        ColorData {
            hsl: self.converter.rgb_to_hsl(rgb),
            lab: self.converter.rgb_to_lab(rgb),
            color_name: self.namer.name_of(rgb).to_string(),
            position: Position {
                x: cluster.position.0,
                y: cluster.position.1,
            },
            confidence: cluster.confidence.clamp(0.0, 100.0),
            dominance: cluster.dominance,
            hex,
            rgb,
            chemical_matches,
        }
    }
}

/// Reject zero-sized images and buffers that are not exactly `w * h * 4` bytes
fn check_shape(buffer: &[u8], width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(AnalysisError::InvalidDimensions { width, height });
    }
    let expected = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or(AnalysisError::InvalidDimensions { width, height })?;
    if buffer.len() != expected {
        return Err(AnalysisError::BufferSizeMismatch {
            expected,
            actual: buffer.len(),
        });
    }
    Ok(())
}
