//! # Reagent Color Scan
//!
//! A Rust crate for reading presumptive reagent tests (Marquis, Mecke,
//! Simon, ...) from photographs of the reacted sample.
//!
//! This library provides heuristic color analysis by:
//! - Sampling the image with an adaptive stride and rejecting noise pixels
//! - Clustering samples into dominant colors with k-means
//! - Reporting each color in hex, RGB, HSL and CIE Lab
//! - Ranking candidate substances from a reference table of reactions
//! - Classifying lighting and capture quality with bilingual advice
//!
//! Matching is a rule table, not a trained model; results are tentative
//! and never a confirmatory identification.
//!
//! ## Example
//!
//! ```rust
//! use reagent_colorscan::analyze_image;
//!
//! // 100x100 opaque dark magenta
//! let buffer = [139u8, 0, 139, 255].repeat(100 * 100);
//! let result = analyze_image(&buffer, 100, 100)?;
//!
//! let dominant = result.dominant_color.as_ref().expect("one color");
//! assert_eq!(dominant.hex, "#8b008b");
//! println!("{} ({:.0}%)", dominant.color_name, dominant.dominance);
//! for candidate in &dominant.chemical_matches {
//!     println!("  {} / {}: {:.2}", candidate.substance, candidate.test_type, candidate.confidence);
//! }
//! # Ok::<(), reagent_colorscan::AnalysisError>(())
//! ```
//!
//! ## Confidence scales
//!
//! Two confidence values appear in a result and they are not comparable:
//! [`ColorData::confidence`] is a 0-100 badge value for the cluster, while
//! [`ChemicalMatch::confidence`] is a 0-1 ranking score for a substance.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub mod analyzer;
pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod matching;
pub mod sampling;
pub mod scene;

pub use analyzer::ImageAnalyzer;
pub use color::{HslColor, LabColor, RandomProvider, RgbColor};
pub use config::AnalyzerConfig;
pub use error::{AnalysisError, Result};
pub use matching::{ChemicalMatch, ChemicalSignature, ReferenceTable};
pub use scene::{ImageQuality, LightingCondition};

/// Average image location of a cluster's samples
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// One dominant color of the analyzed image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorData {
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub rgb: RgbColor,
    pub hsl: HslColor,
    pub lab: LabColor,
    pub position: Position,
    /// Cluster confidence, 0-100 (not the 0-1 match scale)
    pub confidence: f32,
    /// Percentage of sampled pixels in this cluster, 0-100
    pub dominance: f32,
    pub color_name: String,
    /// Best candidates first, at most three
    pub chemical_matches: Vec<ChemicalMatch>,
}

/// Complete analysis of one image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// At most six colors, most dominant first
    pub colors: Vec<ColorData>,
    /// `colors[0]`, absent when no pixel survived sampling
    pub dominant_color: Option<ColorData>,
    /// Color name → total dominance of the colors with that name
    pub color_distribution: BTreeMap<String, f32>,
    pub lighting_condition: LightingCondition,
    pub image_quality: ImageQuality,
    /// English advice
    pub recommendations: Vec<String>,
    /// Spanish advice, index-aligned with `recommendations`
    pub recommendations_localized: Vec<String>,
    /// Wall-clock analysis time in milliseconds
    pub processing_time: f64,
}

/// Analyze a decoded RGBA8 buffer with the default configuration
///
/// `buffer` must hold exactly `width * height * 4` bytes in row-major order.
///
/// # Errors
///
/// Returns `AnalysisError` if the dimensions are zero or the buffer size
/// does not match them. An image with no usable pixels is not an error:
/// the result has no colors and recommends a retake.
pub fn analyze_image(buffer: &[u8], width: u32, height: u32) -> Result<AnalysisResult> {
    ImageAnalyzer::default().analyze(buffer, width, height)
}

/// Decode an image file and analyze it with the default configuration
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` if the file cannot be read or
/// decoded, plus the errors of [`analyze_image`].
pub fn analyze_file(image_path: &Path) -> Result<AnalysisResult> {
    let image = image_loader::load_rgba(image_path)?;
    analyze_image(&image.pixels, image.width, image.height)
}
