//! Image file decoding into the RGBA buffer the analyzer consumes
//!
//! The analyzer itself works on an in-memory buffer supplied by the host
//! (camera capture, upload widget). This loader covers the file-based entry
//! point and the CLI demo.
//!
//! ## Supported Formats
//!
//! Via the `image` crate: JPEG, PNG, GIF (first frame), WebP, TIFF, BMP.
//! Format detection uses the file contents, falling back to the extension.

use image::ImageReader;
use std::path::Path;

use crate::error::{AnalysisError, Result};

/// A decoded image as tightly packed RGBA8 rows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Load an image from disk and convert it to RGBA8
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` if:
/// - File cannot be opened
/// - Format is not recognized
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use reagent_colorscan::image_loader::load_rgba;
/// use std::path::Path;
///
/// let image = load_rgba(Path::new("reaction.jpg"))?;
/// println!("Loaded image: {}x{}", image.width, image.height);
/// # Ok::<(), reagent_colorscan::AnalysisError>(())
/// ```
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let reader = ImageReader::open(path)
        .map_err(|e| AnalysisError::image_load(format!("cannot open {}", path.display()), e))?
        .with_guessed_format()
        .map_err(|e| AnalysisError::image_load(format!("cannot read {}", path.display()), e))?;

    if reader.format().is_none() {
        return Err(AnalysisError::ImageLoadError {
            message: format!("unrecognized image format: {}", path.display()),
            source: None,
        });
    }

    let decoded = reader
        .decode()
        .map_err(|e| AnalysisError::image_load(format!("cannot decode {}", path.display()), e))?;

    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    tracing::debug!(path = %path.display(), width, height, "Decoded image");

    Ok(RgbaImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

/// Decode an in-memory encoded image (e.g. an upload body) to RGBA8
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| AnalysisError::image_load("cannot decode image bytes", e))?;
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(RgbaImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}
