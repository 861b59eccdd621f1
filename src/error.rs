//! Error types for the reagent_colorscan library

use thiserror::Error;

/// Result type alias for reagent_colorscan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Error types for color analysis operations
///
/// Degenerate images (every pixel rejected by the sampler) are not errors;
/// they produce an [`AnalysisResult`](crate::AnalysisResult) with no colors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Width or height is zero, or the pixel count overflows
    #[error("Invalid image dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// RGBA buffer length does not match `width * height * 4`
    #[error("Pixel buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },

    /// Color parsing or conversion error
    #[error("Color conversion error: {message}")]
    ColorConversionError { message: String },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chemical reference table is empty or malformed
    #[error("Reference table error: {reason}")]
    ReferenceTableError { reason: String },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an invalid parameter error
    pub fn invalid_parameter(parameter: impl Into<String>, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }

    /// Check if this error is a violated precondition on the caller's side
    /// rather than a failure of the environment (file system, decoder)
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidDimensions { .. }
                | AnalysisError::BufferSizeMismatch { .. }
                | AnalysisError::InvalidParameter { .. }
                | AnalysisError::ColorConversionError { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            AnalysisError::InvalidDimensions { width, height } => {
                format!(
                    "The image has an unusable size ({}x{}). Please capture a new photo.",
                    width, height
                )
            }
            AnalysisError::BufferSizeMismatch { .. } => {
                "The image data is incomplete. Please upload the photo again.".to_string()
            }
            AnalysisError::ConfigError { .. } | AnalysisError::ReferenceTableError { .. } => {
                "The analyzer is misconfigured. Please contact the site administrator.".to_string()
            }
            _ => "Color analysis failed. Please try with a different image.".to_string(),
        }
    }
}
