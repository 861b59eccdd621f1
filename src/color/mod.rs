//! Color clustering, conversion and naming module
//!
//! This module groups sampled pixels into dominant colors, converts
//! centroids into the reported color spaces and names them.

pub mod clustering;
pub mod conversion;
pub mod naming;

pub use clustering::{ColorCluster, ColorClusterer, RandomProvider};
pub use conversion::{ColorConverter, HslColor, LabColor, RgbColor};
pub use naming::ColorNamer;
