//! Pixel sampling module
//!
//! This module walks a decoded RGBA buffer with an adaptive stride and
//! rejects pixels that carry no reaction color (transparent, shadow, glare).

pub mod pixel_sampler;

pub use pixel_sampler::{PixelSample, PixelSampler};
