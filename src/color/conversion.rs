//! Color space conversion utilities
//!
//! Provides the conversions reported for every cluster centroid:
//! - RGB to lowercase hex and back
//! - RGB to HSL (integer degrees and percentages)
//! - RGB to CIE Lab under D65
//! - CIE76 color difference
//!
//! sRGB decoding and the RGB→XYZ matrix come from `palette`; the XYZ→Lab
//! step is computed against the converter's white point.

use palette::{FromColor, Hsl, Srgb, Xyz};
use serde::{Deserialize, Serialize};

use crate::constants::{d65, D65_WHITE_POINT_XYZ};
use crate::{AnalysisError, Result};

/// 8-bit sRGB triple
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RgbColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl RgbColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Squared Euclidean distance in RGB
    pub fn distance_squared(&self, other: &RgbColor) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }

    fn to_srgb(self) -> Srgb {
        Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        )
    }
}

/// HSL with hue in degrees [0, 360) and saturation/lightness in percent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HslColor {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

/// CIE L*a*b* coordinates (D65)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LabColor {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

/// Color converter with a fixed reference white
pub struct ColorConverter {
    white_point: [f32; 3],
}

impl Default for ColorConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConverter {
    /// Create a new color converter with D65 as reference white
    pub fn new() -> Self {
        Self {
            white_point: D65_WHITE_POINT_XYZ,
        }
    }

    /// Convert RGB to a lowercase `#rrggbb` string
    pub fn rgb_to_hex(&self, rgb: RgbColor) -> String {
        format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
    }

    /// Parse hexadecimal color string to RGB
    ///
    /// Accepts `#rrggbb` or `rrggbb` in either case.
    ///
    /// # Errors
    ///
    /// Returns error if hex string is invalid
    pub fn hex_to_rgb(&self, hex: &str) -> Result<RgbColor> {
        let digits = hex.trim_start_matches('#');
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(AnalysisError::ColorConversionError {
                message: format!("Invalid hex color {:?}: expected 6 hex digits", hex),
            });
        }

        let channel = |range: std::ops::Range<usize>, name: &str| {
            u8::from_str_radix(&digits[range], 16).map_err(|e| AnalysisError::ColorConversionError {
                message: format!("Invalid {} value in {:?}: {}", name, hex, e),
            })
        };

        Ok(RgbColor::new(
            channel(0..2, "red")?,
            channel(2..4, "green")?,
            channel(4..6, "blue")?,
        ))
    }

    /// Convert RGB to HSL, rounded to integers
    pub fn rgb_to_hsl(&self, rgb: RgbColor) -> HslColor {
        let hsl: Hsl = Hsl::from_color(rgb.to_srgb());

        let hue = hsl.hue.into_positive_degrees().round() as u16 % 360;
        HslColor {
            h: hue,
            s: (hsl.saturation * 100.0).round().clamp(0.0, 100.0) as u8,
            l: (hsl.lightness * 100.0).round().clamp(0.0, 100.0) as u8,
        }
    }

    /// Convert RGB (0-255) to Lab color space
    ///
    /// sRGB is linearized with the standard 0.04045 breakpoint, mapped to
    /// XYZ, normalized by the white point and passed through the Lab
    /// transfer function (cube root above 0.008856, linear below).
    pub fn rgb_to_lab(&self, rgb: RgbColor) -> LabColor {
        let xyz: Xyz = Xyz::from_color(rgb.to_srgb());

        let fx = lab_transfer(xyz.x / self.white_point[0]);
        let fy = lab_transfer(xyz.y / self.white_point[1]);
        let fz = lab_transfer(xyz.z / self.white_point[2]);

        LabColor {
            l: 116.0 * fy - 16.0,
            a: 500.0 * (fx - fy),
            b: 200.0 * (fy - fz),
        }
    }

    /// Compute Delta E (color difference) between two Lab colors
    ///
    /// Uses simple Euclidean distance (ΔE76)
    pub fn color_difference(&self, lab1: LabColor, lab2: LabColor) -> f32 {
        let dl = lab1.l - lab2.l;
        let da = lab1.a - lab2.a;
        let db = lab1.b - lab2.b;
        (dl * dl + da * da + db * db).sqrt()
    }
}

fn lab_transfer(t: f32) -> f32 {
    if t > d65::LAB_EPSILON {
        t.cbrt()
    } else {
        d65::LAB_LINEAR_SLOPE * t + 16.0 / 116.0
    }
}
