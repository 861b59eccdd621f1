//! Nearest-name lookup against a small fixed palette
//!
//! Names feed both the result display and the chemical matcher, which
//! searches for them in each signature's color range text.

use super::conversion::RgbColor;

/// Reference palette used for naming cluster colors
pub const NAMED_COLORS: [(&str, RgbColor); 23] = [
    ("Red", RgbColor::new(255, 0, 0)),
    ("Dark Red", RgbColor::new(139, 0, 0)),
    ("Maroon", RgbColor::new(128, 0, 0)),
    ("Orange", RgbColor::new(255, 165, 0)),
    ("Yellow", RgbColor::new(255, 255, 0)),
    ("Olive", RgbColor::new(128, 128, 0)),
    ("Lime", RgbColor::new(0, 255, 0)),
    ("Green", RgbColor::new(0, 128, 0)),
    ("Dark Green", RgbColor::new(0, 100, 0)),
    ("Teal", RgbColor::new(0, 128, 128)),
    ("Cyan", RgbColor::new(0, 255, 255)),
    ("Blue", RgbColor::new(0, 0, 255)),
    ("Navy", RgbColor::new(0, 0, 128)),
    ("Indigo", RgbColor::new(75, 0, 130)),
    ("Purple", RgbColor::new(128, 0, 128)),
    ("Violet", RgbColor::new(238, 130, 238)),
    ("Magenta", RgbColor::new(255, 0, 255)),
    ("Pink", RgbColor::new(255, 192, 203)),
    ("Brown", RgbColor::new(165, 42, 42)),
    ("Tan", RgbColor::new(210, 180, 140)),
    ("Gray", RgbColor::new(128, 128, 128)),
    ("Black", RgbColor::new(0, 0, 0)),
    ("White", RgbColor::new(255, 255, 255)),
];

/// Maps colors to the nearest entry of a name palette
#[derive(Debug, Clone)]
pub struct ColorNamer {
    palette: Vec<(String, RgbColor)>,
}

impl Default for ColorNamer {
    fn default() -> Self {
        Self::with_palette(
            NAMED_COLORS
                .iter()
                .map(|(name, rgb)| (name.to_string(), *rgb)),
        )
    }
}

impl ColorNamer {
    /// Build a namer from `(name, color)` pairs; earlier entries win ties
    pub fn with_palette(palette: impl IntoIterator<Item = (String, RgbColor)>) -> Self {
        Self {
            palette: palette.into_iter().collect(),
        }
    }

    /// Name of the palette entry closest to `rgb` by Euclidean RGB distance
    ///
    /// Returns `"Unknown"` only for an empty palette.
    pub fn name_of(&self, rgb: RgbColor) -> &str {
        let mut best: Option<(&str, u32)> = None;
        for (name, reference) in &self.palette {
            let distance = rgb.distance_squared(reference);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((name.as_str(), distance));
            }
        }
        best.map(|(name, _)| name).unwrap_or("Unknown")
    }
}
