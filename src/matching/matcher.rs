//! Heuristic chemical matching
//!
//! Scores every reference signature against a cluster color with an
//! ordered chain of text/channel rules, weights the score by the
//! signature's base confidence and returns the best three.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::reference::{ChemicalSignature, ReferenceTable};
use crate::color::{ColorNamer, RgbColor};
use crate::constants::matching::{
    BASELINE_SCORE, BLUE_DOMINANT_SCORE, MAX_MATCHES, NAME_MATCH_SCORE, ORANGE_ORDER_SCORE,
    PURPLE_HEX_FRAGMENTS, PURPLE_PATTERN_SCORE,
};

/// A candidate substance for one cluster color
///
/// `confidence` is on a 0-1 scale, unlike the 0-100 scale of
/// [`ColorData::confidence`](crate::ColorData).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalMatch {
    pub substance: String,
    pub substance_localized: String,
    pub test_type: String,
    pub color_range: String,
    /// Rule score × base confidence, 0-1
    pub confidence: f32,
    pub notes: String,
    pub notes_localized: String,
}

impl ChemicalMatch {
    fn from_signature(sig: &ChemicalSignature, confidence: f32) -> Self {
        Self {
            substance: sig.substance.clone(),
            substance_localized: sig.substance_localized.clone(),
            test_type: sig.test_type.clone(),
            color_range: sig.color_range.clone(),
            confidence: confidence.clamp(0.0, 1.0),
            notes: sig.notes.clone(),
            notes_localized: sig.notes_localized.clone(),
        }
    }
}

/// Matches cluster colors against a shared reference table
#[derive(Debug, Clone)]
pub struct ChemicalMatcher {
    table: Arc<ReferenceTable>,
    namer: ColorNamer,
}

impl Default for ChemicalMatcher {
    fn default() -> Self {
        Self::new(Arc::new(ReferenceTable::standard()))
    }
}

impl ChemicalMatcher {
    pub fn new(table: Arc<ReferenceTable>) -> Self {
        Self {
            table,
            namer: ColorNamer::default(),
        }
    }

    /// Use a different name palette for the name rule
    pub fn with_namer(mut self, namer: ColorNamer) -> Self {
        self.namer = namer;
        self
    }

    pub fn table(&self) -> &ReferenceTable {
        &self.table
    }

    /// Rank signatures for a cluster color, best first, at most three
    ///
    /// Signatures whose rule score stays at the baseline are filtered out.
    /// If every signature is at the baseline, the best baseline matches are
    /// returned instead so a non-empty table never yields an empty list.
    pub fn match_color(&self, hex: &str, rgb: RgbColor) -> Vec<ChemicalMatch> {
        let name = self.namer.name_of(rgb).to_lowercase();
        let hex = hex.to_lowercase();

        let scored: Vec<(&ChemicalSignature, f32)> = self
            .table
            .signatures()
            .iter()
            .map(|sig| (sig, rule_score(sig, &hex, rgb, &name)))
            .collect();

        let mut matches: Vec<ChemicalMatch> = scored
            .iter()
            .filter(|(_, score)| *score > BASELINE_SCORE)
            .map(|(sig, score)| ChemicalMatch::from_signature(sig, score * sig.base_confidence))
            .collect();

        if matches.is_empty() {
            tracing::trace!(%hex, "no signature above baseline");
            matches = scored
                .iter()
                .map(|(sig, score)| ChemicalMatch::from_signature(sig, score * sig.base_confidence))
                .collect();
        }

        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        matches.truncate(MAX_MATCHES);
        matches
    }
}

/// First rule that fires wins
///
/// Purple fragments are matched anywhere in the hex string, including
/// across channel bytes.
fn rule_score(sig: &ChemicalSignature, hex: &str, rgb: RgbColor, name: &str) -> f32 {
    let range = sig.color_range.to_lowercase();

    if range.contains(name) {
        NAME_MATCH_SCORE
    } else if range.contains("purple") && PURPLE_HEX_FRAGMENTS.iter().any(|f| hex.contains(f)) {
        PURPLE_PATTERN_SCORE
    } else if range.contains("blue") && rgb.b > rgb.r && rgb.b > rgb.g {
        BLUE_DOMINANT_SCORE
    } else if range.contains("orange") && rgb.r > rgb.g && rgb.g > rgb.b {
        ORANGE_ORDER_SCORE
    } else {
        BASELINE_SCORE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorConverter;

    fn signature(substance: &str, color_range: &str, base_confidence: f32) -> ChemicalSignature {
        ChemicalSignature {
            substance: substance.to_string(),
            substance_localized: substance.to_string(),
            test_type: "Test".to_string(),
            color_range: color_range.to_string(),
            base_confidence,
            notes: String::new(),
            notes_localized: String::new(),
        }
    }

    fn matcher(signatures: Vec<ChemicalSignature>) -> ChemicalMatcher {
        ChemicalMatcher::new(Arc::new(ReferenceTable::new(signatures).unwrap()))
    }

    fn match_rgb(matcher: &ChemicalMatcher, rgb: RgbColor) -> Vec<ChemicalMatch> {
        let hex = ColorConverter::new().rgb_to_hex(rgb);
        matcher.match_color(&hex, rgb)
    }

    #[test]
    fn test_name_rule() {
        let m = matcher(vec![signature("A", "Purple to Black", 1.0)]);
        let matches = match_rgb(&m, RgbColor::new(139, 0, 139));
        assert_eq!(matches.len(), 1);
        assert!((matches[0].confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_purple_hex_rule() {
        // Indigo is named "Indigo", which the range does not contain
        let m = matcher(vec![signature("A", "Purple", 1.0)]);
        let matches = match_rgb(&m, RgbColor::new(75, 0, 130));
        assert!((matches[0].confidence - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_purple_fragment_spans_channel_bytes() {
        // #480a30: "80" straddles the red and green bytes
        let sig = signature("A", "Purple", 1.0);
        let score = rule_score(&sig, "#480a30", RgbColor::new(72, 10, 48), "maroon");
        assert_eq!(score, PURPLE_PATTERN_SCORE);

        let score = rule_score(&sig, "#470a30", RgbColor::new(71, 10, 48), "maroon");
        assert_eq!(score, BASELINE_SCORE);
    }

    #[test]
    fn test_custom_namer_drives_name_rule() {
        let table = Arc::new(ReferenceTable::new(vec![signature("T", "Teal Green", 1.0)]).unwrap());
        let navy = RgbColor::new(0, 0, 128);

        // Default palette names this "Navy": baseline only
        let default = ChemicalMatcher::new(Arc::clone(&table));
        assert!((match_rgb(&default, navy)[0].confidence - 0.3).abs() < 1e-6);

        let custom = ChemicalMatcher::new(table)
            .with_namer(ColorNamer::with_palette([("Teal".to_string(), RgbColor::new(0, 128, 128))]));
        assert!((match_rgb(&custom, navy)[0].confidence - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_blue_channel_rule() {
        let m = matcher(vec![signature("A", "Blue", 0.5)]);
        let matches = match_rgb(&m, RgbColor::new(0, 0, 128));
        // Named "Navy": 0.7 × 0.5
        assert!((matches[0].confidence - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_orange_order_rule() {
        let m = matcher(vec![signature("A", "Orange", 1.0)]);
        let matches = match_rgb(&m, RgbColor::new(170, 60, 40));
        // Named "Brown", r > g > b
        assert!((matches[0].confidence - 0.7).abs() < 1e-6);
    }

    #[test]
    fn test_rule_order_prefers_name() {
        // Purple byte present, but the name rule fires first
        let sig = signature("A", "Purple", 1.0);
        let score = rule_score(&sig, "#800080", RgbColor::new(128, 0, 128), "purple");
        assert_eq!(score, NAME_MATCH_SCORE);
    }

    #[test]
    fn test_filter_uses_rule_score_not_product() {
        // 0.7 × 0.2 = 0.14 is below the baseline, but the rule score passes
        let m = matcher(vec![
            signature("Weak blue", "Blue", 0.2),
            signature("Strong orange", "Orange", 1.0),
        ]);
        let matches = match_rgb(&m, RgbColor::new(0, 0, 128));
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].substance, "Weak blue");
        assert!((matches[0].confidence - 0.14).abs() < 1e-6);
    }

    #[test]
    fn test_baseline_fallback_when_nothing_fires() {
        let m = matcher(vec![
            signature("P", "Purple", 0.9),
            signature("B", "Blue", 0.6),
            signature("O", "Orange", 0.3),
        ]);
        let matches = match_rgb(&m, RgbColor::new(0, 255, 0));
        assert_eq!(matches.len(), 3);
        assert_eq!(matches[0].substance, "P");
        assert!((matches[0].confidence - 0.27).abs() < 1e-6);
        assert!((matches[2].confidence - 0.09).abs() < 1e-6);
    }

    #[test]
    fn test_sorted_and_truncated() {
        let matcher = ChemicalMatcher::default();
        let matches = match_rgb(&matcher, RgbColor::new(139, 0, 139));
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
        assert!(matches
            .iter()
            .all(|m| m.color_range.to_lowercase().contains("purple")));
        assert!(matches.iter().all(|m| (0.0..=1.0).contains(&m.confidence)));
    }

    #[test]
    fn test_standard_table_blue_sample() {
        let matcher = ChemicalMatcher::default();
        let matches = match_rgb(&matcher, RgbColor::new(30, 60, 200));
        assert!(!matches.is_empty());
        assert!(matches[0].color_range.to_lowercase().contains("blue"));
    }
}
