//! Capture advice shown next to the analysis result
//!
//! Every applicable rule contributes one message in English and one in
//! Spanish; the two lists stay index-aligned.

use serde::{Deserialize, Serialize};

use super::assessor::{ImageQuality, LightingCondition};
use crate::constants::scene::MIN_COLORS_FOR_VARIATION;

const RETAKE_WITH_LIGHT: (&str, &str) = (
    "Lighting is dim. Retake the photo in brighter, even light.",
    "La iluminación es escasa. Vuelva a tomar la foto con luz más intensa y uniforme.",
);

const HIGHER_RESOLUTION: (&str, &str) = (
    "Image quality is poor. Use a higher-resolution camera or move closer to the sample.",
    "La calidad de la imagen es baja. Use una cámara de mayor resolución o acérquese a la muestra.",
);

const LIMITED_VARIATION: (&str, &str) = (
    "Limited color variation detected. Try a different angle or lighting.",
    "Se detectó poca variación de color. Pruebe con otro ángulo o iluminación.",
);

/// Index-aligned advisory messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    pub messages: Vec<String>,
    pub messages_localized: Vec<String>,
}

impl Recommendations {
    /// Apply every rule; rules are independent
    pub fn build(lighting: LightingCondition, quality: ImageQuality, color_count: usize) -> Self {
        let mut recs = Self::default();
        if lighting == LightingCondition::Dim {
            recs.push(RETAKE_WITH_LIGHT);
        }
        if quality == ImageQuality::Poor {
            recs.push(HIGHER_RESOLUTION);
        }
        if color_count < MIN_COLORS_FOR_VARIATION {
            recs.push(LIMITED_VARIATION);
        }
        recs
    }

    fn push(&mut self, (message, localized): (&str, &str)) {
        self.messages.push(message.to_string());
        self.messages_localized.push(localized.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
