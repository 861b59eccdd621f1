//! Chemical color-signature reference table
//!
//! Each signature records the color a presumptive reagent test produces
//! for a substance, as reported in field-testing literature. The table is
//! read-only once built; updating it means constructing a new table through
//! [`ReferenceTable::new`] (or loading one from JSON) and handing it to the
//! analyzer.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{AnalysisError, Result};

/// One known reagent reaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChemicalSignature {
    /// Substance name (English)
    pub substance: String,
    /// Substance name (Spanish)
    pub substance_localized: String,
    /// Reagent, e.g. "Marquis"
    pub test_type: String,
    /// Free-text color family, e.g. "Purple to Black"
    pub color_range: String,
    /// Literature reliability of this reaction, 0-1
    pub base_confidence: f32,
    pub notes: String,
    pub notes_localized: String,
}

/// Validated, immutable list of signatures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ChemicalSignature>", into = "Vec<ChemicalSignature>")]
pub struct ReferenceTable {
    signatures: Vec<ChemicalSignature>,
}

impl TryFrom<Vec<ChemicalSignature>> for ReferenceTable {
    type Error = AnalysisError;

    fn try_from(signatures: Vec<ChemicalSignature>) -> Result<Self> {
        Self::new(signatures)
    }
}

impl From<ReferenceTable> for Vec<ChemicalSignature> {
    fn from(table: ReferenceTable) -> Self {
        table.signatures
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl ReferenceTable {
    /// Build a table, rejecting empty tables and out-of-range confidences
    pub fn new(signatures: Vec<ChemicalSignature>) -> Result<Self> {
        if signatures.is_empty() {
            return Err(AnalysisError::ReferenceTableError {
                reason: "table has no signatures".to_string(),
            });
        }
        for (index, sig) in signatures.iter().enumerate() {
            if !(0.0..=1.0).contains(&sig.base_confidence) {
                return Err(AnalysisError::ReferenceTableError {
                    reason: format!(
                        "entry {} ({} / {}): base confidence {} outside 0-1",
                        index, sig.substance, sig.test_type, sig.base_confidence
                    ),
                });
            }
            if sig.color_range.trim().is_empty() || sig.substance.trim().is_empty() {
                return Err(AnalysisError::ReferenceTableError {
                    reason: format!("entry {}: substance and color range are required", index),
                });
            }
        }
        Ok(Self { signatures })
    }

    /// Load a table from a JSON array of signatures
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AnalysisError::config(format!("cannot read {}", path.display()), e))?;
        Self::from_json_str(&content)
    }

    /// Parse a table from a JSON array of signatures
    pub fn from_json_str(content: &str) -> Result<Self> {
        let signatures: Vec<ChemicalSignature> = serde_json::from_str(content)
            .map_err(|e| AnalysisError::config("invalid reference table", e))?;
        Self::new(signatures)
    }

    /// Write the table as a JSON array
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.signatures)
            .map_err(|e| AnalysisError::config("cannot serialize reference table", e))?;
        std::fs::write(path, json)
            .map_err(|e| AnalysisError::config(format!("cannot write {}", path.display()), e))
    }

    pub fn signatures(&self) -> &[ChemicalSignature] {
        &self.signatures
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    /// Built-in literature table
    pub fn standard() -> Self {
        Self {
            signatures: STANDARD_SIGNATURES
                .iter()
                .map(|row| ChemicalSignature {
                    substance: row.0.to_string(),
                    substance_localized: row.1.to_string(),
                    test_type: row.2.to_string(),
                    color_range: row.3.to_string(),
                    base_confidence: row.4,
                    notes: row.5.to_string(),
                    notes_localized: row.6.to_string(),
                })
                .collect(),
        }
    }
}

/// (substance, substance es, reagent, color range, base confidence, notes, notes es)
type SignatureRow = (&'static str, &'static str, &'static str, &'static str, f32, &'static str, &'static str);

const STANDARD_SIGNATURES: [SignatureRow; 20] = [
    (
        "MDMA", "MDMA", "Marquis", "Purple to Black", 0.90,
        "Fast reaction, darkens to black within seconds",
        "Reacción rápida, se oscurece a negro en segundos",
    ),
    (
        "MDA", "MDA", "Marquis", "Purple to Black", 0.85,
        "Indistinguishable from MDMA with Marquis alone; confirm with Simon",
        "Indistinguible de MDMA solo con Marquis; confirmar con Simon",
    ),
    (
        "Heroin", "Heroína", "Marquis", "Purple", 0.80,
        "Opiates develop a purple that does not turn black",
        "Los opiáceos desarrollan un púrpura que no pasa a negro",
    ),
    (
        "Morphine", "Morfina", "Marquis", "Purple", 0.80,
        "Deep purple to violet",
        "Púrpura intenso a violeta",
    ),
    (
        "Codeine", "Codeína", "Marquis", "Purple", 0.75,
        "Slower onset than morphine",
        "Aparición más lenta que la morfina",
    ),
    (
        "Amphetamine", "Anfetamina", "Marquis", "Orange to Brown", 0.85,
        "Orange turning reddish brown",
        "Naranja que vira a marrón rojizo",
    ),
    (
        "Methamphetamine", "Metanfetamina", "Marquis", "Orange to Brown", 0.85,
        "Same reaction as amphetamine; confirm with Simon",
        "Misma reacción que la anfetamina; confirmar con Simon",
    ),
    (
        "2C-B", "2C-B", "Marquis", "Yellow to Green", 0.75,
        "Yellow turning green over a minute",
        "Amarillo que vira a verde en un minuto",
    ),
    (
        "Mescaline", "Mescalina", "Marquis", "Orange", 0.70,
        "Orange without darkening",
        "Naranja sin oscurecerse",
    ),
    (
        "Aspirin", "Aspirina", "Marquis", "Pink to Red", 0.50,
        "Common cutting agent",
        "Adulterante habitual",
    ),
    (
        "MDMA", "MDMA", "Mecke", "Blue to Black", 0.85,
        "Dark blue green turning black",
        "Azul verdoso oscuro que pasa a negro",
    ),
    (
        "Heroin", "Heroína", "Mecke", "Blue Green", 0.80,
        "Deep blue green",
        "Azul verdoso intenso",
    ),
    (
        "Oxycodone", "Oxicodona", "Mecke", "Yellow to Green", 0.65,
        "Faint yellow slowly turning green",
        "Amarillo tenue que vira lentamente a verde",
    ),
    (
        "Ketamine", "Ketamina", "Mandelin", "Orange", 0.75,
        "Orange within seconds",
        "Naranja en pocos segundos",
    ),
    (
        "Amphetamine", "Anfetamina", "Mandelin", "Dark Green", 0.70,
        "Dark green",
        "Verde oscuro",
    ),
    (
        "MDMA", "MDMA", "Simon", "Blue", 0.85,
        "Secondary amines turn blue",
        "Las aminas secundarias se tornan azules",
    ),
    (
        "Methamphetamine", "Metanfetamina", "Simon", "Blue", 0.85,
        "Secondary amine; amphetamine shows no change",
        "Amina secundaria; la anfetamina no cambia",
    ),
    (
        "LSD", "LSD", "Ehrlich", "Purple", 0.90,
        "Indoles turn purple; reaction may take minutes",
        "Los indoles se tornan púrpura; la reacción puede tardar minutos",
    ),
    (
        "Psilocybin", "Psilocibina", "Ehrlich", "Purple", 0.75,
        "Indole alkaloid",
        "Alcaloide indólico",
    ),
    (
        "Cocaine", "Cocaína", "Scott", "Blue", 0.80,
        "Cobalt thiocyanate gives a blue precipitate",
        "El tiocianato de cobalto da un precipitado azul",
    ),
];
