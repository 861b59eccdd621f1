//! Chemical matching module
//!
//! This module holds the reagent reference table and ranks candidate
//! substances for each dominant color.

pub mod matcher;
pub mod reference;

pub use matcher::{ChemicalMatch, ChemicalMatcher};
pub use reference::{ChemicalSignature, ReferenceTable};
