//! Scene assessment module
//!
//! This module classifies lighting and capture quality from the sampled
//! pixels and turns the classification into capture advice.

pub mod assessor;
pub mod recommendations;

pub use assessor::{ImageQuality, LightingCondition, SceneAssessor};
pub use recommendations::Recommendations;
