//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the raw input tuple (`RawInputs`) and its validation
//! - per-stage outputs (`NormalizedFeatures`, `NeuralOutput`, `FuzzyTrace`, `Projection`)
//! - linguistic states (`Level`, `Outlook`) and the rule key
//! - the terminal `PredictionResult` and its saved-file form

pub mod types;

pub use types::*;
