//! Batch scenarios built on the pipeline.
//!
//! Responsibilities:
//!
//! - sweep one raw input over a grid (parallel)
//! - Monte-Carlo stress of all market inputs (seeded, parallel)
//! - linear sensitivity of the growth rate to each input

pub mod stress;
pub mod sweep;

pub use stress::*;
pub use sweep::*;
