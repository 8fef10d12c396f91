//! Input/output helpers.
//!
//! - prediction JSON read/write (`prediction`)
//! - sweep/stress exports (CSV) (`export`)

pub mod export;
pub mod prediction;

pub use export::*;
pub use prediction::*;
