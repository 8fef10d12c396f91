//! The scoring stages.
//!
//! Each stage is a small, pure function over fixed constants so the pipeline
//! can compose them without shared state:
//!
//! `normalizer` → `neural` → `fuzzy` (with `rules`) → `projector`

pub mod fuzzy;
pub mod neural;
pub mod normalizer;
pub mod projector;
pub mod rules;

pub use fuzzy::*;
pub use neural::*;
pub use normalizer::*;
pub use projector::*;
pub use rules::*;
