//! Mathematical utilities: scalar helpers, fuzzy membership functions, and
//! least squares.

pub mod membership;
pub mod ols;
pub mod scalar;

pub use membership::*;
pub use ols::*;
pub use scalar::*;
