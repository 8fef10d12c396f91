//! Scalar helpers with NaN-propagating semantics.
//!
//! `f64::max`/`f64::min` return the non-NaN operand, which would silently turn
//! a failed input parse into a plausible-looking number. The pipeline instead
//! lets NaN flow through to the result, so every min/max/clamp it uses comes
//! from here.

/// Larger of `a` and `b`; NaN if either is NaN.
pub fn max_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else if a >= b {
        a
    } else {
        b
    }
}

/// Smaller of `a` and `b`; NaN if either is NaN.
pub fn min_nan(a: f64, b: f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else if a <= b {
        a
    } else {
        b
    }
}

/// Largest of three values; NaN if any is NaN.
pub fn max3(a: f64, b: f64, c: f64) -> f64 {
    max_nan(max_nan(a, b), c)
}

/// Clamp into `[0, 1]`. NaN stays NaN, infinities saturate.
pub fn clamp01(x: f64) -> f64 {
    x.clamp(0.0, 1.0)
}

/// Rectified linear unit. NaN stays NaN.
pub fn relu(x: f64) -> f64 {
    if x < 0.0 { 0.0 } else { x }
}
