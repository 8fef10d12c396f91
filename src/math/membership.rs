//! Fuzzy membership functions.
//!
//! Three shapes, all returning a degree in `[0, 1]` for finite input:
//!
//! - `fuzzy_low(x, min, max)`: shoulder that is 1 at/below `min`, 0 at/above `max`
//! - `fuzzy_high(x, min, max)`: mirror image of `fuzzy_low`
//! - `fuzzy_medium(x, min, mid, max)`: peak of 1 at `mid`, 0 at/outside the edges
//!
//! The interior ramps are concave (`u^0.7` for the shoulders, `u^0.8` for the
//! peak), so a value just inside a set is credited more than a linear ramp would.
//! NaN input yields NaN.

/// Ramp exponent for the low/high shoulders.
pub const SHOULDER_EXPONENT: f64 = 0.7;

/// Ramp exponent for the medium peak.
pub const PEAK_EXPONENT: f64 = 0.8;

pub fn fuzzy_low(x: f64, min: f64, max: f64) -> f64 {
    if x <= min {
        return 1.0;
    }
    if x >= max {
        return 0.0;
    }
    ((max - x) / (max - min)).powf(SHOULDER_EXPONENT)
}

pub fn fuzzy_high(x: f64, min: f64, max: f64) -> f64 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    ((x - min) / (max - min)).powf(SHOULDER_EXPONENT)
}

pub fn fuzzy_medium(x: f64, min: f64, mid: f64, max: f64) -> f64 {
    if x <= min || x >= max {
        return 0.0;
    }
    if x == mid {
        return 1.0;
    }
    if x < mid {
        ((x - min) / (mid - min)).powf(PEAK_EXPONENT)
    } else {
        ((max - x) / (max - mid)).powf(PEAK_EXPONENT)
    }
}
