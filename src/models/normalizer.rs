//! Feature normalization: affine rescale of each raw input, then clamp to `[0, 1]`.

use crate::domain::{NormalizedFeatures, RawInputs};
use crate::math::clamp01;

/// `[-50, 50]` percent → `[0, 1]`.
pub fn normalize_growth(growth_percent: f64) -> f64 {
    clamp01((growth_percent + 50.0) / 100.0)
}

/// `[0, 100]` percent → `[0, 1]`.
pub fn normalize_volatility(volatility_percent: f64) -> f64 {
    clamp01(volatility_percent / 100.0)
}

/// `[-10, 10]` → `[0, 1]`.
pub fn normalize_economic(economic_index: f64) -> f64 {
    clamp01((economic_index + 10.0) / 20.0)
}

/// `[-5, 5]` → `[0, 1]`.
pub fn normalize_industry(industry_trend_index: f64) -> f64 {
    clamp01((industry_trend_index + 5.0) / 10.0)
}

pub fn normalize(inputs: &RawInputs) -> NormalizedFeatures {
    NormalizedFeatures {
        growth: normalize_growth(inputs.growth_percent),
        volatility: normalize_volatility(inputs.volatility_percent),
        economic: normalize_economic(inputs.economic_index),
        industry: normalize_industry(inputs.industry_trend_index),
    }
}
