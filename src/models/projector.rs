//! Valuation projection.
//!
//! The crisp sentiment score sets a per-period multiplier, the industry trend
//! nudges it, and the result compounds over the horizon. Volatility, damped by
//! certainty, sets the width of a symmetric relative band around the final value.

use crate::domain::{FuzzyResult, NormalizedFeatures, PathPoint, PredictionResult, Projection};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    /// `base = 1 + (crisp - 0.5) * 2 * sentiment_span`, so crisp ∈ [0, 1] maps
    /// to a multiplier in `[1 - span, 1 + span]`.
    pub sentiment_span: f64,
    /// `boost = (industry - 0.5) * industry_weight`.
    pub industry_weight: f64,
    /// `band = volatility * band_scale * (band_base - certainty * band_certainty)`.
    pub band_scale: f64,
    pub band_base: f64,
    pub band_certainty: f64,
}

impl ProjectionParams {
    pub const DEFAULT: ProjectionParams = ProjectionParams {
        sentiment_span: 0.35,
        industry_weight: 0.15,
        band_scale: 0.18,
        band_base: 1.2,
        band_certainty: 0.4,
    };
}

impl Default for ProjectionParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub fn project(
    fuzzy: FuzzyResult,
    features: &NormalizedFeatures,
    current_value: f64,
    horizon_periods: u32,
) -> Projection {
    project_with(fuzzy, features, current_value, horizon_periods, &ProjectionParams::DEFAULT)
}

pub fn project_with(
    fuzzy: FuzzyResult,
    features: &NormalizedFeatures,
    current_value: f64,
    horizon_periods: u32,
    p: &ProjectionParams,
) -> Projection {
    let base_multiplier = 1.0 + (fuzzy.crisp - 0.5) * 2.0 * p.sentiment_span;
    let industry_boost = (features.industry - 0.5) * p.industry_weight;
    let period_multiplier = base_multiplier * (1.0 + industry_boost);

    // `powf(0.0)` is exactly 1 for any base, NaN included.
    let final_value = current_value * period_multiplier.powf(f64::from(horizon_periods));

    let band = features.volatility * p.band_scale * (p.band_base - fuzzy.certainty * p.band_certainty);

    Projection {
        base_multiplier,
        industry_boost,
        period_multiplier,
        band,
        result: PredictionResult {
            final_value,
            low_bound: final_value * (1.0 - band),
            high_bound: final_value * (1.0 + band),
            growth_rate_percent: 100.0 * (final_value - current_value) / current_value,
        },
    }
}

/// Upper bound on the number of points in a projection path.
pub const MAX_PATH_POINTS: usize = 1024;

/// Per-period values for `t = 0..=horizon`, each with the final band applied.
///
/// Horizons longer than `MAX_PATH_POINTS - 1` are sampled at evenly spaced
/// periods. Periods 0 and `horizon` are always present, so the last point
/// reproduces the projection's final value and bounds.
pub fn projection_path(projection: &Projection, current_value: f64, horizon_periods: u32) -> Vec<PathPoint> {
    path_periods(horizon_periods)
        .map(|period| {
            let value = current_value * projection.period_multiplier.powf(f64::from(period));
            PathPoint {
                period,
                value,
                low: value * (1.0 - projection.band),
                high: value * (1.0 + projection.band),
            }
        })
        .collect()
}

fn path_periods(horizon_periods: u32) -> impl Iterator<Item = u32> {
    let horizon = u64::from(horizon_periods);
    let points = (horizon + 1).min(MAX_PATH_POINTS as u64);
    let last = points - 1;
    // `i * horizon / last` stays within u64 and is exact at both ends.
    (0..points).map(move |i| if last == 0 { 0 } else { (i * horizon / last) as u32 })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_features() -> NormalizedFeatures {
        NormalizedFeatures {
            growth: 0.7,
            volatility: 0.1,
            economic: 0.65,
            industry: 0.6,
        }
    }

    fn reference_fuzzy() -> FuzzyResult {
        FuzzyResult {
            crisp: 0.6076064892525239,
            certainty: 0.6892190129982209,
        }
    }

    #[test]
    fn reference_projection() {
        let p = project(reference_fuzzy(), &reference_features(), 1000.0, 5);
        assert!((p.base_multiplier - 1.0753245424767668).abs() < 1e-12);
        assert!((p.industry_boost - 0.015).abs() < 1e-12);
        assert!((p.band - 0.016637623106412806).abs() < 1e-12);

        let r = p.result;
        assert!((r.final_value - 1548.9164817375884).abs() < 1e-9);
        assert!((r.low_bound - 1523.1461930911273).abs() < 1e-9);
        assert!((r.high_bound - 1574.6867703840492).abs() < 1e-9);
        assert!((r.growth_rate_percent - 54.89164817375883).abs() < 1e-9);
    }

    #[test]
    fn zero_horizon_returns_current_value_exactly() {
        let p = project(reference_fuzzy(), &reference_features(), 1234.5, 0);
        assert_eq!(p.result.final_value, 1234.5);
        assert_eq!(p.result.growth_rate_percent, 0.0);
    }

    #[test]
    fn zero_current_value_gives_non_finite_growth_rate() {
        let p = project(reference_fuzzy(), &reference_features(), 0.0, 3);
        assert_eq!(p.result.final_value, 0.0);
        assert!(p.result.growth_rate_percent.is_nan());
    }

    #[test]
    fn neutral_sentiment_and_industry_hold_value() {
        let features = NormalizedFeatures {
            growth: 0.5,
            volatility: 0.0,
            economic: 0.5,
            industry: 0.5,
        };
        let fuzzy = FuzzyResult {
            crisp: 0.5,
            certainty: 1.0,
        };
        let p = project(fuzzy, &features, 500.0, 12);
        assert_eq!(p.period_multiplier, 1.0);
        assert_eq!(p.result.final_value, 500.0);
        assert_eq!(p.result.low_bound, p.result.high_bound);
    }

    #[test]
    fn path_ends_at_final_projection() {
        let p = project(reference_fuzzy(), &reference_features(), 1000.0, 5);
        let path = projection_path(&p, 1000.0, 5);
        assert_eq!(path.len(), 6);
        assert_eq!(path[0].value, 1000.0);
        let last = path.last().unwrap();
        assert_eq!(last.period, 5);
        assert_eq!(last.value, p.result.final_value);
        assert_eq!(last.low, p.result.low_bound);
        assert_eq!(last.high, p.result.high_bound);
        assert!(path.windows(2).all(|w| w[1].value > w[0].value));
    }

    #[test]
    fn short_paths_keep_every_period() {
        let periods: Vec<u32> = path_periods(0).collect();
        assert_eq!(periods, vec![0]);
        let periods: Vec<u32> = path_periods(MAX_PATH_POINTS as u32 - 1).collect();
        assert_eq!(periods.len(), MAX_PATH_POINTS);
        assert!(periods.iter().enumerate().all(|(i, &p)| p as usize == i));
    }

    #[test]
    fn very_long_horizon_is_sampled_to_a_bounded_path() {
        let p = project(reference_fuzzy(), &reference_features(), 1000.0, u32::MAX);
        let path = projection_path(&p, 1000.0, u32::MAX);
        assert_eq!(path.len(), MAX_PATH_POINTS);
        assert_eq!(path[0].period, 0);
        assert_eq!(path[0].value, 1000.0);
        assert!(path.windows(2).all(|w| w[1].period > w[0].period));

        let last = path.last().unwrap();
        assert_eq!(last.period, u32::MAX);
        assert_eq!(last.value.to_bits(), p.result.final_value.to_bits());
        assert_eq!(last.high.to_bits(), p.result.high_bound.to_bits());
    }
}
