//! Shared scoring pipeline used by the CLI, the TUI, and the batch scenarios.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! normalize -> neural score -> fuzzy inference -> projection
//!
//! The pipeline is a total function: it never fails, never panics, and keeps
//! no state between calls, so it can run on any number of threads at once.
//! Callers that want to reject bad input call `RawInputs::validate` first.

use crate::domain::{PathPoint, Prediction, PredictionResult, RawInputs};
use crate::models::{FuzzyEngine, NetworkWeights, ProjectionParams};

/// Every constant the pipeline depends on.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PipelineConfig {
    pub network: NetworkWeights,
    pub fuzzy: FuzzyEngine,
    pub projection: ProjectionParams,
}

impl PipelineConfig {
    pub const DEFAULT: PipelineConfig = PipelineConfig {
        network: NetworkWeights::DEFAULT,
        fuzzy: FuzzyEngine::DEFAULT,
        projection: ProjectionParams::DEFAULT,
    };
}

/// Run the full pipeline with the built-in constants and keep every stage output.
pub fn predict(inputs: &RawInputs) -> Prediction {
    predict_with(inputs, &PipelineConfig::DEFAULT)
}

/// Run the full pipeline and return only the terminal result.
pub fn predict_result(inputs: &RawInputs) -> PredictionResult {
    predict(inputs).result()
}

pub fn predict_with(inputs: &RawInputs, config: &PipelineConfig) -> Prediction {
    let features = crate::models::normalize(inputs);
    tracing::debug!(
        growth = features.growth,
        volatility = features.volatility,
        economic = features.economic,
        industry = features.industry,
        "Normalized features"
    );

    let neural = crate::models::score_with(&features, &config.network);
    tracing::debug!(score = neural.score, hidden = ?neural.hidden, "Neural score");

    let fuzzy = config.fuzzy.infer(neural.score, features.volatility, features.economic);
    tracing::debug!(
        growth_state = fuzzy.rule.growth.label(),
        volatility_state = fuzzy.rule.volatility.label(),
        economic_state = fuzzy.rule.economic.label(),
        rule_output = fuzzy.rule_output,
        activation = fuzzy.activation,
        crisp = fuzzy.result.crisp,
        certainty = fuzzy.result.certainty,
        "Fuzzy inference"
    );

    let projection = crate::models::project_with(
        fuzzy.result,
        &features,
        inputs.current_value,
        inputs.horizon_periods,
        &config.projection,
    );
    tracing::debug!(
        multiplier = projection.period_multiplier,
        final_value = projection.result.final_value,
        low = projection.result.low_bound,
        high = projection.result.high_bound,
        "Projection"
    );

    if !projection.result.final_value.is_finite() || !projection.result.growth_rate_percent.is_finite() {
        tracing::warn!(inputs = ?inputs, "Pipeline produced non-finite output");
    }

    Prediction {
        inputs: *inputs,
        features,
        neural,
        fuzzy,
        projection,
    }
}

/// Per-period path for a finished prediction.
pub fn path_for(prediction: &Prediction) -> Vec<PathPoint> {
    crate::models::projection_path(
        &prediction.projection,
        prediction.inputs.current_value,
        prediction.inputs.horizon_periods,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> RawInputs {
        RawInputs {
            current_value: 1000.0,
            growth_percent: 20.0,
            volatility_percent: 10.0,
            economic_index: 3.0,
            industry_trend_index: 1.0,
            horizon_periods: 5,
        }
    }

    #[test]
    fn reference_scenario_end_to_end() {
        let p = predict(&reference());
        assert!((p.neural.score - 0.573231065603904).abs() < 1e-12);
        assert!((p.fuzzy.result.crisp - 0.6076064892525239).abs() < 1e-12);
        assert!((p.fuzzy.result.certainty - 0.6892190129982209).abs() < 1e-12);

        let r = p.result();
        assert!((r.final_value - 1548.9164817375884).abs() < 1e-9);
        assert!((r.low_bound - 1523.1461930911273).abs() < 1e-9);
        assert!((r.high_bound - 1574.6867703840492).abs() < 1e-9);
        assert!((r.growth_rate_percent - 54.89164817375883).abs() < 1e-9);
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let a = predict_result(&reference());
        let b = predict_result(&reference());
        assert_eq!(a.final_value.to_bits(), b.final_value.to_bits());
        assert_eq!(a.low_bound.to_bits(), b.low_bound.to_bits());
        assert_eq!(a.high_bound.to_bits(), b.high_bound.to_bits());
        assert_eq!(a.growth_rate_percent.to_bits(), b.growth_rate_percent.to_bits());
    }

    #[test]
    fn zero_horizon_is_identity() {
        let inputs = RawInputs {
            horizon_periods: 0,
            ..reference()
        };
        let r = predict_result(&inputs);
        assert_eq!(r.final_value, inputs.current_value);
        assert_eq!(r.growth_rate_percent, 0.0);
    }

    #[test]
    fn non_finite_input_surfaces_in_result() {
        let inputs = RawInputs {
            economic_index: f64::NAN,
            ..reference()
        };
        let r = predict_result(&inputs);
        assert!(r.final_value.is_nan());
        assert!(r.low_bound.is_nan());
        assert!(r.growth_rate_percent.is_nan());
    }

    #[test]
    fn growth_sweep_is_non_decreasing() {
        let mut prev = f64::NEG_INFINITY;
        for g in -60..=60 {
            let inputs = RawInputs {
                growth_percent: f64::from(g),
                ..reference()
            };
            let v = predict_result(&inputs).final_value;
            assert!(v >= prev, "final value dropped at growth {g}%: {prev} -> {v}");
            prev = v;
        }
    }

    #[test]
    fn path_matches_result() {
        let p = predict(&reference());
        let path = path_for(&p);
        assert_eq!(path.len(), 6);
        assert_eq!(path[5].value, p.result().final_value);
    }

    #[test]
    fn negative_current_value_mirrors_positive() {
        let positive = predict_result(&reference());
        let negative = predict_result(&RawInputs {
            current_value: -1000.0,
            ..reference()
        });

        assert!(negative.final_value.is_finite());
        assert!(negative.low_bound.is_finite());
        assert!(negative.high_bound.is_finite());
        assert!(negative.growth_rate_percent.is_finite());

        assert_eq!(negative.final_value, -positive.final_value);
        assert_eq!(negative.low_bound, -positive.low_bound);
        assert_eq!(negative.high_bound, -positive.high_bound);
        assert_eq!(negative.growth_rate_percent, positive.growth_rate_percent);
    }

    #[test]
    fn path_for_very_long_horizon_is_bounded() {
        let p = predict(&RawInputs {
            horizon_periods: u32::MAX,
            ..reference()
        });
        let path = path_for(&p);
        assert_eq!(path.len(), crate::models::projector::MAX_PATH_POINTS);
        assert_eq!(path.last().map(|pt| pt.period), Some(u32::MAX));
    }
}
