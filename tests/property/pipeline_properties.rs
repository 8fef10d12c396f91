use market_sentiment::app::pipeline::{predict, predict_result};
use market_sentiment::domain::RawInputs;
use market_sentiment::math::{fuzzy_high, fuzzy_low, fuzzy_medium};
use market_sentiment::models::{RuleTable, normalize};
use proptest::prelude::*;

fn raw_inputs() -> impl Strategy<Value = RawInputs> {
    (
        1.0f64..1e6,
        -200.0f64..200.0,
        -50.0f64..250.0,
        -40.0f64..40.0,
        -20.0f64..20.0,
        0u32..40,
    )
        .prop_map(|(current, growth, volatility, economic, industry, horizon)| RawInputs {
            current_value: current,
            growth_percent: growth,
            volatility_percent: volatility,
            economic_index: economic,
            industry_trend_index: industry,
            horizon_periods: horizon,
        })
}

proptest! {
    #[test]
    fn features_stay_in_unit_interval(inputs in raw_inputs()) {
        let f = normalize(&inputs);
        for v in [f.growth, f.volatility, f.economic, f.industry] {
            prop_assert!((0.0..=1.0).contains(&v), "feature {} out of range", v);
        }
    }

    #[test]
    fn score_is_strictly_bounded(inputs in raw_inputs()) {
        let score = predict(&inputs).neural.score;
        prop_assert!(score > -1.0 && score < 1.0, "score {}", score);
    }

    #[test]
    fn certainty_bounded_and_hedge_moves_toward_neutral(inputs in raw_inputs()) {
        let t = predict(&inputs).fuzzy;
        prop_assert!((0.0..=1.0).contains(&t.result.certainty));
        prop_assert!((0.0..=1.0).contains(&t.activation));
        prop_assert!((t.adjusted - 0.5).abs() <= (t.rule_output - 0.5).abs() + 1e-12);

        let (lo, hi) = RuleTable::default().range();
        prop_assert!(t.rule_output >= lo && t.rule_output <= hi);
        prop_assert!((0.0..=1.0).contains(&t.result.crisp));
    }

    #[test]
    fn repeated_predictions_are_bit_identical(inputs in raw_inputs()) {
        let a = predict_result(&inputs);
        let b = predict_result(&inputs);
        prop_assert_eq!(a.final_value.to_bits(), b.final_value.to_bits());
        prop_assert_eq!(a.low_bound.to_bits(), b.low_bound.to_bits());
        prop_assert_eq!(a.high_bound.to_bits(), b.high_bound.to_bits());
        prop_assert_eq!(a.growth_rate_percent.to_bits(), b.growth_rate_percent.to_bits());
    }

    #[test]
    fn zero_horizon_returns_current_value(inputs in raw_inputs()) {
        let inputs = RawInputs { horizon_periods: 0, ..inputs };
        let r = predict_result(&inputs);
        prop_assert_eq!(r.final_value, inputs.current_value);
        prop_assert_eq!(r.growth_rate_percent, 0.0);
    }

    #[test]
    fn band_brackets_final_value(inputs in raw_inputs()) {
        let r = predict_result(&inputs);
        prop_assert!(r.low_bound <= r.final_value && r.final_value <= r.high_bound);
    }

    #[test]
    fn full_volatility_saturates_feature(inputs in raw_inputs()) {
        let inputs = RawInputs { volatility_percent: 100.0, ..inputs };
        prop_assert_eq!(normalize(&inputs).volatility, 1.0);
    }

    #[test]
    fn membership_boundaries_are_exact(min in -10.0f64..10.0, width in 0.01f64..10.0) {
        let max = min + width;
        let mid = min + width / 2.0;
        prop_assert_eq!(fuzzy_low(min, min, max), 1.0);
        prop_assert_eq!(fuzzy_low(max, min, max), 0.0);
        prop_assert_eq!(fuzzy_high(min, min, max), 0.0);
        prop_assert_eq!(fuzzy_high(max, min, max), 1.0);
        prop_assert_eq!(fuzzy_medium(min, min, mid, max), 0.0);
        prop_assert_eq!(fuzzy_medium(mid, min, mid, max), 1.0);
        prop_assert_eq!(fuzzy_medium(max, min, mid, max), 0.0);
    }
}
