//! Shared domain types.
//!
//! These types are plain `Copy` values so they can be:
//!
//! - passed through the scoring stages without ownership concerns
//! - exported to JSON/CSV
//! - reloaded later for plotting

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The six scalars supplied by the input collaborator (form, CLI, TUI).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    /// Monetary value today (expected > 0).
    pub current_value: f64,
    /// Expected growth in percent, roughly `[-50, 50]`.
    pub growth_percent: f64,
    /// Volatility in percent, `[0, 100]`.
    pub volatility_percent: f64,
    /// Economic indicator, roughly `[-10, 10]`.
    pub economic_index: f64,
    /// Industry trend indicator, roughly `[-5, 5]`.
    pub industry_trend_index: f64,
    /// Number of compounding periods.
    pub horizon_periods: u32,
}

impl RawInputs {
    /// Reject inputs the scoring pipeline would silently turn into non-finite
    /// or meaningless output.
    ///
    /// The pipeline itself never calls this; callers decide whether to enforce it.
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("current_value", self.current_value),
            ("growth_percent", self.growth_percent),
            ("volatility_percent", self.volatility_percent),
            ("economic_index", self.economic_index),
            ("industry_trend_index", self.industry_trend_index),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(AppError::invalid_input(name, format!("must be finite, got {value}")));
            }
        }
        if self.current_value <= 0.0 {
            return Err(AppError::invalid_input(
                "current_value",
                format!("must be > 0, got {}", self.current_value),
            ));
        }
        Ok(())
    }

    /// Read one of the real-valued inputs.
    pub fn get(&self, axis: InputAxis) -> f64 {
        match axis {
            InputAxis::Current => self.current_value,
            InputAxis::Growth => self.growth_percent,
            InputAxis::Volatility => self.volatility_percent,
            InputAxis::Economic => self.economic_index,
            InputAxis::Industry => self.industry_trend_index,
        }
    }

    /// Copy with one real-valued input replaced.
    pub fn with(mut self, axis: InputAxis, value: f64) -> Self {
        match axis {
            InputAxis::Current => self.current_value = value,
            InputAxis::Growth => self.growth_percent = value,
            InputAxis::Volatility => self.volatility_percent = value,
            InputAxis::Economic => self.economic_index = value,
            InputAxis::Industry => self.industry_trend_index = value,
        }
        self
    }
}

/// Real-valued input selector used by sweeps and sensitivity reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputAxis {
    Current,
    Growth,
    Volatility,
    Economic,
    Industry,
}

impl InputAxis {
    /// The four market-condition inputs (everything except the current value).
    pub const MARKET: [InputAxis; 4] = [
        InputAxis::Growth,
        InputAxis::Volatility,
        InputAxis::Economic,
        InputAxis::Industry,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            InputAxis::Current => "current value",
            InputAxis::Growth => "growth %",
            InputAxis::Volatility => "volatility %",
            InputAxis::Economic => "economic index",
            InputAxis::Industry => "industry trend",
        }
    }
}

/// Raw inputs rescaled into `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedFeatures {
    pub growth: f64,
    pub volatility: f64,
    pub economic: f64,
    pub industry: f64,
}

/// Scorer output together with its intermediate activations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeuralOutput {
    /// ReLU activations of the hidden layer.
    pub hidden: [f64; 4],
    /// Output-layer sum before the tanh stages.
    pub pre_activation: f64,
    /// Final score in `(-1, 1)`.
    pub score: f64,
}

/// Linguistic level for the growth and volatility variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    pub fn index(self) -> usize {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "low",
            Level::Medium => "medium",
            Level::High => "high",
        }
    }
}

/// Linguistic polarity for the economic variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Positive,
    Neutral,
    Negative,
}

impl Outlook {
    pub const ALL: [Outlook; 3] = [Outlook::Positive, Outlook::Neutral, Outlook::Negative];

    pub fn index(self) -> usize {
        match self {
            Outlook::Positive => 0,
            Outlook::Neutral => 1,
            Outlook::Negative => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outlook::Positive => "positive",
            Outlook::Neutral => "neutral",
            Outlook::Negative => "negative",
        }
    }
}

/// Economic memberships are graded on the same low/medium/high shapes:
/// high reads as positive, low as negative.
impl From<Level> for Outlook {
    fn from(value: Level) -> Self {
        match value {
            Level::High => Outlook::Positive,
            Level::Medium => Outlook::Neutral,
            Level::Low => Outlook::Negative,
        }
    }
}

pub type GrowthState = Level;
pub type VolatilityState = Level;
pub type EconomicState = Outlook;

/// Membership degrees of one variable in its three fuzzy sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Grades {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

/// Key into the rule table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub growth: GrowthState,
    pub volatility: VolatilityState,
    pub economic: EconomicState,
}

/// Defuzzified output of the rule engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyResult {
    pub crisp: f64,
    /// Rule-firing confidence in `[0, 1]`.
    pub certainty: f64,
}

/// Everything the rule engine computed on the way to its result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuzzyTrace {
    pub growth: Grades,
    pub volatility: Grades,
    /// Economic memberships as `low = negative`, `medium = neutral`, `high = positive`.
    pub economic: Grades,
    pub rule: RuleKey,
    /// Table value for `rule` before hedging.
    pub rule_output: f64,
    /// Weakest best-fit membership across the three variables.
    pub activation: f64,
    /// Rule output hedged toward 0.5 by the activation.
    pub adjusted: f64,
    pub result: FuzzyResult,
}

/// Terminal artifact handed to the output collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub final_value: f64,
    pub low_bound: f64,
    pub high_bound: f64,
    pub growth_rate_percent: f64,
}

/// Projection intermediates plus the result.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Sentiment-driven per-period multiplier before the industry boost.
    pub base_multiplier: f64,
    pub industry_boost: f64,
    /// Effective compounding factor per period: `base * (1 + boost)`.
    pub period_multiplier: f64,
    /// Relative half-width of the uncertainty band.
    pub band: f64,
    pub result: PredictionResult,
}

/// One point of the per-period projection path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub period: u32,
    pub value: f64,
    pub low: f64,
    pub high: f64,
}

/// Full trace of a single pipeline invocation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub inputs: RawInputs,
    pub features: NormalizedFeatures,
    pub neural: NeuralOutput,
    pub fuzzy: FuzzyTrace,
    pub projection: Projection,
}

impl Prediction {
    pub fn result(&self) -> PredictionResult {
        self.projection.result
    }

    pub fn fuzzy_result(&self) -> FuzzyResult {
        self.fuzzy.result
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// A saved prediction file (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionFile {
    pub tool: String,
    /// When the file was written (RFC 3339 on disk).
    pub generated_at: DateTime<Utc>,
    pub prediction: Prediction,
    pub path: Vec<PathPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawInputs {
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
    fn validate_accepts_reasonable_inputs() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_finite_and_non_positive_current() {
        let err = sample().with(InputAxis::Economic, f64::NAN).validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { field: "economic_index", .. }));

        let err = sample().with(InputAxis::Current, 0.0).validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { field: "current_value", .. }));
    }

    #[test]
    fn with_replaces_only_the_selected_axis() {
        let base = sample();
        let moved = base.with(InputAxis::Industry, -2.0);
        assert_eq!(moved.industry_trend_index, -2.0);
        assert_eq!(moved.get(InputAxis::Growth), base.growth_percent);
        assert_eq!(moved.horizon_periods, base.horizon_periods);
    }

    #[test]
    fn outlook_follows_level_ordering() {
        assert_eq!(Outlook::from(Level::High), Outlook::Positive);
        assert_eq!(Outlook::from(Level::Medium), Outlook::Neutral);
        assert_eq!(Outlook::from(Level::Low), Outlook::Negative);
    }
}
