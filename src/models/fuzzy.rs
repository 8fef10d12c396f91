//! Fuzzy inference over the neural score, volatility, and economic features.
//!
//! Steps:
//!
//! 1. grade each variable against its low/medium/high membership shapes
//! 2. pick each variable's dominant state (ties favour high, then medium)
//! 3. look up the base output for the state triple in the rule table
//! 4. hedge the base output toward 0.5 by the activation degree (the weakest of
//!    the three best-fit memberships) and derive a certainty from it
//!
//! Everything here is pure arithmetic over constants; NaN inputs produce NaN
//! outputs rather than errors.

use crate::domain::{FuzzyResult, FuzzyTrace, Grades, Level, Outlook, RuleKey};
use crate::math::{fuzzy_high, fuzzy_low, fuzzy_medium, max3, min_nan};
use crate::models::rules::RuleTable;

/// Breakpoints of one variable's three membership functions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariableShape {
    /// `(min, max)` of the low shoulder.
    pub low: (f64, f64),
    /// `(min, mid, max)` of the medium peak.
    pub medium: (f64, f64, f64),
    /// `(min, max)` of the high shoulder.
    pub high: (f64, f64),
}

impl VariableShape {
    pub fn grade(&self, x: f64) -> Grades {
        Grades {
            low: fuzzy_low(x, self.low.0, self.low.1),
            medium: fuzzy_medium(x, self.medium.0, self.medium.1, self.medium.2),
            high: fuzzy_high(x, self.high.0, self.high.1),
        }
    }
}

/// Breakpoints for all three variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Breakpoints {
    /// Applied to the neural score, not the raw growth feature.
    pub growth: VariableShape,
    pub volatility: VariableShape,
    /// `high` reads as positive, `medium` as neutral, `low` as negative.
    pub economic: VariableShape,
}

impl Breakpoints {
    pub const DEFAULT: Breakpoints = Breakpoints {
        growth: VariableShape {
            low: (-0.6, 0.2),
            medium: (-0.2, 0.5, 0.85),
            high: (0.3, 1.0),
        },
        volatility: VariableShape {
            low: (0.0, 0.35),
            medium: (0.25, 0.5, 0.75),
            high: (0.65, 1.0),
        },
        economic: VariableShape {
            low: (0.0, 0.6),
            medium: (0.2, 0.5, 0.8),
            high: (0.4, 1.0),
        },
    };
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Hedging and certainty constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InferenceParams {
    /// Exponent on the activation when hedging toward 0.5.
    pub hedge_exponent: f64,
    /// `certainty = min(1, activation * certainty_gain)`.
    pub certainty_gain: f64,
    /// `crisp = adjusted * (crisp_floor + certainty * crisp_weight)`.
    pub crisp_floor: f64,
    pub crisp_weight: f64,
}

impl InferenceParams {
    pub const DEFAULT: InferenceParams = InferenceParams {
        hedge_exponent: 0.85,
        certainty_gain: 1.2,
        crisp_floor: 0.85,
        crisp_weight: 0.15,
    };
}

impl Default for InferenceParams {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Complete rule-engine configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FuzzyEngine {
    pub breakpoints: Breakpoints,
    pub rules: RuleTable,
    pub params: InferenceParams,
}

impl Grades {
    /// Dominant level: high if it is at least both others, else medium if it
    /// is at least low, else low. Any NaN comparison falls through to low.
    pub fn dominant(&self) -> Level {
        if self.high >= self.medium && self.high >= self.low {
            Level::High
        } else if self.medium >= self.low {
            Level::Medium
        } else {
            Level::Low
        }
    }

    /// Best-fit membership degree.
    pub fn best(&self) -> f64 {
        max3(self.low, self.medium, self.high)
    }
}

impl FuzzyEngine {
    pub const DEFAULT: FuzzyEngine = FuzzyEngine {
        breakpoints: Breakpoints::DEFAULT,
        rules: RuleTable::DEFAULT,
        params: InferenceParams::DEFAULT,
    };

    pub fn infer(&self, score: f64, volatility: f64, economic: f64) -> FuzzyTrace {
        let growth_grades = self.breakpoints.growth.grade(score);
        let volatility_grades = self.breakpoints.volatility.grade(volatility);
        let economic_grades = self.breakpoints.economic.grade(economic);

        tracing::trace!(
            score,
            growth = ?growth_grades,
            volatility = ?volatility_grades,
            economic = ?economic_grades,
            "Membership grades"
        );

        let rule = RuleKey {
            growth: growth_grades.dominant(),
            volatility: volatility_grades.dominant(),
            economic: Outlook::from(economic_grades.dominant()),
        };
        let rule_output = self.rules.lookup(rule);

        let activation = min_nan(
            min_nan(growth_grades.best(), volatility_grades.best()),
            economic_grades.best(),
        );

        let p = &self.params;
        let adjusted = 0.5 + (rule_output - 0.5) * activation.powf(p.hedge_exponent);
        let certainty = min_nan(1.0, activation * p.certainty_gain);
        let crisp = adjusted * (p.crisp_floor + certainty * p.crisp_weight);

        FuzzyTrace {
            growth: growth_grades,
            volatility: volatility_grades,
            economic: economic_grades,
            rule,
            rule_output,
            activation,
            adjusted,
            result: FuzzyResult { crisp, certainty },
        }
    }
}

/// Run inference with the built-in engine.
pub fn infer(score: f64, volatility: f64, economic: f64) -> FuzzyTrace {
    FuzzyEngine::DEFAULT.infer(score, volatility, economic)
}
