//! The 27-entry fuzzy rule table.
//!
//! Growth dominates, then volatility, then economic polarity. The table is a
//! dense array indexed by the three linguistic states, so every entry can be
//! listed and checked individually.

use crate::domain::{Level, Outlook, RuleKey};

/// `[growth][volatility][economic]` with levels ordered low, medium, high and
/// outlooks ordered positive, neutral, negative.
const DEFAULT_OUTPUTS: [[[f64; 3]; 3]; 3] = [
    // growth: low
    [
        [0.45, 0.35, 0.25], // volatility: low
        [0.32, 0.22, 0.15], // volatility: medium
        [0.20, 0.12, 0.05], // volatility: high
    ],
    // growth: medium
    [
        [0.80, 0.72, 0.62],
        [0.68, 0.55, 0.42],
        [0.50, 0.38, 0.28],
    ],
    // growth: high
    [
        [0.95, 0.90, 0.82],
        [0.85, 0.78, 0.68],
        [0.70, 0.60, 0.48],
    ],
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleTable {
    outputs: [[[f64; 3]; 3]; 3],
}

impl RuleTable {
    pub const DEFAULT: RuleTable = RuleTable {
        outputs: DEFAULT_OUTPUTS,
    };

    /// Base crisp value for a rule.
    pub fn lookup(&self, key: RuleKey) -> f64 {
        self.outputs[key.growth.index()][key.volatility.index()][key.economic.index()]
    }

    /// All rules in display order: growth high→low, volatility low→high,
    /// economic positive→negative.
    pub fn entries(&self) -> Vec<(RuleKey, f64)> {
        let mut out = Vec::with_capacity(27);
        for growth in Level::ALL.into_iter().rev() {
            for volatility in Level::ALL {
                for economic in Outlook::ALL {
                    let key = RuleKey {
                        growth,
                        volatility,
                        economic,
                    };
                    out.push((key, self.lookup(key)));
                }
            }
        }
        out
    }

    /// Smallest and largest table value.
    pub fn range(&self) -> (f64, f64) {
        self.entries()
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), (_, v)| (lo.min(*v), hi.max(*v)))
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::DEFAULT
    }
}
