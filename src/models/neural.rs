//! Fixed-weight feedforward scorer.
//!
//! Topology: 4 inputs → 4 hidden ReLU units → 1 output, with a direct skip
//! term from `growth` added between two tanh stages:
//!
//! ```text
//! h[i]  = relu(b1[i] + g*W1g[i] + v*W1v[i] + e*W1e[i] + n*W1n[i])
//! out   = b2 + Σ h[i] * W2[i]
//! z     = tanh(out * 1.2) + growth * 0.15
//! score = tanh(z)
//! ```
//!
//! The weights are constants, not learned. Sums are accumulated in the order
//! shown above so results are reproducible bit-for-bit.

use crate::domain::{NeuralOutput, NormalizedFeatures};
use crate::math::relu;

pub const HIDDEN: usize = 4;

/// Immutable network parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkWeights {
    /// Input → hidden weights, one array per input feature, indexed by hidden unit.
    pub w1_growth: [f64; HIDDEN],
    pub w1_volatility: [f64; HIDDEN],
    pub w1_economic: [f64; HIDDEN],
    pub w1_industry: [f64; HIDDEN],
    pub b1: [f64; HIDDEN],
    /// Hidden → output weights.
    pub w2: [f64; HIDDEN],
    pub b2: f64,
    /// Gain applied to the output sum before the first tanh.
    pub output_gain: f64,
    /// Weight of the growth skip connection.
    pub growth_skip: f64,
}

impl NetworkWeights {
    pub const DEFAULT: NetworkWeights = NetworkWeights {
        w1_growth: [0.40, -0.15, 0.25, 0.30],
        w1_volatility: [-0.25, -0.30, 0.10, -0.20],
        w1_economic: [0.30, 0.35, -0.10, 0.25],
        w1_industry: [0.25, 0.20, 0.30, 0.15],
        b1: [0.10, -0.05, 0.15, 0.08],
        w2: [0.35, 0.30, 0.20, 0.15],
        b2: 0.05,
        output_gain: 1.2,
        growth_skip: 0.15,
    };
}

impl Default for NetworkWeights {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Score features with the built-in weights.
pub fn score(features: &NormalizedFeatures) -> NeuralOutput {
    score_with(features, &NetworkWeights::DEFAULT)
}

pub fn score_with(x: &NormalizedFeatures, w: &NetworkWeights) -> NeuralOutput {
    let mut hidden = [0.0; HIDDEN];
    let mut out = w.b2;

    for i in 0..HIDDEN {
        let s = w.b1[i]
            + x.growth * w.w1_growth[i]
            + x.volatility * w.w1_volatility[i]
            + x.economic * w.w1_economic[i]
            + x.industry * w.w1_industry[i];
        hidden[i] = relu(s);
        out += hidden[i] * w.w2[i];
    }

    let z = (out * w.output_gain).tanh() + x.growth * w.growth_skip;

    NeuralOutput {
        hidden,
        pre_activation: out,
        score: z.tanh(),
    }
}
