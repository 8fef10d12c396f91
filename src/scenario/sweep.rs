//! One-dimensional input sweeps.
//!
//! A sweep holds every input fixed except one, which walks a linear grid. The
//! grid points are evaluated independently in parallel and returned in grid
//! order, so the output is the same regardless of thread scheduling.

use rayon::prelude::*;
use serde::Serialize;

use crate::app::pipeline::predict;
use crate::domain::{InputAxis, PredictionResult, RawInputs};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSpec {
    pub axis: InputAxis,
    pub from: f64,
    pub to: f64,
    /// Number of grid points including both endpoints.
    pub steps: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    /// Value of the swept raw input.
    pub input: f64,
    pub crisp: f64,
    pub certainty: f64,
    pub result: PredictionResult,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SweepResult {
    pub spec: SweepSpec,
    pub base: RawInputs,
    pub points: Vec<SweepPoint>,
}

impl SweepResult {
    /// True if the final value never decreases along the grid.
    pub fn is_non_decreasing(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[1].result.final_value >= w[0].result.final_value)
    }

    /// Grid inputs where the final value drops relative to the previous point.
    pub fn decreases(&self) -> Vec<f64> {
        self.points
            .windows(2)
            .filter(|w| w[1].result.final_value < w[0].result.final_value)
            .map(|w| w[1].input)
            .collect()
    }
}

/// Generate `steps` evenly spaced points between `from` and `to` (inclusive).
pub fn lin_space(from: f64, to: f64, steps: usize) -> Result<Vec<f64>, AppError> {
    if !(from.is_finite() && to.is_finite() && to > from) {
        return Err(AppError::usage(format!(
            "Invalid sweep range: from={from}, to={to} (must be finite and to>from)."
        )));
    }
    if steps < 2 {
        return Err(AppError::usage("Sweep steps must be >= 2."));
    }

    let step = (to - from) / (steps as f64 - 1.0);
    let mut out = Vec::with_capacity(steps);
    for i in 0..steps - 1 {
        out.push(from + step * i as f64);
    }
    out.push(to);
    Ok(out)
}

pub fn run_sweep(base: &RawInputs, spec: &SweepSpec) -> Result<SweepResult, AppError> {
    let grid = lin_space(spec.from, spec.to, spec.steps)?;

    let points: Vec<SweepPoint> = grid
        .par_iter()
        .map(|&input| {
            let prediction = predict(&base.with(spec.axis, input));
            SweepPoint {
                input,
                crisp: prediction.fuzzy.result.crisp,
                certainty: prediction.fuzzy.result.certainty,
                result: prediction.result(),
            }
        })
        .collect();

    tracing::info!(
        axis = ?spec.axis,
        from = spec.from,
        to = spec.to,
        steps = spec.steps,
        "Sweep complete"
    );

    Ok(SweepResult {
        spec: *spec,
        base: *base,
        points,
    })
}
