//! Command-line parsing for the market sentiment predictor.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the scoring code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{InputAxis, LogFormat, RawInputs};
use crate::error::AppError;
use crate::scenario::{StressConfig, SweepSpec};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "msent", version, about = "Market sentiment predictor (neural score + fuzzy rules)")]
pub struct Cli {
    /// Log level or filter directive (overrides MARKET_SENTIMENT_LOG; RUST_LOG wins over both).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Log output format.
    #[arg(long, global = true, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Currency symbol for reports (overrides MARKET_SENTIMENT_CURRENCY).
    #[arg(long, global = true)]
    pub currency: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Predict one scenario and print the result (optionally plot/export).
    Predict(PredictArgs),
    /// Print every pipeline stage for one scenario.
    Explain(InputArgs),
    /// Print the fuzzy rule table.
    Rules,
    /// Vary one input over a range and tabulate the predictions.
    Sweep(SweepArgs),
    /// Monte-Carlo stress of the market inputs around one scenario.
    Stress(StressArgs),
    /// Plot the projection stored in a previously exported prediction JSON.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// The form starts from the given inputs and updates the prediction live.
    Tui(InputArgs),
}

/// The six scenario inputs.
#[derive(Debug, Args, Clone)]
pub struct InputArgs {
    /// Current value.
    #[arg(short = 'c', long, default_value_t = 1000.0, allow_negative_numbers = true)]
    pub current: f64,

    /// Expected growth (%), roughly -50..50.
    #[arg(short = 'g', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub growth: f64,

    /// Volatility (%), 0..100.
    #[arg(short = 'v', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub volatility: f64,

    /// Economic indicator, -10..10.
    #[arg(short = 'e', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub economic: f64,

    /// Industry trend, -5..5.
    #[arg(short = 'i', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub industry: f64,

    /// Number of periods to project.
    #[arg(short = 't', long, default_value_t = 1)]
    pub horizon: u32,

    /// Skip input validation; non-finite inputs then flow through as NaN/inf.
    #[arg(long)]
    pub unchecked: bool,
}

impl InputArgs {
    pub fn raw(&self) -> RawInputs {
        RawInputs {
            current_value: self.current,
            growth_percent: self.growth,
            volatility_percent: self.volatility,
            economic_index: self.economic,
            industry_trend_index: self.industry,
            horizon_periods: self.horizon,
        }
    }

    /// Raw inputs, validated unless `--unchecked` was given.
    pub fn checked(&self) -> Result<RawInputs, AppError> {
        let raw = self.raw();
        if self.unchecked {
            tracing::debug!("Input validation skipped (--unchecked)");
        } else {
            raw.validate()?;
        }
        Ok(raw)
    }
}

#[derive(Debug, Args, Clone)]
pub struct PredictArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Render an ASCII projection plot.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export the prediction (trace + projection path) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct SweepArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Input to vary.
    #[arg(long, value_enum, default_value_t = InputAxis::Growth)]
    pub axis: InputAxis,

    /// First grid value.
    #[arg(long, default_value_t = -50.0, allow_negative_numbers = true)]
    pub from: f64,

    /// Last grid value.
    #[arg(long, default_value_t = 50.0, allow_negative_numbers = true)]
    pub to: f64,

    /// Number of grid points (including both ends).
    #[arg(long, default_value_t = 21)]
    pub steps: usize,

    /// Skip the ASCII plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export sweep points to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

impl SweepArgs {
    pub fn spec(&self) -> SweepSpec {
        SweepSpec {
            axis: self.axis,
            from: self.from,
            to: self.to,
            steps: self.steps,
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct StressArgs {
    #[command(flatten)]
    pub inputs: InputArgs,

    /// Number of Monte-Carlo samples.
    #[arg(short = 'n', long, default_value_t = 1000)]
    pub samples: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Std-dev of growth noise (percentage points).
    #[arg(long, default_value_t = 5.0)]
    pub growth_sigma: f64,

    /// Std-dev of volatility noise (percentage points).
    #[arg(long, default_value_t = 5.0)]
    pub volatility_sigma: f64,

    /// Std-dev of economic-index noise.
    #[arg(long, default_value_t = 1.0)]
    pub economic_sigma: f64,

    /// Std-dev of industry-trend noise.
    #[arg(long, default_value_t = 0.5)]
    pub industry_sigma: f64,

    /// Export every sample to CSV.
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,
}

impl StressArgs {
    pub fn config(&self) -> StressConfig {
        StressConfig {
            samples: self.samples,
            seed: self.seed,
            growth_sigma: self.growth_sigma,
            volatility_sigma: self.volatility_sigma,
            economic_sigma: self.economic_sigma,
            industry_sigma: self.industry_sigma,
        }
    }
}

/// Options for plotting a saved prediction.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Prediction JSON file produced by `msent predict --export`.
    #[arg(long, value_name = "JSON")]
    pub file: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,
}
