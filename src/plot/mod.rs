//! Terminal plots (ASCII). The TUI draws its own chart with plotters.

pub mod ascii;

pub use ascii::{render_projection_plot, render_sweep_plot};
