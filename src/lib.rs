//! `market-sentiment` library crate.
//!
//! The binary (`msent`) is a thin wrapper around this library so that:
//!
//! - the scoring pipeline is testable without spawning processes
//! - the core stays reusable outside the CLI/TUI (batch jobs, notebooks, etc.)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod scenario;
pub mod tui;
