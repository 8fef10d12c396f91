//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments and layers them over environment settings
//! - initializes logging
//! - runs the scoring pipeline or a batch scenario
//! - prints reports/plots and writes optional exports

use clap::Parser;

use crate::cli::{Command, InputArgs, PlotArgs, PredictArgs, StressArgs, SweepArgs};
use crate::config::Settings;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `msent` binary.
pub fn run() -> Result<(), AppError> {
    // We want `msent` and `msent -g 10` to behave like `msent tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let settings = apply_overrides(Settings::from_env(), &cli);

    // Log lines would tear the alternate screen, so the TUI runs silent unless
    // RUST_LOG asks otherwise.
    let level = match cli.command {
        Command::Tui(_) => "off",
        _ => settings.log_level.as_str(),
    };
    crate::logging::init(level, settings.log_format);

    match cli.command {
        Command::Predict(args) => handle_predict(args, &settings),
        Command::Explain(args) => handle_explain(args, &settings),
        Command::Rules => {
            print!("{}", crate::report::format_rules(&crate::models::RuleTable::default()));
            Ok(())
        }
        Command::Sweep(args) => handle_sweep(args, &settings),
        Command::Stress(args) => handle_stress(args, &settings),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => crate::tui::run(args.raw(), &settings),
    }
}

/// CLI flags win over environment values.
fn apply_overrides(mut settings: Settings, cli: &crate::cli::Cli) -> Settings {
    if let Some(currency) = &cli.currency {
        settings.currency = currency.clone();
    }
    if let Some(level) = &cli.log_level {
        settings.log_level = level.clone();
    }
    if let Some(format) = cli.log_format {
        settings.log_format = format;
    }
    settings
}

fn handle_predict(args: PredictArgs, settings: &Settings) -> Result<(), AppError> {
    let inputs = args.inputs.checked()?;
    let prediction = pipeline::predict(&inputs);

    print!("{}", crate::report::format_prediction(&prediction.result(), &settings.currency));

    if args.plot {
        let path = pipeline::path_for(&prediction);
        println!();
        print!("{}", crate::plot::render_projection_plot(&path, args.width, args.height));
    }

    if let Some(path) = &args.export {
        crate::io::write_prediction_json(path, &prediction)?;
    }
    Ok(())
}

fn handle_explain(args: InputArgs, settings: &Settings) -> Result<(), AppError> {
    let inputs = args.checked()?;
    let prediction = pipeline::predict(&inputs);
    print!("{}", crate::report::format_explain(&prediction, &settings.currency));
    Ok(())
}

fn handle_sweep(args: SweepArgs, settings: &Settings) -> Result<(), AppError> {
    let base = args.inputs.checked()?;
    let sweep = crate::scenario::run_sweep(&base, &args.spec())?;

    print!("{}", crate::report::format_sweep(&sweep, &settings.currency));
    if !args.no_plot {
        println!();
        print!("{}", crate::plot::render_sweep_plot(&sweep, args.width, args.height));
    }

    if let Some(path) = &args.export {
        crate::io::write_sweep_csv(path, &sweep)?;
    }
    Ok(())
}

fn handle_stress(args: StressArgs, settings: &Settings) -> Result<(), AppError> {
    let base = args.inputs.checked()?;
    let summary = crate::scenario::run_stress(&base, &args.config())?;

    print!("{}", crate::report::format_stress(&summary, &settings.currency));

    if let Some(path) = &args.export {
        crate::io::write_stress_csv(path, &summary)?;
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let record = crate::io::read_prediction_json(&args.file)?;
    println!(
        "Generated: {} by {}",
        record.generated_at.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        record.tool
    );
    print!("{}", crate::plot::render_projection_plot(&record.path, args.width, args.height));
    Ok(())
}

/// Rewrite argv so `msent` defaults to `msent tui`.
///
/// Rules:
/// - `msent`                      -> `msent tui`
/// - `msent -g 10 ...`            -> `msent tui -g 10 ...`
/// - `msent --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "predict" | "explain" | "rules" | "sweep" | "stress" | "plot" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(argv(&["msent"])), argv(&["msent", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["msent", "-g", "10"])),
            argv(&["msent", "tui", "-g", "10"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        assert_eq!(rewrite_args(argv(&["msent", "predict", "-g", "5"])), argv(&["msent", "predict", "-g", "5"]));
        assert_eq!(rewrite_args(argv(&["msent", "--help"])), argv(&["msent", "--help"]));
    }

    #[test]
    fn cli_flags_override_settings() {
        let cli = crate::cli::Cli::parse_from(["msent", "rules", "--currency", "€", "--log-level", "debug"]);
        let settings = apply_overrides(Settings::default(), &cli);
        assert_eq!(settings.currency, "€");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_format, crate::domain::LogFormat::Pretty);
    }
}
