use std::process::ExitCode;

fn main() -> ExitCode {
    match market_sentiment::app::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, exit_code = err.exit_code(), "Command failed");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
