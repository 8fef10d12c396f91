//! Export sweep and stress results to CSV.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::AppError;
use crate::scenario::{StressSummary, SweepResult};

/// Write one row per sweep point.
pub fn write_sweep_csv(path: &Path, sweep: &SweepResult) -> Result<(), AppError> {
    let mut file = BufWriter::new(File::create(path).map_err(|e| AppError::io(path, e))?);
    let axis = format!("{:?}", sweep.spec.axis).to_lowercase();

    writeln!(file, "axis,input,crisp,certainty,final_value,low_bound,high_bound,growth_rate_percent")
        .map_err(|e| AppError::io(path, e))?;

    for p in &sweep.points {
        let r = &p.result;
        writeln!(
            file,
            "{axis},{:.6},{:.10},{:.10},{:.4},{:.4},{:.4},{:.6}",
            p.input, p.crisp, p.certainty, r.final_value, r.low_bound, r.high_bound, r.growth_rate_percent,
        )
        .map_err(|e| AppError::io(path, e))?;
    }

    file.flush().map_err(|e| AppError::io(path, e))?;
    tracing::info!(path = %path.display(), rows = sweep.points.len(), "Wrote sweep CSV");
    Ok(())
}

/// Write one row per stress sample (perturbed inputs and outputs).
pub fn write_stress_csv(path: &Path, summary: &StressSummary) -> Result<(), AppError> {
    let mut file = BufWriter::new(File::create(path).map_err(|e| AppError::io(path, e))?);

    writeln!(
        file,
        "sample,growth_percent,volatility_percent,economic_index,industry_trend_index,final_value,low_bound,high_bound,growth_rate_percent"
    )
    .map_err(|e| AppError::io(path, e))?;

    for (i, s) in summary.samples.iter().enumerate() {
        let x = &s.inputs;
        let r = &s.result;
        writeln!(
            file,
            "{i},{:.6},{:.6},{:.6},{:.6},{:.4},{:.4},{:.4},{:.6}",
            x.growth_percent,
            x.volatility_percent,
            x.economic_index,
            x.industry_trend_index,
            r.final_value,
            r.low_bound,
            r.high_bound,
            r.growth_rate_percent,
        )
        .map_err(|e| AppError::io(path, e))?;
    }

    file.flush().map_err(|e| AppError::io(path, e))?;
    tracing::info!(path = %path.display(), rows = summary.samples.len(), "Wrote stress CSV");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{InputAxis, RawInputs};
    use crate::scenario::{SweepSpec, run_sweep};

    #[test]
    fn sweep_csv_has_header_and_one_row_per_point() {
        let base = RawInputs {
            current_value: 1000.0,
            growth_percent: 20.0,
            volatility_percent: 10.0,
            economic_index: 3.0,
            industry_trend_index: 1.0,
            horizon_periods: 5,
        };
        let sweep = run_sweep(
            &base,
            &SweepSpec {
                axis: InputAxis::Growth,
                from: -10.0,
                to: 10.0,
                steps: 3,
            },
        )
        .unwrap();

        let path = std::env::temp_dir().join(format!("msent-sweep-{}.csv", std::process::id()));
        write_sweep_csv(&path, &sweep).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("axis,input,"));
        assert!(lines[1].starts_with("growth,-10.000000,"));
        assert!(lines[3].starts_with("growth,10.000000,"));
    }
}
