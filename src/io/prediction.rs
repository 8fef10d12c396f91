//! Read/write prediction JSON files.
//!
//! A prediction file is the portable record of one pipeline run:
//! - the full stage trace (inputs, features, neural, fuzzy, projection)
//! - when it was produced
//! - the projection path, precomputed for quick plotting
//!
//! The schema is defined by `domain::PredictionFile`. Non-finite numbers are
//! written as `null` by serde_json and will not read back; validated runs
//! never produce them.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};

use crate::app::pipeline::path_for;
use crate::domain::{Prediction, PredictionFile};
use crate::error::AppError;

pub const TOOL_NAME: &str = "msent";

/// Assemble the file record for a prediction.
pub fn prediction_file(prediction: &Prediction, generated_at: DateTime<Utc>) -> PredictionFile {
    PredictionFile {
        tool: TOOL_NAME.to_string(),
        generated_at,
        prediction: *prediction,
        path: path_for(prediction),
    }
}

/// Write a prediction JSON file stamped with the current time.
pub fn write_prediction_json(path: &Path, prediction: &Prediction) -> Result<(), AppError> {
    let record = prediction_file(prediction, Utc::now());
    let file = File::create(path).map_err(|e| AppError::io(path, e))?;

    write_record(BufWriter::new(file), &record, path)?;

    tracing::info!(path = %path.display(), points = record.path.len(), "Wrote prediction JSON");
    Ok(())
}

/// Serialize into `writer` and flush it, so buffered write errors surface here.
fn write_record<W: Write>(mut writer: W, record: &PredictionFile, path: &Path) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut writer, record).map_err(|e| {
        if e.is_io() {
            AppError::io(path, e.into())
        } else {
            AppError::Format(format!("Failed to write prediction JSON: {e}"))
        }
    })?;
    writer.flush().map_err(|e| AppError::io(path, e))
}

/// Read a prediction JSON file.
pub fn read_prediction_json(path: &Path) -> Result<PredictionFile, AppError> {
    let file = File::open(path).map_err(|e| AppError::io(path, e))?;
    let record: PredictionFile = serde_json::from_reader(file)
        .map_err(|e| AppError::Format(format!("Invalid prediction JSON '{}': {e}", path.display())))?;
    Ok(record)
}

#[cfg(test)]
mod tests {
    use std::io;

    use chrono::TimeZone;

    use super::*;
    use crate::app::pipeline::predict;
    use crate::domain::RawInputs;

    fn reference() -> Prediction {
        predict(&RawInputs {
            current_value: 1000.0,
            growth_percent: 20.0,
            volatility_percent: 10.0,
            economic_index: 3.0,
            industry_trend_index: 1.0,
            horizon_periods: 5,
        })
    }

    /// Accepts nothing, like a full disk.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::other("No space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn file_record_carries_timestamp_and_path() {
        let at = Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap();
        let record = prediction_file(&reference(), at);
        assert_eq!(record.tool, "msent");
        assert_eq!(record.generated_at, at);
        assert_eq!(record.path.len(), 6);
        assert_eq!(record.path[5].value, record.prediction.result().final_value);

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"generated_at\":\"2025-03-14T09:26:53Z\""));
    }

    #[test]
    fn write_then_read_preserves_the_prediction() {
        let path = std::env::temp_dir().join(format!("msent-prediction-{}.json", std::process::id()));
        let prediction = reference();

        write_prediction_json(&path, &prediction).unwrap();
        let back = read_prediction_json(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(back.prediction.inputs, prediction.inputs);
        assert_eq!(back.prediction.fuzzy.rule, prediction.fuzzy.rule);
        let (a, b) = (back.prediction.result(), prediction.result());
        assert!((a.final_value - b.final_value).abs() < 1e-9);
        assert!((a.low_bound - b.low_bound).abs() < 1e-9);
        assert!(back.generated_at <= Utc::now());
    }

    #[test]
    fn buffered_write_failure_is_reported() {
        let record = prediction_file(&reference(), Utc::now());
        // Small records sit in the buffer, so the failure may only show up on flush.
        let err = write_record(BufWriter::new(FullDisk), &record, Path::new("/dev/full")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn writing_to_a_full_device_fails() {
        let err = write_prediction_json(Path::new("/dev/full"), &reference()).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = read_prediction_json(Path::new("/nonexistent/msent.json")).unwrap_err();
        assert!(matches!(err, AppError::Io { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}
