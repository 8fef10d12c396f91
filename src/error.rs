//! Crate-wide error type.
//!
//! Every variant maps to a process exit code so `main` can report failures the
//! same way regardless of which command produced them. The scoring pipeline
//! itself never returns an error; only the outer layers (validation, files,
//! terminal, batch statistics) do.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid command-line usage or option combination.
    #[error("{0}")]
    Usage(String),

    /// A raw input was rejected by validation.
    #[error("Invalid input '{field}': {reason}")]
    InvalidInput { field: &'static str, reason: String },

    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON encode/decode failure.
    #[error("{0}")]
    Format(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A computation produced values the caller cannot use (e.g. all non-finite).
    #[error("{0}")]
    Numeric(String),
}

impl AppError {
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(message.into())
    }

    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn terminal(message: impl std::fmt::Display) -> Self {
        Self::Terminal(message.to_string())
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage(_) | AppError::Io { .. } | AppError::Format(_) => 2,
            AppError::InvalidInput { .. } => 3,
            AppError::Terminal(_) | AppError::Numeric(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_by_category() {
        assert_eq!(AppError::usage("x").exit_code(), 2);
        assert_eq!(AppError::invalid_input("current_value", "must be > 0").exit_code(), 3);
        assert_eq!(AppError::terminal("boom").exit_code(), 4);
    }

    #[test]
    fn invalid_input_message_names_field() {
        let err = AppError::invalid_input("growth_percent", "must be finite");
        assert_eq!(err.to_string(), "Invalid input 'growth_percent': must be finite");
    }
}
