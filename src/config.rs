//! Runtime settings.
//!
//! Precedence, lowest first: built-in defaults, environment (optionally loaded
//! from `.env`), then CLI flags (applied by `app`).

use crate::domain::LogFormat;

pub const ENV_CURRENCY: &str = "MARKET_SENTIMENT_CURRENCY";
pub const ENV_LOG: &str = "MARKET_SENTIMENT_LOG";
pub const ENV_LOG_FORMAT: &str = "MARKET_SENTIMENT_LOG_FORMAT";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Symbol prefixed to monetary values in reports.
    pub currency: String,
    /// Base log level (`RUST_LOG` still wins when set).
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "₹".to_string(),
            log_level: "warn".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Settings {
    /// Load settings from the process environment, reading `.env` first if present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup. Unknown or empty values fall
    /// back to the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(currency) = lookup(ENV_CURRENCY).filter(|v| !v.trim().is_empty()) {
            settings.currency = currency.trim().to_string();
        }
        if let Some(level) = lookup(ENV_LOG).filter(|v| !v.trim().is_empty()) {
            settings.log_level = level.trim().to_lowercase();
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            match format.trim().to_lowercase().as_str() {
                "json" => settings.log_format = LogFormat::Json,
                "pretty" => settings.log_format = LogFormat::Pretty,
                _ => {}
            }
        }

        settings
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn empty_environment_yields_defaults() {
        let settings = Settings::from_lookup(|_| None);
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.currency, "₹");
    }

    #[test]
    fn environment_overrides_defaults() {
        let env: HashMap<&str, &str> = [
            (ENV_CURRENCY, "$"),
            (ENV_LOG, "DEBUG"),
            (ENV_LOG_FORMAT, "json"),
        ]
        .into_iter()
        .collect();

        let settings = Settings::from_lookup(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.currency, "$");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_format, LogFormat::Json);
    }

    #[test]
    fn unknown_log_format_is_ignored() {
        let settings = Settings::from_lookup(|k| (k == ENV_LOG_FORMAT).then(|| "xml".to_string()));
        assert_eq!(settings.log_format, LogFormat::Pretty);
    }
}
