//! Configuration loading and validation.
//!
//! All values are read from environment variables at startup. The process
//! exits with a clear error message if a required variable is missing or
//! invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    Json,
    /// Human-readable multi-line output.
    Pretty,
}

/// Validated service configuration.
#[derive(Clone, Deserialize)]
pub struct Config {
    /// 32-byte encryption key, base64 or hex encoded. **Required.**
    pub encryption_key: String,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log output format: `json` or `pretty`.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".into()
}
fn default_log_format() -> LogFormat {
    LogFormat::Json
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any required variable is absent or cannot be parsed.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    /// Load and validate configuration from an explicit environment source.
    ///
    /// # Errors
    ///
    /// See [`Config::from_env`].
    pub fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration (is ENCRYPTION_KEY set?)")?;

        c.validate()?;
        Ok(c)
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        ensure_non_empty(&self.encryption_key, "ENCRYPTION_KEY")?;
        ensure_non_empty(&self.log_level, "LOG_LEVEL")?;
        Ok(())
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("encryption_key", &"[REDACTED]")
            .field("log_level", &self.log_level)
            .field("log_format", &self.log_format)
            .finish()
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} is required and must not be empty");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        config::Environment::default().source(Some(map))
    }

    #[test]
    fn defaults_are_correct() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_log_format(), LogFormat::Json);
    }

    #[test]
    fn loads_key_and_defaults() {
        let cfg = Config::from_environment(env(&[("ENCRYPTION_KEY", "abc")])).unwrap();
        assert_eq!(cfg.encryption_key, "abc");
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn loads_overrides() {
        let cfg = Config::from_environment(env(&[
            ("ENCRYPTION_KEY", "abc"),
            ("LOG_LEVEL", "debug"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn missing_key_is_an_error() {
        assert!(Config::from_environment(env(&[("LOG_LEVEL", "info")])).is_err());
    }

    #[test]
    fn unknown_log_format_is_an_error() {
        assert!(Config::from_environment(env(&[
            ("ENCRYPTION_KEY", "abc"),
            ("LOG_FORMAT", "xml"),
        ]))
        .is_err());
    }

    #[test]
    fn validate_rejects_blank_key() {
        let cfg = Config {
            encryption_key: "   ".into(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn debug_redacts_key() {
        let cfg = Config {
            encryption_key: "c2VjcmV0".into(),
            log_level: default_log_level(),
            log_format: default_log_format(),
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("c2VjcmV0"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
