//! Tracing subscriber initialisation.

use anyhow::{Context, Result};
use log_sanitizer::SanitizingMakeWriter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LogFormat;

/// Initialise the global tracing subscriber.
///
/// Configures:
/// - An [`EnvFilter`] from `RUST_LOG`, falling back to `log_level`.
/// - A JSON or pretty [`fmt`] layer writing to stderr through a
///   [`SanitizingMakeWriter`], so structured fields and free-form messages
///   are redacted before output.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been set.
pub fn init(log_level: &str, format: LogFormat) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let writer = SanitizingMakeWriter::new(std::io::stderr);
    let (json_layer, pretty_layer) = match format {
        LogFormat::Json => (Some(fmt::layer().json().with_writer(writer)), None),
        LogFormat::Pretty => (
            None,
            Some(fmt::layer().pretty().with_ansi(false).with_writer(writer)),
        ),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
        .try_init()
        .context("failed to initialise tracing subscriber")?;

    Ok(())
}
