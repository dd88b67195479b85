//! `token-vault` — binary entry point.
//!
//! `sanitize` runs immediately. Every other command follows the startup
//! sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise structured, sanitized logging.
//! 3. Parse the encryption key and build the [`EncryptionService`].
//! 4. Run the requested command.

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use token_vault::cli::{self, Cli, Command};
use token_vault::config::Config;
use token_vault::crypto::EncryptionService;
use token_vault::telemetry;

fn main() -> Result<()> {
    let args = Cli::parse();

    match args.command {
        // Log scrubbing needs neither configuration nor a key.
        Command::Sanitize => cli::sanitize(io::stdin().lock(), io::stdout().lock()),
        Command::Encrypt => {
            let svc = start(args.command)?;
            cli::encrypt(&svc, io::stdin().lock(), io::stdout().lock())
        }
        Command::Decrypt => {
            let svc = start(args.command)?;
            cli::decrypt(&svc, io::stdin().lock(), io::stdout().lock())
        }
        Command::Check => {
            let svc = start(args.command)?;
            cli::check(&svc)
        }
    }
}

/// Steps 1-3 of the startup sequence.
fn start(command: Command) -> Result<EncryptionService> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init(&cfg.log_level, cfg.log_format)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        command = ?command,
        "token-vault starting"
    );

    // -----------------------------------------------------------------------
    // 3. Key material
    // -----------------------------------------------------------------------
    EncryptionService::from_config(&cfg).context("ENCRYPTION_KEY is unusable")
}
