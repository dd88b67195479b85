//! Operator commands: seal and unseal stored values, scrub log files.

use std::io::{BufRead, Read, Write};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use crate::crypto::EncryptionService;

/// Command-line interface of the `token-vault` binary.
#[derive(Debug, Parser)]
#[command(name = "token-vault", version, about = "Encrypt stored tokens and scrub secrets from logs")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Read plaintext from stdin and print its encrypted frame.
    Encrypt,
    /// Read an encrypted frame from stdin and print its plaintext.
    Decrypt,
    /// Copy stdin to stdout with secrets redacted, line by line.
    Sanitize,
    /// Verify the configured key with an encrypt/decrypt round trip.
    Check,
}

/// Encrypt everything read from `input` (minus one trailing newline).
pub fn encrypt(svc: &EncryptionService, mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut plaintext = String::new();
    input
        .read_to_string(&mut plaintext)
        .context("failed to read plaintext from stdin")?;
    let plaintext = strip_line_ending(&plaintext);

    let frame = svc.encrypt(plaintext).context("encryption failed")?;
    writeln!(output, "{frame}").context("failed to write encrypted frame")?;
    info!(plaintext_len = plaintext.len(), "value encrypted");
    Ok(())
}

/// Decrypt a frame read from `input`.
///
/// Writes nothing when no value is stored. An integrity failure is returned
/// as an error.
pub fn decrypt(svc: &EncryptionService, mut input: impl Read, mut output: impl Write) -> Result<()> {
    let mut encoded = String::new();
    input
        .read_to_string(&mut encoded)
        .context("failed to read encrypted frame from stdin")?;

    match svc.decrypt(Some(encoded.trim())) {
        Ok(Some(plaintext)) => {
            writeln!(output, "{plaintext}").context("failed to write plaintext")?;
            info!("value decrypted");
            Ok(())
        }
        Ok(None) => {
            info!("no encrypted value present");
            Ok(())
        }
        Err(e) => {
            error!(error = e.code(), "decryption failed");
            Err(e).context("stored value could not be decrypted")
        }
    }
}

/// Redact every line of `input` into `output`.
///
/// JSON object lines are redacted structurally, other lines textually.
pub fn sanitize(input: impl BufRead, mut output: impl Write) -> Result<()> {
    for line in input.lines() {
        let line = line.context("failed to read log line")?;
        let cleaned = log_sanitizer::sanitize_line(&line);
        writeln!(output, "{cleaned}").context("failed to write sanitized line")?;
    }
    output.flush().context("failed to flush output")?;
    Ok(())
}

/// Confirm the loaded key can encrypt and decrypt.
pub fn check(svc: &EncryptionService) -> Result<()> {
    const PROBE: &str = "token-vault self-check";

    let frame = svc.encrypt(PROBE).context("self-check encryption failed")?;
    let recovered = svc
        .decrypt_str(&frame)
        .context("self-check decryption failed")?;
    if recovered.as_deref() != Some(PROBE) {
        anyhow::bail!("self-check round trip returned a different value");
    }
    info!("encryption key self-check passed");
    Ok(())
}

fn strip_line_ending(s: &str) -> &str {
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}
