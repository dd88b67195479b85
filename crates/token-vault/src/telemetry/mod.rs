//! Structured logging setup.
//!
//! Every formatted line passes through [`log_sanitizer`] before it reaches
//! stderr.
//!
//! # Telemetry invariants
//!
//! - **No key material or decrypted plaintext** may appear in any span
//!   attribute or log field.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`); `RUST_LOG`
//!   takes precedence when set.

pub mod init;

pub use init::init;
