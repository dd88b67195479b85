//! Encryption at rest for third-party access tokens, with redacted logging.
//!
//! - [`crypto`] loads the 256-bit key and seals/unseals stored values with
//!   AES-256-GCM.
//! - [`config`] reads the key and log settings from the environment.
//! - [`telemetry`] installs a tracing subscriber whose output is scrubbed by
//!   [`log_sanitizer`].
//! - [`cli`] holds the operator commands behind the `token-vault` binary.
//!
//! Construction is explicit: callers build an [`EncryptionService`] from a
//! key string and pass it where it is needed.

pub mod cli;
pub mod config;
pub mod crypto;
pub mod telemetry;

pub use crypto::{CipherError, EncryptedFrame, EncryptionService, KeyError, KeyMaterial};
