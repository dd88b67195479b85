//! [`KeyMaterial`]: the 256-bit key parsed from configuration.

use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;
use zeroize::Zeroizing;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Errors produced while loading key material.
///
/// Every variant is a startup-fatal misconfiguration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// No key was configured.
    #[error("encryption key is not configured")]
    Missing,

    /// The key is neither valid base64 nor valid hex.
    #[error("encryption key is neither base64 nor hex")]
    Undecodable,

    /// The key decoded to the wrong number of bytes.
    #[error("encryption key has invalid length: expected {KEY_LEN} bytes, got {got}")]
    InvalidLength { got: usize },
}

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// Zeroed on drop. `Debug` never prints the bytes.
pub struct KeyMaterial(Zeroizing<[u8; KEY_LEN]>);

impl KeyMaterial {
    /// Parse a configured key string.
    ///
    /// The string is tried as standard base64 first and as hex second; the
    /// first decoding that yields exactly [`KEY_LEN`] bytes wins.
    ///
    /// # Errors
    ///
    /// - [`KeyError::Missing`] if `configured` is blank.
    /// - [`KeyError::InvalidLength`] if a decoding succeeded with the wrong length.
    /// - [`KeyError::Undecodable`] if neither decoding succeeded.
    pub fn parse(configured: &str) -> Result<Self, KeyError> {
        let trimmed = configured.trim();
        if trimmed.is_empty() {
            return Err(KeyError::Missing);
        }

        let from_base64 = STANDARD
            .decode(trimmed)
            .ok()
            .filter(|bytes| !bytes.is_empty())
            .map(Zeroizing::new);
        if let Some(bytes) = &from_base64 {
            if bytes.len() == KEY_LEN {
                return Ok(Self::from_slice(bytes));
            }
        }

        match hex::decode(trimmed).map(Zeroizing::new) {
            Ok(bytes) if bytes.len() == KEY_LEN => Ok(Self::from_slice(&bytes)),
            Ok(bytes) => Err(KeyError::InvalidLength { got: bytes.len() }),
            Err(_) => match from_base64 {
                Some(bytes) => Err(KeyError::InvalidLength { got: bytes.len() }),
                None => Err(KeyError::Undecodable),
            },
        }
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    fn from_slice(bytes: &[u8]) -> Self {
        let mut buf = Zeroizing::new([0u8; KEY_LEN]);
        buf.copy_from_slice(bytes);
        Self(buf)
    }
}

impl From<[u8; KEY_LEN]> for KeyMaterial {
    fn from(bytes: [u8; KEY_LEN]) -> Self {
        Self(Zeroizing::new(bytes))
    }
}

impl FromStr for KeyMaterial {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("KeyMaterial([REDACTED])")
    }
}
