//! AES-256-GCM encryption and decryption of stored token values.
//!
//! Every call to [`EncryptionService::encrypt`] draws a fresh 96-bit nonce from
//! the OS CSPRNG. Nonces are never derived, cached or reused: GCM nonce reuse
//! under one key breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{generic_array::GenericArray, AeadCore, AeadInPlace, KeyInit, OsRng},
    Aes256Gcm, Key, Nonce,
};
use thiserror::Error;
use tracing::{debug, warn};
use zeroize::Zeroize;

use super::frame::{EncryptedFrame, NONCE_LEN, TAG_LEN};
use super::key::{KeyError, KeyMaterial};
use crate::config::Config;

/// Errors produced by the cipher layer.
///
/// None of these are retryable: the same input under the same key fails the
/// same way.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// Tag verification failed on a well-formed frame: wrong key or the stored
    /// value was altered.
    #[error("integrity check failed: wrong key or tampered ciphertext")]
    Integrity,

    /// The frame authenticated but its plaintext is not UTF-8.
    #[error("decrypted value is not valid UTF-8")]
    InvalidUtf8,

    /// AES-GCM refused to encrypt (plaintext beyond the algorithm's length limit).
    #[error("aead operation failed")]
    AeadFailure,
}

impl CipherError {
    /// Short machine-readable code for logs and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            CipherError::Integrity => "integrity_failure",
            CipherError::InvalidUtf8 => "invalid_utf8",
            CipherError::AeadFailure => "aead_failure",
        }
    }

    /// Whether retrying the same operation could succeed. Always `false`.
    pub fn is_retryable(&self) -> bool {
        match self {
            CipherError::Integrity | CipherError::InvalidUtf8 | CipherError::AeadFailure => false,
        }
    }
}

/// Authenticated encryption of string values under one process-lifetime key.
///
/// The key is fixed at construction and never mutated, so a single instance
/// can be shared across threads without locking.
pub struct EncryptionService {
    cipher: Aes256Gcm,
}

impl EncryptionService {
    /// Build a service that owns `key` for its whole lifetime.
    pub fn new(key: KeyMaterial) -> Self {
        let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()));
        Self { cipher }
    }

    /// Parse a configured key string (base64 or hex) and build the service.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError`] if the key is missing or does not decode to
    /// exactly 32 bytes.
    pub fn from_key_str(configured: &str) -> Result<Self, KeyError> {
        KeyMaterial::parse(configured).map(Self::new)
    }

    /// Build the service from the `encryption_key` of a loaded [`Config`].
    ///
    /// # Errors
    ///
    /// See [`EncryptionService::from_key_str`].
    pub fn from_config(cfg: &Config) -> Result<Self, KeyError> {
        Self::from_key_str(&cfg.encryption_key)
    }

    /// Encrypt `plaintext` and return the stored (base64) frame.
    ///
    /// The decoded frame is exactly 28 bytes longer than the plaintext.
    /// Encrypting the same plaintext twice yields different frames.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::AeadFailure`] only for plaintexts beyond the
    /// AES-GCM limit of roughly 64 GiB.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CipherError> {
        self.encrypt_frame(plaintext).map(|frame| frame.encode())
    }

    /// Encrypt `plaintext` into a parsed [`EncryptedFrame`].
    ///
    /// # Errors
    ///
    /// See [`EncryptionService::encrypt`].
    pub fn encrypt_frame(&self, plaintext: &str) -> Result<EncryptedFrame, CipherError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let mut ciphertext = plaintext.as_bytes().to_vec();
        let tag = self
            .cipher
            .encrypt_in_place_detached(&nonce, b"", &mut ciphertext)
            .map_err(|_| {
                ciphertext.zeroize();
                CipherError::AeadFailure
            })?;

        let mut frame = EncryptedFrame {
            nonce: [0u8; NONCE_LEN],
            tag: [0u8; TAG_LEN],
            ciphertext,
        };
        frame.nonce.copy_from_slice(nonce.as_slice());
        frame.tag.copy_from_slice(tag.as_slice());
        Ok(frame)
    }

    /// Decrypt a stored value.
    ///
    /// - `None` or an empty string: `Ok(None)`, nothing is stored.
    /// - A value that is not base64 or decodes to fewer than 28 bytes:
    ///   `Ok(None)`, the field holds something other than a frame. No
    ///   cryptographic operation is attempted.
    /// - A well-formed frame: the tag is verified before any plaintext is
    ///   released.
    ///
    /// # Errors
    ///
    /// Returns [`CipherError::Integrity`] if tag verification fails and
    /// [`CipherError::InvalidUtf8`] if the plaintext is not UTF-8. An
    /// integrity failure is never reported as `Ok(None)`.
    pub fn decrypt(&self, encoded: Option<&str>) -> Result<Option<String>, CipherError> {
        let encoded = match encoded {
            Some(s) if !s.is_empty() => s,
            _ => return Ok(None),
        };

        let Some(frame) = EncryptedFrame::decode(encoded) else {
            debug!(len = encoded.len(), "stored value is not an encrypted frame");
            return Ok(None);
        };

        self.decrypt_frame(&frame).map(Some)
    }

    /// [`EncryptionService::decrypt`] for a value known to be present.
    ///
    /// # Errors
    ///
    /// See [`EncryptionService::decrypt`].
    pub fn decrypt_str(&self, encoded: &str) -> Result<Option<String>, CipherError> {
        self.decrypt(Some(encoded))
    }

    /// Verify and decrypt a parsed frame.
    ///
    /// # Errors
    ///
    /// See [`EncryptionService::decrypt`].
    pub fn decrypt_frame(&self, frame: &EncryptedFrame) -> Result<String, CipherError> {
        let mut buffer = frame.ciphertext.clone();
        self.cipher
            .decrypt_in_place_detached(
                Nonce::from_slice(&frame.nonce),
                b"",
                &mut buffer,
                GenericArray::from_slice(&frame.tag),
            )
            .map_err(|_| {
                warn!(
                    error = CipherError::Integrity.code(),
                    "encrypted value failed authentication"
                );
                CipherError::Integrity
            })?;

        String::from_utf8(buffer).map_err(|e| {
            e.into_bytes().zeroize();
            CipherError::InvalidUtf8
        })
    }
}

impl std::fmt::Debug for EncryptionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("EncryptionService { key: [REDACTED] }")
    }
}
