//! AES-256-GCM encryption of values stored at rest.
//!
//! This module does no I/O. It provides the key loader, the stored frame
//! format, and the encrypt/decrypt service.
//!
//! # Stored format
//!
//! ```text
//! base64( nonce[12] || tag[16] || ciphertext[N] )
//! ```
//!
//! A value that decodes to fewer than 28 bytes is treated as "nothing stored",
//! not as corruption.

pub mod cipher;
pub mod frame;
pub mod key;

pub use cipher::{CipherError, EncryptionService};
pub use frame::{EncryptedFrame, FRAME_OVERHEAD};
pub use key::{KeyError, KeyMaterial, KEY_LEN};
