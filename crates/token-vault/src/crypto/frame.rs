//! [`EncryptedFrame`]: the self-contained stored form of an encrypted value.

use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Byte length of an AES-GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Smallest decoded frame: nonce and tag around an empty ciphertext.
pub const FRAME_OVERHEAD: usize = NONCE_LEN + TAG_LEN;

/// A parsed encrypted value.
///
/// Binary layout is `nonce || tag || ciphertext`; the stored form is the
/// standard (padded) base64 encoding of that layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedFrame {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Raw ciphertext bytes, same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

impl EncryptedFrame {
    /// Encode this frame to its stored text representation.
    pub fn encode(&self) -> String {
        let mut raw = Vec::with_capacity(FRAME_OVERHEAD + self.ciphertext.len());
        raw.extend_from_slice(&self.nonce);
        raw.extend_from_slice(&self.tag);
        raw.extend_from_slice(&self.ciphertext);
        STANDARD.encode(raw)
    }

    /// Parse a stored value back into a frame.
    ///
    /// Returns `None` when `encoded` is not base64 or decodes to fewer than
    /// [`FRAME_OVERHEAD`] bytes. Such values are not frames, and no
    /// cryptographic check is made here.
    pub fn decode(encoded: &str) -> Option<Self> {
        let raw = STANDARD.decode(encoded.trim()).ok()?;
        if raw.len() < FRAME_OVERHEAD {
            return None;
        }

        let (nonce_bytes, rest) = raw.split_at(NONCE_LEN);
        let (tag_bytes, ciphertext) = rest.split_at(TAG_LEN);

        let mut nonce = [0u8; NONCE_LEN];
        nonce.copy_from_slice(nonce_bytes);
        let mut tag = [0u8; TAG_LEN];
        tag.copy_from_slice(tag_bytes);

        Some(Self {
            nonce,
            tag,
            ciphertext: ciphertext.to_vec(),
        })
    }
}
