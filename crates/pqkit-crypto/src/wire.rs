//! Hybrid ciphertext wire format.
//!
//! ```text
//! ┌──────────────────────┬──────────────┬───────────────────────────┐
//! │ KEM ciphertext (L1)  │ nonce (12)   │ AEAD ciphertext + tag (16)│
//! └──────────────────────┴──────────────┴───────────────────────────┘
//! ```
//!
//! There is no header, length prefix or algorithm identifier. L1 is fixed by
//! the KEM, so the decoder must be told the algorithm out of band.

use crate::error::CryptoError;

/// `ChaCha20-Poly1305` IETF nonce size (12 bytes)
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag size (16 bytes)
pub const TAG_SIZE: usize = 16;

/// Decoded hybrid ciphertext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireCiphertext {
    kem_ciphertext: Vec<u8>,
    nonce: [u8; NONCE_SIZE],
    ciphertext: Vec<u8>,
}

impl WireCiphertext {
    /// Assemble from parts. `ciphertext` includes the Poly1305 tag.
    pub fn new(kem_ciphertext: Vec<u8>, nonce: [u8; NONCE_SIZE], ciphertext: Vec<u8>) -> Self {
        Self { kem_ciphertext, nonce, ciphertext }
    }

    /// Split `bytes` at `kem_ciphertext_len` and `kem_ciphertext_len + 12`.
    ///
    /// # Errors
    ///
    /// - `TruncatedInput`: fewer than `kem_ciphertext_len + 12 + 16` bytes.
    ///   Checked before any cryptographic work.
    pub fn decode(bytes: &[u8], kem_ciphertext_len: usize) -> Result<Self, CryptoError> {
        let expected = kem_ciphertext_len
            .checked_add(NONCE_SIZE + TAG_SIZE)
            .ok_or(CryptoError::TruncatedInput { expected: usize::MAX, actual: bytes.len() })?;
        if bytes.len() < expected {
            return Err(CryptoError::TruncatedInput { expected, actual: bytes.len() });
        }

        let (kem_ciphertext, rest) = bytes.split_at(kem_ciphertext_len);
        let Some((nonce, ciphertext)) = rest.split_first_chunk::<NONCE_SIZE>() else {
            unreachable!("length checked above");
        };

        Ok(Self {
            kem_ciphertext: kem_ciphertext.to_vec(),
            nonce: *nonce,
            ciphertext: ciphertext.to_vec(),
        })
    }

    /// Serialize as `kem_ciphertext ‖ nonce ‖ ciphertext`.
    pub fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.encoded_len());
        out.extend_from_slice(&self.kem_ciphertext);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Serialize as `kem_ciphertext ‖ ciphertext`, leaving out the nonce.
    ///
    /// This is the form the CLI prints for `encrypt`. It cannot be decrypted.
    pub fn encode_without_nonce(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.kem_ciphertext.len() + self.ciphertext.len());
        out.extend_from_slice(&self.kem_ciphertext);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Length of [`Self::encode`] output.
    pub fn encoded_len(&self) -> usize {
        self.kem_ciphertext.len() + NONCE_SIZE + self.ciphertext.len()
    }

    /// KEM ciphertext (L1 bytes).
    pub fn kem_ciphertext(&self) -> &[u8] {
        &self.kem_ciphertext
    }

    /// AEAD nonce.
    pub fn nonce(&self) -> &[u8; NONCE_SIZE] {
        &self.nonce
    }

    /// AEAD ciphertext including the tag.
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Plaintext length (ciphertext length minus authentication tag).
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }
}
