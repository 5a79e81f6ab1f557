//! Hybrid KEM + AEAD encryption.
//!
//! Encrypt: encapsulate a fresh shared secret to the recipient's public key,
//! derive a 32-byte key with SHAKE256, seal the plaintext with
//! `ChaCha20-Poly1305` under a random 12-byte nonce and no associated data.
//! Decrypt reverses the steps.
//!
//! The KEM is used in its implicit-rejection form: decapsulating with the
//! wrong (but well-formed) secret key yields an unrelated shared secret, so
//! the failure surfaces as [`CryptoError::AuthenticationFailure`] from the
//! AEAD rather than as a KEM error.

use chacha20poly1305::{
    ChaCha20Poly1305, Nonce,
    aead::{Aead, KeyInit},
};
use tracing::debug;

use crate::{
    context::KemContext,
    entropy::{Entropy, OsEntropy},
    error::CryptoError,
    kdf::derive_symmetric_key,
    wire::{NONCE_SIZE, WireCiphertext},
};

/// Encrypt `plaintext` to `public_key` using the OS random source.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown KEM identifier
/// - `InvalidKeyLength`: `public_key` is the wrong size for the KEM
/// - `EntropyUnavailable`: nonce could not be drawn
pub fn encrypt(
    public_key: &[u8],
    plaintext: &[u8],
    algorithm: &str,
) -> Result<WireCiphertext, CryptoError> {
    encrypt_with(public_key, plaintext, algorithm, &OsEntropy)
}

/// Encrypt with a caller-supplied nonce source.
///
/// # Security
///
/// - A fresh shared secret per call means a fresh AEAD key per call
/// - Caller MUST provide cryptographically secure randomness in production
pub fn encrypt_with(
    public_key: &[u8],
    plaintext: &[u8],
    algorithm: &str,
    entropy: &impl Entropy,
) -> Result<WireCiphertext, CryptoError> {
    let ctx = KemContext::initialized(algorithm, None)?;
    let details = ctx.details()?;
    let (kem_ciphertext, shared_secret) = ctx.encapsulate_secret(public_key)?;
    let key = derive_symmetric_key(&shared_secret);

    let mut nonce = [0u8; NONCE_SIZE];
    entropy.random_bytes(&mut nonce)?;

    let cipher = ChaCha20Poly1305::new(key.key().into());
    let Ok(ciphertext) = cipher.encrypt(Nonce::from_slice(&nonce), plaintext) else {
        unreachable!("ChaCha20-Poly1305 encryption cannot fail with valid inputs");
    };

    debug!(algorithm = details.name, plaintext_len = plaintext.len(), "hybrid encrypt");
    Ok(WireCiphertext::new(kem_ciphertext, nonce, ciphertext))
}

/// Decrypt a wire-format hybrid ciphertext with `secret_key`.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown KEM identifier
/// - `TruncatedInput`: `wire` is shorter than `L1 + 12 + 16` bytes
/// - `DecapsulationFailure`: malformed secret key or KEM ciphertext
/// - `AuthenticationFailure`: tag mismatch (tampering or wrong key)
pub fn decrypt(secret_key: &[u8], wire: &[u8], algorithm: &str) -> Result<Vec<u8>, CryptoError> {
    let ctx = KemContext::initialized(algorithm, Some(secret_key))?;
    let details = ctx.details()?;
    let parsed = WireCiphertext::decode(wire, details.ciphertext_len)?;

    let shared_secret = ctx.decapsulate_secret(parsed.kem_ciphertext())?;
    let key = derive_symmetric_key(&shared_secret);

    let cipher = ChaCha20Poly1305::new(key.key().into());
    let plaintext = cipher
        .decrypt(Nonce::from_slice(parsed.nonce()), parsed.ciphertext())
        .map_err(|_| CryptoError::AuthenticationFailure)?;

    debug!(algorithm = details.name, plaintext_len = plaintext.len(), "hybrid decrypt");
    Ok(plaintext)
}
