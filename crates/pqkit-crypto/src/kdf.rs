//! Symmetric key derivation from a KEM shared secret using SHAKE256

use sha3::{
    Shake256,
    digest::{ExtendableOutput, Update, XofReader},
};
use zeroize::Zeroize;

/// Size of the derived AEAD key (32 bytes)
pub const SYMMETRIC_KEY_SIZE: usize = 32;

/// A 32-byte AEAD key derived from one shared secret.
///
/// Scoped to a single encrypt or decrypt call and zeroized on drop.
pub struct SymmetricKey {
    key: [u8; SYMMETRIC_KEY_SIZE],
}

impl SymmetricKey {
    /// 32-byte key for `ChaCha20-Poly1305`.
    pub fn key(&self) -> &[u8; SYMMETRIC_KEY_SIZE] {
        &self.key
    }
}

impl Drop for SymmetricKey {
    fn drop(&mut self) {
        self.key.zeroize();
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Derive the AEAD key for a shared secret.
///
/// Absorbs `shared_secret` into SHAKE256 and squeezes exactly 32 bytes. No
/// label or context is mixed in.
///
/// # Security
///
/// - Deterministic: same secret always produces same key
/// - Any change to the secret produces an unrelated key
pub fn derive_symmetric_key(shared_secret: &[u8]) -> SymmetricKey {
    let mut hasher = Shake256::default();
    hasher.update(shared_secret);

    let mut key = [0u8; SYMMETRIC_KEY_SIZE];
    hasher.finalize_xof().read(&mut key);

    SymmetricKey { key }
}
