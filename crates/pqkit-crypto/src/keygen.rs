//! Fresh key pair generation.

use crate::{
    algorithm::SecretBytes,
    context::{KemContext, SignatureContext},
    error::CryptoError,
};

/// A generated key pair. The secret half is zeroized on drop.
pub struct KeyPair {
    /// Public (encapsulation or verification) key
    pub public_key: Vec<u8>,
    /// Secret (decapsulation or signing) key
    pub secret_key: SecretBytes,
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key_len", &self.public_key.len())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Generate a KEM key pair.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown KEM identifier
pub fn generate_kem_keypair(algorithm: &str) -> Result<KeyPair, CryptoError> {
    let mut ctx = KemContext::initialized(algorithm, None)?;
    let public_key = ctx.generate_keypair()?;
    let secret_key = ctx.export_secret_key()?;
    Ok(KeyPair { public_key, secret_key })
}

/// Generate a signature key pair.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown signature identifier
pub fn generate_signature_keypair(algorithm: &str) -> Result<KeyPair, CryptoError> {
    let mut ctx = SignatureContext::initialized(algorithm, None)?;
    let public_key = ctx.generate_keypair()?;
    let secret_key = ctx.export_secret_key()?;
    Ok(KeyPair { public_key, secret_key })
}
