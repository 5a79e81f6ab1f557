//! Detached signatures.
//!
//! Thin flows over [`SignatureContext`]: each call acquires a context, runs
//! one operation and drops it, wiping any secret key it held.

use tracing::debug;

use crate::{
    context::SignatureContext,
    error::CryptoError,
    keygen::{KeyPair, generate_signature_keypair},
};

/// Generate a signature key pair.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown signature identifier
pub fn generate_keypair(algorithm: &str) -> Result<KeyPair, CryptoError> {
    generate_signature_keypair(algorithm)
}

/// Sign `message` with `secret_key`.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown signature identifier
/// - `InvalidKeyLength`: `secret_key` is the wrong size
pub fn sign(secret_key: &[u8], message: &[u8], algorithm: &str) -> Result<Vec<u8>, CryptoError> {
    let ctx = SignatureContext::initialized(algorithm, Some(secret_key))?;
    let name = ctx.details()?.name;
    let signature = ctx.sign(message)?;

    debug!(algorithm = name, message_len = message.len(), "signed");
    Ok(signature)
}

/// Verify a detached signature.
///
/// Returns `Ok(false)` for a well-formed signature that does not verify.
///
/// # Errors
///
/// - `UnsupportedAlgorithm`: unknown signature identifier
/// - `VerificationError`: malformed public key or signature
pub fn verify(
    public_key: &[u8],
    message: &[u8],
    signature: &[u8],
    algorithm: &str,
) -> Result<bool, CryptoError> {
    let ctx = SignatureContext::initialized(algorithm, None)?;
    let name = ctx.details()?.name;
    let valid = ctx.verify(message, signature, public_key)?;

    debug!(algorithm = name, valid, "verified");
    Ok(valid)
}
