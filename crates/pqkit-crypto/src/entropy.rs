//! Randomness source abstraction.
//!
//! Flows take an [`Entropy`] so tests can pin nonces. Production code uses
//! [`OsEntropy`], which reads the OS CSPRNG through `getrandom` and never
//! falls back to a weaker source.

use crate::error::CryptoError;

/// Source of random bytes for nonces.
///
/// # Invariants
///
/// - Production implementations MUST be cryptographically secure
/// - Failure is reported, never papered over with weaker randomness
pub trait Entropy {
    /// Fill `buffer` completely with random bytes.
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), CryptoError>;
}

/// OS cryptographic RNG (e.g. `getrandom(2)` on Linux).
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl Entropy for OsEntropy {
    fn random_bytes(&self, buffer: &mut [u8]) -> Result<(), CryptoError> {
        getrandom::fill(buffer)
            .map_err(|err| CryptoError::EntropyUnavailable { reason: err.to_string() })
    }
}
