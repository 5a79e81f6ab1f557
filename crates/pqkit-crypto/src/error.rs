//! Error types for pqkit cryptographic operations.
//!
//! Every variant is terminal: cryptographic failures are not transient, so
//! callers abort the operation instead of retrying.

use thiserror::Error;

use crate::context::ContextState;

/// Errors from contexts, the wire codec and the hybrid/signature flows.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Algorithm identifier is not in the registry for the requested role
    #[error("unsupported {role} algorithm: {name}")]
    UnsupportedAlgorithm {
        /// Role the algorithm was requested for (`kem` or `signature`)
        role: &'static str,
        /// Identifier as supplied by the caller
        name: String,
    },

    /// Operation attempted outside the `Initialized` state
    #[error("invalid context state: cannot {operation} from {state:?}")]
    InvalidState {
        /// State of the context when the operation was attempted
        state: ContextState,
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Input is shorter than the algorithm mandates
    #[error("truncated input: need at least {expected} bytes, got {actual}")]
    TruncatedInput {
        /// Minimum number of bytes required
        expected: usize,
        /// Number of bytes available
        actual: usize,
    },

    /// KEM could not produce a ciphertext for a well-formed public key
    #[error("encapsulation failed: {reason}")]
    EncapsulationFailure {
        /// Reason reported by the primitive
        reason: String,
    },

    /// KEM ciphertext or secret key rejected during decapsulation
    #[error("decapsulation failed: {reason}")]
    DecapsulationFailure {
        /// Reason for the rejection
        reason: String,
    },

    /// AEAD tag mismatch (tampering, corruption or wrong key)
    #[error("authentication failed: ciphertext rejected")]
    AuthenticationFailure,

    /// Public key or signature is malformed for the algorithm
    #[error("verification error: {reason}")]
    VerificationError {
        /// What was malformed
        reason: String,
    },

    /// Key material does not have the length the algorithm requires
    #[error("invalid {kind} length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Which key was wrong (`public key` or `secret key`)
        kind: &'static str,
        /// Length the algorithm requires
        expected: usize,
        /// Length supplied
        actual: usize,
    },

    /// Operation needs a secret key but the context holds none
    #[error("no secret key loaded: cannot {operation}")]
    MissingSecretKey {
        /// Operation that was attempted
        operation: &'static str,
    },

    /// Primitive failed to produce a key pair
    #[error("key generation failed: {reason}")]
    KeyGeneration {
        /// Reason reported by the primitive
        reason: String,
    },

    /// OS entropy source is unavailable
    #[error("entropy source unavailable: {reason}")]
    EntropyUnavailable {
        /// Reason reported by the OS
        reason: String,
    },
}

impl CryptoError {
    /// Returns true if this error indicates the input was altered or
    /// produced for a different key.
    ///
    /// Malformed-input errors (wrong lengths, unknown algorithms) are
    /// usage mistakes; these are evidence about the ciphertext itself.
    pub fn is_tamper_evidence(&self) -> bool {
        match self {
            Self::AuthenticationFailure | Self::DecapsulationFailure { .. } => true,

            Self::UnsupportedAlgorithm { .. }
            | Self::InvalidState { .. }
            | Self::TruncatedInput { .. }
            | Self::EncapsulationFailure { .. }
            | Self::VerificationError { .. }
            | Self::InvalidKeyLength { .. }
            | Self::MissingSecretKey { .. }
            | Self::KeyGeneration { .. }
            | Self::EntropyUnavailable { .. } => false,
        }
    }
}
