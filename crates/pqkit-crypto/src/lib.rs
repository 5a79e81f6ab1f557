//! pqkit Cryptographic Flows
//!
//! Hybrid post-quantum encryption and detached signatures over registry
//! implementations of Kyber, ML-KEM and Dilithium.
//!
//! # Hybrid Encryption
//!
//! A KEM establishes a fresh shared secret per message; SHAKE256 turns it
//! into a symmetric key; `ChaCha20-Poly1305` seals the payload.
//!
//! ```text
//! Recipient Public Key
//!        │
//!        ▼
//! KEM Encapsulate → (KEM ciphertext, shared secret)
//!                                        │
//!                                        ▼
//!                          SHAKE256 → 32-byte key
//!                                        │
//!                                        ▼
//!             ChaCha20-Poly1305 (random 12-byte nonce) → ciphertext ‖ tag
//!
//! Wire: KEM ciphertext (L1) ‖ nonce (12) ‖ ciphertext ‖ tag (16)
//! ```
//!
//! # Security
//!
//! Confidentiality:
//! - Every encryption encapsulates a new shared secret, so no AEAD key is
//!   ever reused
//! - Nonces come from the OS CSPRNG
//!
//! Authenticity:
//! - Any modification of the nonce or AEAD region fails the Poly1305 tag
//! - Modification of the KEM ciphertext yields an unrelated shared secret
//!   (implicit rejection), which also fails the tag
//! - Failures of either kind are [`CryptoError::AuthenticationFailure`] or
//!   [`CryptoError::DecapsulationFailure`], see [`CryptoError::is_tamper_evidence`]
//!
//! Key Hygiene:
//! - Secret keys, shared secrets and derived keys are zeroized on drop
//! - Contexts wipe their secret key on every exit path

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod algorithm;
pub mod context;
pub mod entropy;
pub mod error;
pub mod hybrid;
pub mod kdf;
pub mod keygen;
pub mod signature;
pub mod wire;

pub use algorithm::{
    DEFAULT_ALIAS, DEFAULT_KEM, DEFAULT_SIGNATURE, KemAlgorithm, KemDetails, SecretBytes,
    SignatureAlgorithm, SignatureDetails, supported_kems, supported_signatures,
};
pub use context::{ContextState, KemContext, SignatureContext};
pub use entropy::{Entropy, OsEntropy};
pub use error::CryptoError;
pub use hybrid::{decrypt, encrypt, encrypt_with};
pub use kdf::{SYMMETRIC_KEY_SIZE, SymmetricKey, derive_symmetric_key};
pub use keygen::{KeyPair, generate_kem_keypair, generate_signature_keypair};
pub use wire::{NONCE_SIZE, TAG_SIZE, WireCiphertext};
