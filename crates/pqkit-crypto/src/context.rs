//! Cryptographic contexts with an explicit lifecycle.
//!
//! A context binds one registry algorithm to optional secret key material.
//! Every flow in this crate acquires a context, uses it, and lets it go out
//! of scope; [`Drop`] runs [`KemContext::clean`] / [`SignatureContext::clean`]
//! on every exit path, including `?` returns and unwinding.
//!
//! # State Machine
//!
//! ```text
//! ┌───────────────┐  init   ┌─────────────┐  clean   ┌─────────┐
//! │ Uninitialized │────────>│ Initialized │─────────>│ Cleaned │
//! └───────────────┘         └─────────────┘          └─────────┘
//!         │                                               ^
//!         └──────────────────── clean ────────────────────┘
//! ```
//!
//! Operations are only legal in `Initialized`. `clean` is idempotent and
//! zeroes the secret key buffer.

use tracing::trace;
use zeroize::Zeroizing;

use crate::{
    algorithm::{
        self, KemAlgorithm, KemDetails, SecretBytes, SignatureAlgorithm, SignatureDetails,
    },
    error::CryptoError,
};

/// Lifecycle state of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Created, no algorithm selected yet
    Uninitialized,
    /// Algorithm selected, operations allowed
    Initialized,
    /// Secrets wiped, context unusable
    Cleaned,
}

/// State and secret storage shared by both context kinds.
struct Lifecycle {
    state: ContextState,
    secret_key: Option<SecretBytes>,
}

impl Lifecycle {
    fn new() -> Self {
        Self { state: ContextState::Uninitialized, secret_key: None }
    }

    fn require(&self, operation: &'static str, expected: ContextState) -> Result<(), CryptoError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(CryptoError::InvalidState { state: self.state, operation })
        }
    }

    fn load(&mut self, secret_key: Option<&[u8]>) {
        self.secret_key = secret_key.map(|key| Zeroizing::new(key.to_vec()));
        self.state = ContextState::Initialized;
    }

    fn secret_key(&self, operation: &'static str) -> Result<&[u8], CryptoError> {
        self.secret_key
            .as_deref()
            .map(Vec::as_slice)
            .ok_or(CryptoError::MissingSecretKey { operation })
    }

    /// Returns true if this call performed the transition.
    fn clean(&mut self) -> bool {
        // Dropping the `Zeroizing` buffer wipes it
        self.secret_key = None;
        let transitioned = self.state != ContextState::Cleaned;
        self.state = ContextState::Cleaned;
        transitioned
    }
}

/// Key encapsulation context.
///
/// Initialise without a secret key to encapsulate or generate keys; with a
/// secret key to decapsulate.
pub struct KemContext {
    lifecycle: Lifecycle,
    algorithm: Option<&'static dyn KemAlgorithm>,
}

impl KemContext {
    /// Create an uninitialised context.
    pub fn new() -> Self {
        Self { lifecycle: Lifecycle::new(), algorithm: None }
    }

    /// Create and initialise a context in one step.
    pub fn initialized(algorithm: &str, secret_key: Option<&[u8]>) -> Result<Self, CryptoError> {
        let mut ctx = Self::new();
        ctx.init(algorithm, secret_key)?;
        Ok(ctx)
    }

    /// Select the algorithm and load optional secret key material.
    ///
    /// An unknown algorithm leaves the context `Uninitialized`.
    pub fn init(&mut self, algorithm: &str, secret_key: Option<&[u8]>) -> Result<(), CryptoError> {
        self.lifecycle.require("init", ContextState::Uninitialized)?;
        let alg = algorithm::kem(algorithm)?;

        self.algorithm = Some(alg);
        self.lifecycle.load(secret_key);
        trace!(
            algorithm = alg.details().name,
            has_secret = secret_key.is_some(),
            "kem context initialized"
        );
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ContextState {
        self.lifecycle.state
    }

    /// Sizes of the selected algorithm.
    pub fn details(&self) -> Result<KemDetails, CryptoError> {
        Ok(self.algorithm("details")?.details())
    }

    /// Generate a key pair, keep the secret key, return the public key.
    pub fn generate_keypair(&mut self) -> Result<Vec<u8>, CryptoError> {
        let alg = self.algorithm("generate key pair")?;
        let (public_key, secret_key) = alg.keypair()?;
        self.lifecycle.secret_key = Some(secret_key);
        Ok(public_key)
    }

    /// Copy of the loaded or generated secret key.
    pub fn export_secret_key(&self) -> Result<SecretBytes, CryptoError> {
        self.algorithm("export secret key")?;
        let key = self.lifecycle.secret_key("export secret key")?;
        Ok(Zeroizing::new(key.to_vec()))
    }

    /// Encapsulate a fresh shared secret to `public_key`.
    ///
    /// Returns `(kem_ciphertext, shared_secret)`.
    pub fn encapsulate_secret(
        &self,
        public_key: &[u8],
    ) -> Result<(Vec<u8>, SecretBytes), CryptoError> {
        self.algorithm("encapsulate")?.encapsulate(public_key)
    }

    /// Recover the shared secret from `ciphertext` with the loaded secret key.
    pub fn decapsulate_secret(&self, ciphertext: &[u8]) -> Result<SecretBytes, CryptoError> {
        let alg = self.algorithm("decapsulate")?;
        let secret_key = self.lifecycle.secret_key("decapsulate").map_err(|_| {
            CryptoError::DecapsulationFailure { reason: "no secret key loaded".to_string() }
        })?;
        alg.decapsulate(secret_key, ciphertext)
    }

    /// Wipe secret material and move to `Cleaned`. Idempotent.
    pub fn clean(&mut self) {
        if self.lifecycle.clean() {
            trace!("kem context cleaned");
        }
    }

    fn algorithm(&self, operation: &'static str) -> Result<&'static dyn KemAlgorithm, CryptoError> {
        self.lifecycle.require(operation, ContextState::Initialized)?;
        self.algorithm.ok_or(CryptoError::InvalidState { state: self.lifecycle.state, operation })
    }
}

impl Default for KemContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for KemContext {
    fn drop(&mut self) {
        self.clean();
    }
}

/// Signature context.
///
/// Initialise with a secret key to sign; without one to verify or generate
/// keys.
pub struct SignatureContext {
    lifecycle: Lifecycle,
    algorithm: Option<&'static dyn SignatureAlgorithm>,
}

impl SignatureContext {
    /// Create an uninitialised context.
    pub fn new() -> Self {
        Self { lifecycle: Lifecycle::new(), algorithm: None }
    }

    /// Create and initialise a context in one step.
    pub fn initialized(algorithm: &str, secret_key: Option<&[u8]>) -> Result<Self, CryptoError> {
        let mut ctx = Self::new();
        ctx.init(algorithm, secret_key)?;
        Ok(ctx)
    }

    /// Select the algorithm and load optional secret key material.
    ///
    /// An unknown algorithm leaves the context `Uninitialized`.
    pub fn init(&mut self, algorithm: &str, secret_key: Option<&[u8]>) -> Result<(), CryptoError> {
        self.lifecycle.require("init", ContextState::Uninitialized)?;
        let alg = algorithm::signature(algorithm)?;

        self.algorithm = Some(alg);
        self.lifecycle.load(secret_key);
        trace!(
            algorithm = alg.details().name,
            has_secret = secret_key.is_some(),
            "signature context initialized"
        );
        Ok(())
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ContextState {
        self.lifecycle.state
    }

    /// Sizes of the selected algorithm.
    pub fn details(&self) -> Result<SignatureDetails, CryptoError> {
        Ok(self.algorithm("details")?.details())
    }

    /// Generate a key pair, keep the secret key, return the public key.
    pub fn generate_keypair(&mut self) -> Result<Vec<u8>, CryptoError> {
        let alg = self.algorithm("generate key pair")?;
        let (public_key, secret_key) = alg.keypair()?;
        self.lifecycle.secret_key = Some(secret_key);
        Ok(public_key)
    }

    /// Copy of the loaded or generated secret key.
    pub fn export_secret_key(&self) -> Result<SecretBytes, CryptoError> {
        self.algorithm("export secret key")?;
        let key = self.lifecycle.secret_key("export secret key")?;
        Ok(Zeroizing::new(key.to_vec()))
    }

    /// Sign `message` with the loaded secret key.
    pub fn sign(&self, message: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let alg = self.algorithm("sign")?;
        let secret_key = self.lifecycle.secret_key("sign")?;
        alg.sign(secret_key, message)
    }

    /// Verify `signature` over `message` against `public_key`.
    pub fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<bool, CryptoError> {
        self.algorithm("verify")?.verify(public_key, message, signature)
    }

    /// Wipe secret material and move to `Cleaned`. Idempotent.
    pub fn clean(&mut self) {
        if self.lifecycle.clean() {
            trace!("signature context cleaned");
        }
    }

    fn algorithm(
        &self,
        operation: &'static str,
    ) -> Result<&'static dyn SignatureAlgorithm, CryptoError> {
        self.lifecycle.require(operation, ContextState::Initialized)?;
        self.algorithm.ok_or(CryptoError::InvalidState { state: self.lifecycle.state, operation })
    }
}

impl Default for SignatureContext {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SignatureContext {
    fn drop(&mut self) {
        self.clean();
    }
}
