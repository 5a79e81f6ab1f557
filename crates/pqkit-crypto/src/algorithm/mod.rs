//! Algorithm registry and primitive capability traits.
//!
//! The post-quantum math lives in registry crates (`pqcrypto-kyber`,
//! `pqcrypto-dilithium`, `ml-kem`). Each supported parameter set is a unit
//! struct implementing [`KemAlgorithm`] or [`SignatureAlgorithm`], which
//! reduces every primitive to byte slices in and byte buffers out. The
//! contexts in [`crate::context`] are the only callers.
//!
//! Identifiers are matched case-insensitively. `DEFAULT` selects
//! [`DEFAULT_KEM`] or [`DEFAULT_SIGNATURE`] depending on the role.

mod dilithium;
mod kyber;
mod mlkem;

pub use dilithium::{Dilithium2, Dilithium3, Dilithium5};
pub use kyber::{Kyber512, Kyber768, Kyber1024};
pub use mlkem::{MlKem512, MlKem768, MlKem1024};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Secret byte buffer that is zeroed when dropped.
pub type SecretBytes = Zeroizing<Vec<u8>>;

/// Alias accepted in place of a concrete algorithm name.
pub const DEFAULT_ALIAS: &str = "DEFAULT";

/// KEM selected by [`DEFAULT_ALIAS`].
pub const DEFAULT_KEM: &str = "Kyber768";

/// Signature scheme selected by [`DEFAULT_ALIAS`].
pub const DEFAULT_SIGNATURE: &str = "Dilithium3";

/// Fixed sizes of a KEM parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KemDetails {
    /// Canonical algorithm name
    pub name: &'static str,
    /// Encapsulation (public) key length
    pub public_key_len: usize,
    /// Decapsulation (secret) key length
    pub secret_key_len: usize,
    /// KEM ciphertext length (L1 in the wire format)
    pub ciphertext_len: usize,
    /// Shared secret length
    pub shared_secret_len: usize,
}

/// Fixed sizes of a signature parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureDetails {
    /// Canonical algorithm name
    pub name: &'static str,
    /// Verification (public) key length
    pub public_key_len: usize,
    /// Signing (secret) key length
    pub secret_key_len: usize,
    /// Signature length
    pub signature_len: usize,
}

/// Key encapsulation capability of one parameter set.
pub trait KemAlgorithm: Send + Sync {
    /// Sizes of keys, ciphertext and shared secret.
    fn details(&self) -> KemDetails;

    /// Generate a fresh key pair, returned as `(public, secret)`.
    fn keypair(&self) -> Result<(Vec<u8>, SecretBytes), CryptoError>;

    /// Encapsulate a fresh shared secret to `public_key`.
    ///
    /// Returns `(ciphertext, shared_secret)`. The ciphertext is exactly
    /// `details().ciphertext_len` bytes.
    fn encapsulate(&self, public_key: &[u8]) -> Result<(Vec<u8>, SecretBytes), CryptoError>;

    /// Recover the shared secret from `ciphertext` with `secret_key`.
    fn decapsulate(&self, secret_key: &[u8], ciphertext: &[u8])
    -> Result<SecretBytes, CryptoError>;
}

/// Signature capability of one parameter set.
pub trait SignatureAlgorithm: Send + Sync {
    /// Sizes of keys and signatures.
    fn details(&self) -> SignatureDetails;

    /// Generate a fresh key pair, returned as `(public, secret)`.
    fn keypair(&self) -> Result<(Vec<u8>, SecretBytes), CryptoError>;

    /// Produce a detached signature over `message`.
    fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Check a detached signature.
    ///
    /// `Err(VerificationError)` means the key or signature is malformed;
    /// `Ok(false)` means it is well-formed but does not verify.
    fn verify(
        &self,
        public_key: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> Result<bool, CryptoError>;
}

static KEMS: [&dyn KemAlgorithm; 6] =
    [&Kyber512, &Kyber768, &Kyber1024, &MlKem512, &MlKem768, &MlKem1024];

static SIGNATURES: [&dyn SignatureAlgorithm; 3] = [&Dilithium2, &Dilithium3, &Dilithium5];

/// Look up a KEM by identifier.
pub fn kem(name: &str) -> Result<&'static dyn KemAlgorithm, CryptoError> {
    let wanted = if name.eq_ignore_ascii_case(DEFAULT_ALIAS) { DEFAULT_KEM } else { name };

    KEMS.iter()
        .copied()
        .find(|alg| alg.details().name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CryptoError::UnsupportedAlgorithm { role: "kem", name: name.to_string() })
}

/// Look up a signature scheme by identifier.
pub fn signature(name: &str) -> Result<&'static dyn SignatureAlgorithm, CryptoError> {
    let wanted = if name.eq_ignore_ascii_case(DEFAULT_ALIAS) { DEFAULT_SIGNATURE } else { name };

    SIGNATURES
        .iter()
        .copied()
        .find(|alg| alg.details().name.eq_ignore_ascii_case(wanted))
        .ok_or_else(|| CryptoError::UnsupportedAlgorithm {
            role: "signature",
            name: name.to_string(),
        })
}

/// Details of every supported KEM, in registry order.
pub fn supported_kems() -> Vec<KemDetails> {
    KEMS.iter().map(|alg| alg.details()).collect()
}

/// Details of every supported signature scheme, in registry order.
pub fn supported_signatures() -> Vec<SignatureDetails> {
    SIGNATURES.iter().map(|alg| alg.details()).collect()
}

/// Reject `key` unless it is exactly `expected` bytes.
pub(crate) fn check_key_len(
    kind: &'static str,
    key: &[u8],
    expected: usize,
) -> Result<(), CryptoError> {
    if key.len() == expected {
        Ok(())
    } else {
        Err(CryptoError::InvalidKeyLength { kind, expected, actual: key.len() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(kem("kyber512").unwrap().details().name, "Kyber512");
        assert_eq!(kem("ml-kem-768").unwrap().details().name, "ML-KEM-768");
        assert_eq!(signature("DILITHIUM5").unwrap().details().name, "Dilithium5");
    }

    #[test]
    fn default_alias_resolves_per_role() {
        assert_eq!(kem("DEFAULT").unwrap().details().name, DEFAULT_KEM);
        assert_eq!(signature("default").unwrap().details().name, DEFAULT_SIGNATURE);
    }

    #[test]
    fn unknown_algorithm_is_rejected() {
        let err = kem("Kyber9000").err().unwrap();
        assert_eq!(
            err,
            CryptoError::UnsupportedAlgorithm { role: "kem", name: "Kyber9000".to_string() }
        );
    }

    #[test]
    fn roles_do_not_cross() {
        assert!(kem("Dilithium2").is_err());
        assert!(signature("Kyber512").is_err());
    }

    #[test]
    fn registry_names_are_unique() {
        let kems = supported_kems();
        let sigs = supported_signatures();
        for (i, a) in kems.iter().enumerate() {
            for b in &kems[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
        for (i, a) in sigs.iter().enumerate() {
            for b in &sigs[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(b.name));
            }
        }
    }

    #[test]
    fn kyber_and_ml_kem_share_sizes() {
        for (kyber, ml_kem) in
            [("Kyber512", "ML-KEM-512"), ("Kyber768", "ML-KEM-768"), ("Kyber1024", "ML-KEM-1024")]
        {
            let a = kem(kyber).unwrap().details();
            let b = kem(ml_kem).unwrap().details();
            assert_eq!(a.public_key_len, b.public_key_len);
            assert_eq!(a.secret_key_len, b.secret_key_len);
            assert_eq!(a.ciphertext_len, b.ciphertext_len);
            assert_eq!(a.shared_secret_len, b.shared_secret_len);
        }
    }

    #[test]
    fn check_key_len_reports_both_lengths() {
        assert!(check_key_len("public key", &[0u8; 4], 4).is_ok());
        assert_eq!(
            check_key_len("public key", &[0u8; 3], 4),
            Err(CryptoError::InvalidKeyLength { kind: "public key", expected: 4, actual: 3 })
        );
    }
}
