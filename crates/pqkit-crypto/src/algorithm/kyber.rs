//! Kyber (round 3) parameter sets backed by `pqcrypto-kyber`.
//!
//! `PQClean`'s Kyber uses implicit rejection: decapsulating a well-formed
//! ciphertext under the wrong secret key yields an unrelated shared secret
//! rather than an error. The mismatch then surfaces as an AEAD
//! authentication failure one layer up.

use pqcrypto_traits::kem::{Ciphertext as _, PublicKey as _, SecretKey as _, SharedSecret as _};
use zeroize::Zeroizing;

use super::{KemAlgorithm, KemDetails, SecretBytes, check_key_len};
use crate::error::CryptoError;

macro_rules! pqclean_kyber {
    ($ty:ident, $name:literal, $module:ident) => {
        #[doc = concat!("`", $name, "` from `PQClean`.")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl KemAlgorithm for $ty {
            fn details(&self) -> KemDetails {
                KemDetails {
                    name: $name,
                    public_key_len: pqcrypto_kyber::$module::public_key_bytes(),
                    secret_key_len: pqcrypto_kyber::$module::secret_key_bytes(),
                    ciphertext_len: pqcrypto_kyber::$module::ciphertext_bytes(),
                    shared_secret_len: pqcrypto_kyber::$module::shared_secret_bytes(),
                }
            }

            fn keypair(&self) -> Result<(Vec<u8>, SecretBytes), CryptoError> {
                let (pk, sk) = pqcrypto_kyber::$module::keypair();
                Ok((pk.as_bytes().to_vec(), Zeroizing::new(sk.as_bytes().to_vec())))
            }

            fn encapsulate(
                &self,
                public_key: &[u8],
            ) -> Result<(Vec<u8>, SecretBytes), CryptoError> {
                check_key_len("public key", public_key, self.details().public_key_len)?;
                let pk = pqcrypto_kyber::$module::PublicKey::from_bytes(public_key).map_err(
                    |_| CryptoError::InvalidKeyLength {
                        kind: "public key",
                        expected: self.details().public_key_len,
                        actual: public_key.len(),
                    },
                )?;

                let (shared, ct) = pqcrypto_kyber::$module::encapsulate(&pk);
                Ok((ct.as_bytes().to_vec(), Zeroizing::new(shared.as_bytes().to_vec())))
            }

            fn decapsulate(
                &self,
                secret_key: &[u8],
                ciphertext: &[u8],
            ) -> Result<SecretBytes, CryptoError> {
                let sk = pqcrypto_kyber::$module::SecretKey::from_bytes(secret_key).map_err(
                    |_| CryptoError::DecapsulationFailure {
                        reason: format!(
                            "secret key is {} bytes, {} requires {}",
                            secret_key.len(),
                            $name,
                            self.details().secret_key_len
                        ),
                    },
                )?;
                let ct = pqcrypto_kyber::$module::Ciphertext::from_bytes(ciphertext).map_err(
                    |_| CryptoError::DecapsulationFailure {
                        reason: format!("malformed {} ciphertext", $name),
                    },
                )?;

                let shared = pqcrypto_kyber::$module::decapsulate(&ct, &sk);
                Ok(Zeroizing::new(shared.as_bytes().to_vec()))
            }
        }
    };
}

pqclean_kyber!(Kyber512, "Kyber512", kyber512);
pqclean_kyber!(Kyber768, "Kyber768", kyber768);
pqclean_kyber!(Kyber1024, "Kyber1024", kyber1024);
