//! Dilithium (round 3) parameter sets backed by `pqcrypto-dilithium`.

use pqcrypto_traits::sign::{DetachedSignature as _, PublicKey as _, SecretKey as _};
use zeroize::Zeroizing;

use super::{SecretBytes, SignatureAlgorithm, SignatureDetails, check_key_len};
use crate::error::CryptoError;

macro_rules! pqclean_dilithium {
    ($ty:ident, $name:literal, $module:ident) => {
        #[doc = concat!("`", $name, "` from `PQClean`.")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl SignatureAlgorithm for $ty {
            fn details(&self) -> SignatureDetails {
                SignatureDetails {
                    name: $name,
                    public_key_len: pqcrypto_dilithium::$module::public_key_bytes(),
                    secret_key_len: pqcrypto_dilithium::$module::secret_key_bytes(),
                    signature_len: pqcrypto_dilithium::$module::signature_bytes(),
                }
            }

            fn keypair(&self) -> Result<(Vec<u8>, SecretBytes), CryptoError> {
                let (pk, sk) = pqcrypto_dilithium::$module::keypair();
                Ok((pk.as_bytes().to_vec(), Zeroizing::new(sk.as_bytes().to_vec())))
            }

            fn sign(&self, secret_key: &[u8], message: &[u8]) -> Result<Vec<u8>, CryptoError> {
                check_key_len("secret key", secret_key, self.details().secret_key_len)?;
                let sk = pqcrypto_dilithium::$module::SecretKey::from_bytes(secret_key).map_err(
                    |_| CryptoError::InvalidKeyLength {
                        kind: "secret key",
                        expected: self.details().secret_key_len,
                        actual: secret_key.len(),
                    },
                )?;

                let signature = pqcrypto_dilithium::$module::detached_sign(message, &sk);
                Ok(signature.as_bytes().to_vec())
            }

            fn verify(
                &self,
                public_key: &[u8],
                message: &[u8],
                signature: &[u8],
            ) -> Result<bool, CryptoError> {
                let details = self.details();
                if public_key.len() != details.public_key_len {
                    return Err(CryptoError::VerificationError {
                        reason: format!(
                            "public key is {} bytes, {} requires {}",
                            public_key.len(),
                            $name,
                            details.public_key_len
                        ),
                    });
                }
                if signature.len() != details.signature_len {
                    return Err(CryptoError::VerificationError {
                        reason: format!(
                            "signature is {} bytes, {} requires {}",
                            signature.len(),
                            $name,
                            details.signature_len
                        ),
                    });
                }

                let pk = pqcrypto_dilithium::$module::PublicKey::from_bytes(public_key).map_err(
                    |_| CryptoError::VerificationError {
                        reason: format!("malformed {} public key", $name),
                    },
                )?;
                let sig = pqcrypto_dilithium::$module::DetachedSignature::from_bytes(signature)
                    .map_err(|_| CryptoError::VerificationError {
                        reason: format!("malformed {} signature", $name),
                    })?;

                Ok(pqcrypto_dilithium::$module::verify_detached_signature(&sig, message, &pk)
                    .is_ok())
            }
        }
    };
}

pqclean_dilithium!(Dilithium2, "Dilithium2", dilithium2);
pqclean_dilithium!(Dilithium3, "Dilithium3", dilithium3);
pqclean_dilithium!(Dilithium5, "Dilithium5", dilithium5);
