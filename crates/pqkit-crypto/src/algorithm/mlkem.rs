//! ML-KEM (FIPS 203) parameter sets backed by the pure-Rust `ml-kem` crate.

use ml_kem::{
    Ciphertext, EncodedSizeUser, KemCore,
    kem::{Decapsulate, Encapsulate},
};
use rand::rngs::OsRng;
use zeroize::{Zeroize, Zeroizing};

use super::{KemAlgorithm, KemDetails, SecretBytes, check_key_len};
use crate::error::CryptoError;

macro_rules! ml_kem_algorithm {
    (
        $ty:ident, $name:literal, $kem:ty,
        pk: $pk:literal, sk: $sk:literal, ct: $ct:literal
    ) => {
        #[doc = concat!("`", $name, "` from the `ml-kem` crate.")]
        #[derive(Debug, Clone, Copy, Default)]
        pub struct $ty;

        impl KemAlgorithm for $ty {
            fn details(&self) -> KemDetails {
                KemDetails {
                    name: $name,
                    public_key_len: $pk,
                    secret_key_len: $sk,
                    ciphertext_len: $ct,
                    shared_secret_len: 32,
                }
            }

            fn keypair(&self) -> Result<(Vec<u8>, SecretBytes), CryptoError> {
                let (dk, ek) = <$kem as KemCore>::generate(&mut OsRng);
                Ok((ek.as_bytes().to_vec(), Zeroizing::new(dk.as_bytes().to_vec())))
            }

            fn encapsulate(
                &self,
                public_key: &[u8],
            ) -> Result<(Vec<u8>, SecretBytes), CryptoError> {
                check_key_len("public key", public_key, $pk)?;
                let encoded = public_key.try_into().map_err(|_| CryptoError::InvalidKeyLength {
                    kind: "public key",
                    expected: $pk,
                    actual: public_key.len(),
                })?;
                let ek = <$kem as KemCore>::EncapsulationKey::from_bytes(&encoded);

                let (ct, mut shared) = ek.encapsulate(&mut OsRng).map_err(|_| {
                    CryptoError::EncapsulationFailure {
                        reason: format!("{} could not draw randomness", $name),
                    }
                })?;
                let secret = Zeroizing::new(shared.as_slice().to_vec());
                shared.as_mut_slice().zeroize();
                Ok((ct.as_slice().to_vec(), secret))
            }

            fn decapsulate(
                &self,
                secret_key: &[u8],
                ciphertext: &[u8],
            ) -> Result<SecretBytes, CryptoError> {
                if secret_key.len() != $sk {
                    return Err(CryptoError::DecapsulationFailure {
                        reason: format!(
                            "secret key is {} bytes, {} requires {}",
                            secret_key.len(),
                            $name,
                            $sk
                        ),
                    });
                }
                let encoded = secret_key.try_into().map_err(|_| {
                    CryptoError::DecapsulationFailure {
                        reason: format!("malformed {} secret key", $name),
                    }
                })?;
                let dk = <$kem as KemCore>::DecapsulationKey::from_bytes(&encoded);
                let ct: Ciphertext<$kem> = ciphertext.try_into().map_err(|_| {
                    CryptoError::DecapsulationFailure {
                        reason: format!("malformed {} ciphertext", $name),
                    }
                })?;

                let mut shared =
                    dk.decapsulate(&ct).map_err(|_| CryptoError::DecapsulationFailure {
                        reason: format!("{} rejected the ciphertext", $name),
                    })?;
                let secret = Zeroizing::new(shared.as_slice().to_vec());
                shared.as_mut_slice().zeroize();
                Ok(secret)
            }
        }
    };
}

ml_kem_algorithm!(
    MlKem512, "ML-KEM-512", ml_kem::MlKem512,
    pk: 800, sk: 1632, ct: 768
);
ml_kem_algorithm!(
    MlKem768, "ML-KEM-768", ml_kem::MlKem768,
    pk: 1184, sk: 2400, ct: 1088
);
ml_kem_algorithm!(
    MlKem1024, "ML-KEM-1024", ml_kem::MlKem1024,
    pk: 1568, sk: 3168, ct: 1568
);
