//! Fuzz target for signature verification
//!
//! Feeds arbitrary public keys, messages and signatures to every supported
//! signature scheme.
//!
//! # Invariants
//!
//! - Verify never panics
//! - Wrong-length keys or signatures are `VerificationError`, never `Ok`
//! - Well-formed random signatures do not verify

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pqkit_crypto::{CryptoError, signature, supported_signatures};

#[derive(Debug, Arbitrary)]
struct VerifyInput {
    scheme_index: u8,
    public_key: Vec<u8>,
    message: Vec<u8>,
    signature: Vec<u8>,
    pad_to_size: bool,
}

fuzz_target!(|input: VerifyInput| {
    let schemes = supported_signatures();
    let details = schemes[input.scheme_index as usize % schemes.len()];

    let mut public_key = input.public_key;
    let mut sig = input.signature;
    if input.pad_to_size {
        public_key.resize(details.public_key_len, 0);
        sig.resize(details.signature_len, 0);
    }

    let well_formed =
        public_key.len() == details.public_key_len && sig.len() == details.signature_len;

    match signature::verify(&public_key, &input.message, &sig, details.name) {
        Ok(valid) => {
            assert!(well_formed);
            assert!(!valid, "random signature verified");
        },
        Err(CryptoError::VerificationError { .. }) => assert!(!well_formed),
        Err(other) => panic!("unexpected verify error: {other}"),
    }
});
