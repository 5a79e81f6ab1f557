//! Fuzz target for WireCiphertext::decode
//!
//! Decodes arbitrary bytes against every supported KEM ciphertext length
//! and against arbitrary (including overflowing) lengths.
//!
//! # Invariants
//!
//! - Never panics
//! - Accepts exactly when len >= L1 + 12 + 16
//! - Accepted input re-encodes to the same bytes

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pqkit_crypto::{CryptoError, NONCE_SIZE, TAG_SIZE, WireCiphertext, supported_kems};

#[derive(Debug, Arbitrary)]
struct DecodeInput {
    kem_index: u8,
    arbitrary_len: Option<usize>,
    bytes: Vec<u8>,
}

fuzz_target!(|input: DecodeInput| {
    let kems = supported_kems();
    let kem_len = input
        .arbitrary_len
        .unwrap_or(kems[input.kem_index as usize % kems.len()].ciphertext_len);

    match WireCiphertext::decode(&input.bytes, kem_len) {
        Ok(wire) => {
            assert!(input.bytes.len() >= kem_len + NONCE_SIZE + TAG_SIZE);
            assert_eq!(wire.kem_ciphertext().len(), kem_len);
            assert_eq!(wire.encode(), input.bytes);
        },
        Err(CryptoError::TruncatedInput { actual, .. }) => {
            assert_eq!(actual, input.bytes.len());
        },
        Err(other) => panic!("unexpected decode error: {other}"),
    }
});
