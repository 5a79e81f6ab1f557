//! Fuzz target for hybrid decryption
//!
//! Encrypts an arbitrary plaintext, applies arbitrary mutations to the wire
//! bytes, then decrypts.
//!
//! # Strategy
//!
//! - One key pair per KEM, generated once
//! - Bit flips, truncation and appended garbage
//! - Raw arbitrary bytes with no valid encryption behind them
//!
//! # Invariants
//!
//! - Decrypt never panics
//! - Unmodified ciphertext decrypts to the original plaintext
//! - Any modification after the KEM ciphertext fails authentication
//! - Modified input never decrypts to a different plaintext

#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pqkit_crypto::{CryptoError, KeyPair, decrypt, encrypt, generate_kem_keypair, supported_kems};

#[derive(Debug, Arbitrary)]
struct Scenario {
    kem_index: u8,
    plaintext: Vec<u8>,
    mutation: Mutation,
}

#[derive(Debug, Arbitrary)]
enum Mutation {
    None,
    FlipBit { position: usize, bit: u8 },
    Truncate { keep: usize },
    Append { garbage: Vec<u8> },
    Replace { bytes: Vec<u8> },
}

fn key_pairs() -> &'static [(&'static str, KeyPair)] {
    static KEYS: OnceLock<Vec<(&'static str, KeyPair)>> = OnceLock::new();
    KEYS.get_or_init(|| {
        supported_kems()
            .into_iter()
            .map(|kem| (kem.name, generate_kem_keypair(kem.name).unwrap()))
            .collect()
    })
}

fuzz_target!(|scenario: Scenario| {
    let keys = key_pairs();
    let (algorithm, pair) = &keys[scenario.kem_index as usize % keys.len()];
    let l1 = supported_kems()[scenario.kem_index as usize % keys.len()].ciphertext_len;

    let original = encrypt(&pair.public_key, &scenario.plaintext, algorithm).unwrap().encode();
    let mut bytes = original.clone();

    let mut touched_after_kem = false;
    match scenario.mutation {
        Mutation::None => {},
        Mutation::FlipBit { position, bit } => {
            let index = position % bytes.len();
            bytes[index] ^= 1 << (bit % 8);
            touched_after_kem = index >= l1;
        },
        Mutation::Truncate { keep } => bytes.truncate(keep % bytes.len()),
        Mutation::Append { garbage } => {
            touched_after_kem = !garbage.is_empty();
            bytes.extend_from_slice(&garbage);
        },
        Mutation::Replace { bytes: raw } => bytes = raw,
    }

    let result = decrypt(&pair.secret_key, &bytes, algorithm);

    if bytes == original {
        assert_eq!(result.unwrap(), scenario.plaintext);
        return;
    }
    if touched_after_kem {
        assert_eq!(result.unwrap_err(), CryptoError::AuthenticationFailure);
        return;
    }
    if let Ok(plaintext) = result {
        assert_eq!(plaintext, scenario.plaintext, "forged ciphertext decrypted");
    }
});
