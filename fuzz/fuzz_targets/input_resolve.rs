//! Fuzz target for command argument resolution
//!
//! # Invariants
//!
//! - Never panics on arbitrary UTF-8 arguments
//! - Data role never fails for a non-path argument
//! - Both roles agree whenever the key role succeeds

#![no_main]

use libfuzzer_sys::fuzz_target;
use pqkit::{InputRole, resolve};

fuzz_target!(|argument: &str| {
    let key = resolve(argument, InputRole::Key);
    let data = resolve(argument, InputRole::Data);

    match (key, data) {
        (Ok(key), Ok(data)) => assert_eq!(key, data),
        (Err(_), Ok(data)) => assert_eq!(data, argument.as_bytes()),
        (_, Err(err)) => panic!("data role failed: {err}"),
    }
});
