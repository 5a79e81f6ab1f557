//! Command argument resolution.
//!
//! Every key, data and signature argument goes through [`resolve`]:
//!
//! 1. Read it as a file path
//! 2. Otherwise decode it as hex
//! 3. Otherwise, for [`InputRole::Data`] only, use the argument's own bytes
//!
//! Keys and signatures never fall back to literal text, so a mistyped key
//! path fails loudly instead of being used as key material.

use std::{fmt, fs, io};

use tracing::debug;

use crate::error::CliError;

/// What an argument is used for. Decides whether literal fallback applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRole {
    /// Public key, secret key or signature
    Key,
    /// Message, plaintext or ciphertext
    Data,
}

impl fmt::Display for InputRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key => f.write_str("key"),
            Self::Data => f.write_str("data"),
        }
    }
}

/// Turn a command argument into bytes.
///
/// # Errors
///
/// - `InputResolution`: [`InputRole::Key`] argument is neither a readable
///   file nor valid hex
pub fn resolve(argument: &str, role: InputRole) -> Result<Vec<u8>, CliError> {
    let read_err = match fs::read(argument) {
        Ok(bytes) => {
            debug!(%role, len = bytes.len(), "resolved argument from file");
            return Ok(bytes);
        },
        Err(err) => err,
    };
    debug!(%role, kind = ?read_err.kind(), "argument is not a readable file, trying hex");

    let hex_err = match hex::decode(argument) {
        Ok(bytes) => {
            debug!(%role, len = bytes.len(), "resolved argument from hex");
            return Ok(bytes);
        },
        Err(err) => err,
    };

    match role {
        InputRole::Key => Err(CliError::InputResolution {
            role,
            reason: format!("{} and not valid hex ({hex_err})", describe(&read_err)),
        }),
        InputRole::Data => {
            debug!(%role, len = argument.len(), "using argument as literal text");
            Ok(argument.as_bytes().to_vec())
        },
    }
}

fn describe(err: &io::Error) -> &'static str {
    match err.kind() {
        io::ErrorKind::NotFound => "no such file",
        io::ErrorKind::PermissionDenied => "file not readable",
        _ => "not a readable file",
    }
}
