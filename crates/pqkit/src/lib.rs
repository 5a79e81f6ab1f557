//! pqkit command-line tool.
//!
//! Wraps the [`pqkit_crypto`] flows in a command tree: argument resolution
//! (file, hex or literal), atomic file output and stdout formatting. The
//! binary in `main.rs` only parses arguments, installs logging and maps the
//! [`Outcome`] or [`CliError`] to an exit status.
//!
//! # Commands
//!
//! - `encrypt -k <pub> -d <data> [-a alg] [-o file]`
//! - `decrypt -k <priv> -d <wire> [-a alg] [-o file]`
//! - `sign -k <priv> -d <data> [-a alg] [-o file]`
//! - `verify -k <pub> -d <data> -s <sig> [-a alg]`
//! - `keygen kem|sig [-a alg] [-o basename]`
//! - `info`

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;

pub use commands::{Command, KeygenCommand, Outcome, run};
pub use config::RuntimeConfig;
pub use error::CliError;
pub use input::{InputRole, resolve};
