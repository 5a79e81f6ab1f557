//! Command tree and dispatch.
//!
//! Each command resolves its arguments with [`crate::input::resolve`], runs
//! one `pqkit_crypto` flow, then writes the result either to a file (atomic,
//! see [`crate::output`]) or to `out`. Nothing is written until the whole
//! result exists in memory.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use clap::{Args, Subcommand};
use pqkit_crypto::{
    DEFAULT_ALIAS, KeyPair, generate_kem_keypair, hybrid, signature, supported_kems,
    supported_signatures,
};
use tracing::info;
use zeroize::Zeroizing;

use crate::{
    error::CliError,
    input::{InputRole, resolve},
    output::{self, PUBLIC_MODE, SECRET_MODE},
};

/// Top-level commands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Encrypt a message to a KEM public key
    Encrypt(OperationArgs),
    /// Decrypt a message with a KEM secret key
    Decrypt(OperationArgs),
    /// Sign a message with a signature secret key
    Sign(OperationArgs),
    /// Verify a detached signature
    Verify(VerifyArgs),
    /// Generate key pairs
    #[command(subcommand)]
    Keygen(KeygenCommand),
    /// List supported algorithms and their sizes
    Info,
}

/// Key pair kinds.
#[derive(Subcommand, Debug, Clone)]
pub enum KeygenCommand {
    /// Generate a KEM key pair
    Kem(KeygenArgs),
    /// Generate a signature key pair
    Sig(KeygenArgs),
}

/// Arguments shared by encrypt, decrypt and sign.
#[derive(Args, Debug, Clone)]
pub struct OperationArgs {
    /// Key to use (file path or hex)
    #[arg(short, long)]
    pub key: String,

    /// Input data (file path, hex or literal text)
    #[arg(short, long)]
    pub data: String,

    /// Algorithm identifier
    #[arg(short, long, default_value = DEFAULT_ALIAS)]
    pub algorithm: String,

    /// Output file (stdout if omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for verify.
#[derive(Args, Debug, Clone)]
pub struct VerifyArgs {
    /// Public key (file path or hex)
    #[arg(short, long)]
    pub key: String,

    /// Signed data (file path, hex or literal text)
    #[arg(short, long)]
    pub data: String,

    /// Signature (file path or hex)
    #[arg(short, long)]
    pub signature: String,

    /// Signature algorithm identifier
    #[arg(short, long, default_value = DEFAULT_ALIAS)]
    pub algorithm: String,
}

/// Arguments for key generation.
#[derive(Args, Debug, Clone)]
pub struct KeygenArgs {
    /// Algorithm identifier
    #[arg(short, long, default_value = DEFAULT_ALIAS)]
    pub algorithm: String,

    /// Output basename; writes `<basename>.pub` and `<basename>.priv`
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Terminal result of a command that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Command completed
    Success,
    /// Signature is well-formed but does not verify
    SignatureInvalid,
}

/// Run one command, writing stdout output to `out`.
pub fn run(command: &Command, out: &mut impl Write) -> Result<Outcome, CliError> {
    match command {
        Command::Encrypt(args) => encrypt(args, out),
        Command::Decrypt(args) => decrypt(args, out),
        Command::Sign(args) => sign(args, out),
        Command::Verify(args) => verify(args, out),
        Command::Keygen(KeygenCommand::Kem(args)) => {
            let keys = generate_kem_keypair(&args.algorithm)?;
            export_key_pair(&keys, args.output.as_deref(), out)
        },
        Command::Keygen(KeygenCommand::Sig(args)) => {
            let keys = signature::generate_keypair(&args.algorithm)?;
            export_key_pair(&keys, args.output.as_deref(), out)
        },
        Command::Info => list_algorithms(out),
    }
}

fn encrypt(args: &OperationArgs, out: &mut impl Write) -> Result<Outcome, CliError> {
    let public_key = resolve(&args.key, InputRole::Key)?;
    let plaintext = Zeroizing::new(resolve(&args.data, InputRole::Data)?);

    let wire = hybrid::encrypt(&public_key, &plaintext, &args.algorithm)?;

    match &args.output {
        Some(path) => output::write_file(path, &wire.encode(), PUBLIC_MODE)?,
        None => emit(out, format_args!("{}", hex::encode(wire.encode_without_nonce())))?,
    }
    info!(algorithm = %args.algorithm, len = wire.encoded_len(), "encrypted");
    Ok(Outcome::Success)
}

fn decrypt(args: &OperationArgs, out: &mut impl Write) -> Result<Outcome, CliError> {
    let secret_key = Zeroizing::new(resolve(&args.key, InputRole::Key)?);
    let wire = resolve(&args.data, InputRole::Data)?;

    let plaintext = Zeroizing::new(hybrid::decrypt(&secret_key, &wire, &args.algorithm)?);

    match &args.output {
        Some(path) => output::write_file(path, &plaintext, PUBLIC_MODE)?,
        None => emit_bytes(out, &plaintext)?,
    }
    info!(algorithm = %args.algorithm, len = plaintext.len(), "decrypted");
    Ok(Outcome::Success)
}

fn sign(args: &OperationArgs, out: &mut impl Write) -> Result<Outcome, CliError> {
    let secret_key = Zeroizing::new(resolve(&args.key, InputRole::Key)?);
    let message = resolve(&args.data, InputRole::Data)?;

    let signature = signature::sign(&secret_key, &message, &args.algorithm)?;

    match &args.output {
        Some(path) => output::write_file(path, &signature, PUBLIC_MODE)?,
        None => emit(out, format_args!("{}", hex::encode(&signature)))?,
    }
    info!(algorithm = %args.algorithm, len = signature.len(), "signed");
    Ok(Outcome::Success)
}

fn verify(args: &VerifyArgs, out: &mut impl Write) -> Result<Outcome, CliError> {
    let public_key = resolve(&args.key, InputRole::Key)?;
    let message = resolve(&args.data, InputRole::Data)?;
    let signature = resolve(&args.signature, InputRole::Key)?;

    if signature::verify(&public_key, &message, &signature, &args.algorithm)? {
        emit(out, format_args!("SIGNATURE VALID"))?;
        Ok(Outcome::Success)
    } else {
        emit(out, format_args!("SIGNATURE NOT VALID"))?;
        Ok(Outcome::SignatureInvalid)
    }
}

fn export_key_pair(
    keys: &KeyPair,
    basename: Option<&Path>,
    out: &mut impl Write,
) -> Result<Outcome, CliError> {
    match basename {
        Some(basename) => {
            let (public_path, secret_path) = output::key_pair_paths(basename);
            output::write_file(&secret_path, &keys.secret_key, SECRET_MODE)?;
            output::write_file(&public_path, &keys.public_key, PUBLIC_MODE)?;
            info!(
                public = %public_path.display(),
                secret = %secret_path.display(),
                "exported key pair"
            );
        },
        None => {
            let secret_hex = Zeroizing::new(hex::encode(&*keys.secret_key));
            emit(out, format_args!("pub: {}", hex::encode(&keys.public_key)))?;
            emit(out, format_args!("priv: {}", secret_hex.as_str()))?;
        },
    }
    Ok(Outcome::Success)
}

fn list_algorithms(out: &mut impl Write) -> Result<Outcome, CliError> {
    emit(out, format_args!("Supported signatures:"))?;
    for sig in supported_signatures() {
        emit(
            out,
            format_args!(
                "{}\tpublic key {} bytes, secret key {} bytes, signature {} bytes",
                sig.name, sig.public_key_len, sig.secret_key_len, sig.signature_len
            ),
        )?;
    }

    emit(out, format_args!("\nSupported kems:"))?;
    for kem in supported_kems() {
        emit(
            out,
            format_args!(
                "{}\tpublic key {} bytes, secret key {} bytes, ciphertext {} bytes",
                kem.name, kem.public_key_len, kem.secret_key_len, kem.ciphertext_len
            ),
        )?;
    }
    Ok(Outcome::Success)
}

/// Write one line to stdout.
fn emit(out: &mut impl Write, line: std::fmt::Arguments<'_>) -> Result<(), CliError> {
    writeln!(out, "{line}")
        .map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source })
}

/// Write raw bytes and a newline to stdout.
fn emit_bytes(out: &mut impl Write, bytes: &[u8]) -> Result<(), CliError> {
    out.write_all(bytes)
        .and_then(|()| out.write_all(b"\n"))
        .map_err(|source| CliError::Io { path: PathBuf::from("<stdout>"), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_string(command: &Command) -> (Outcome, String) {
        let mut out = Vec::new();
        let outcome = run(command, &mut out).unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn info_lists_every_algorithm() {
        let (outcome, text) = run_to_string(&Command::Info);

        assert_eq!(outcome, Outcome::Success);
        assert!(text.starts_with("Supported signatures:\n"));
        assert!(text.contains("\n\nSupported kems:\n"));
        for name in ["Dilithium2", "Dilithium3", "Dilithium5", "Kyber512", "ML-KEM-1024"] {
            assert!(text.contains(name), "missing {name}");
        }
        assert!(text.contains("Kyber512\tpublic key 800 bytes, secret key 1632 bytes"));
    }

    #[test]
    fn keygen_to_stdout_prints_hex_lines() {
        let command = Command::Keygen(KeygenCommand::Kem(KeygenArgs {
            algorithm: "Kyber512".to_string(),
            output: None,
        }));
        let (_, text) = run_to_string(&command);

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let public = lines[0].strip_prefix("pub: ").unwrap();
        let secret = lines[1].strip_prefix("priv: ").unwrap();
        assert_eq!(hex::decode(public).unwrap().len(), 800);
        assert_eq!(hex::decode(secret).unwrap().len(), 1632);
    }

    #[test]
    fn encrypt_to_stdout_omits_nonce() {
        let keys = generate_kem_keypair("Kyber512").unwrap();
        let command = Command::Encrypt(OperationArgs {
            key: hex::encode(&keys.public_key),
            data: "hello world".to_string(),
            algorithm: "Kyber512".to_string(),
            output: None,
        });
        let (_, text) = run_to_string(&command);

        let bytes = hex::decode(text.trim_end()).unwrap();
        assert_eq!(bytes.len(), 768 + 11 + 16);
    }

    #[test]
    fn decrypt_to_stdout_prints_text_line() {
        let keys = generate_kem_keypair("Kyber768").unwrap();
        let wire = hybrid::encrypt(&keys.public_key, b"hello world", "Kyber768").unwrap();

        let command = Command::Decrypt(OperationArgs {
            key: hex::encode(&*keys.secret_key),
            data: hex::encode(wire.encode()),
            algorithm: "DEFAULT".to_string(),
            output: None,
        });
        let (outcome, text) = run_to_string(&command);

        assert_eq!(outcome, Outcome::Success);
        assert_eq!(text, "hello world\n");
    }

    #[test]
    fn decrypt_to_stdout_keeps_binary_plaintext() {
        let plaintext = [0xff, 0xfe, 0x00, 0x80];
        let keys = generate_kem_keypair("Kyber512").unwrap();
        let wire = hybrid::encrypt(&keys.public_key, &plaintext, "Kyber512").unwrap();

        let command = Command::Decrypt(OperationArgs {
            key: hex::encode(&*keys.secret_key),
            data: hex::encode(wire.encode()),
            algorithm: "Kyber512".to_string(),
            output: None,
        });
        let mut out = Vec::new();

        assert_eq!(run(&command, &mut out).unwrap(), Outcome::Success);
        assert_eq!(out, [0xff, 0xfe, 0x00, 0x80, b'\n']);
    }

    #[test]
    fn sign_and_verify_through_hex() {
        let keys = signature::generate_keypair("Dilithium2").unwrap();
        let sign = Command::Sign(OperationArgs {
            key: hex::encode(&*keys.secret_key),
            data: "message".to_string(),
            algorithm: "Dilithium2".to_string(),
            output: None,
        });
        let (_, signature_hex) = run_to_string(&sign);

        let verify = |data: &str| {
            Command::Verify(VerifyArgs {
                key: hex::encode(&keys.public_key),
                data: data.to_string(),
                signature: signature_hex.trim_end().to_string(),
                algorithm: "Dilithium2".to_string(),
            })
        };

        assert_eq!(
            run_to_string(&verify("message")),
            (Outcome::Success, "SIGNATURE VALID\n".to_string())
        );
        assert_eq!(
            run_to_string(&verify("tampered")),
            (Outcome::SignatureInvalid, "SIGNATURE NOT VALID\n".to_string())
        );
    }

    #[test]
    fn bad_key_argument_fails_before_crypto() {
        let command = Command::Encrypt(OperationArgs {
            key: "not-a-key".to_string(),
            data: "hello".to_string(),
            algorithm: "Kyber512".to_string(),
            output: None,
        });
        let mut out = Vec::new();

        let err = run(&command, &mut out).unwrap_err();
        assert!(matches!(err, CliError::InputResolution { role: InputRole::Key, .. }));
        assert!(out.is_empty());
    }
}
