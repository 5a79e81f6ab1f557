//! Command tests against the real filesystem.
//!
//! Each test works in its own temporary directory and drives
//! [`pqkit::run`] the way the binary does, with stdout captured in a buffer.

use std::{fs, path::Path};

use pqkit::{
    CliError, Command, InputRole, KeygenCommand, Outcome,
    commands::{KeygenArgs, OperationArgs, VerifyArgs},
    resolve, run,
};
use pqkit_crypto::CryptoError;
use proptest::prelude::*;
use tempfile::tempdir;

fn path_arg(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

fn run_quiet(command: &Command) -> Result<Outcome, CliError> {
    let mut out = Vec::new();
    run(command, &mut out)
}

fn keygen_kem(algorithm: &str, basename: &Path) -> Command {
    Command::Keygen(KeygenCommand::Kem(KeygenArgs {
        algorithm: algorithm.to_string(),
        output: Some(basename.to_path_buf()),
    }))
}

fn keygen_sig(algorithm: &str, basename: &Path) -> Command {
    Command::Keygen(KeygenCommand::Sig(KeygenArgs {
        algorithm: algorithm.to_string(),
        output: Some(basename.to_path_buf()),
    }))
}

#[test]
fn keygen_writes_key_files() {
    let dir = tempdir().unwrap();
    let basename = dir.path().join("alice");

    assert_eq!(run_quiet(&keygen_kem("Kyber512", &basename)).unwrap(), Outcome::Success);

    assert_eq!(fs::read(dir.path().join("alice.pub")).unwrap().len(), 800);
    assert_eq!(fs::read(dir.path().join("alice.priv")).unwrap().len(), 1632);
}

#[cfg(unix)]
#[test]
fn keygen_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    run_quiet(&keygen_sig("Dilithium2", &dir.path().join("signer"))).unwrap();

    let mode = |name: &str| {
        fs::metadata(dir.path().join(name)).unwrap().permissions().mode() & 0o777
    };
    assert_eq!(mode("signer.priv"), 0o400);
    assert_eq!(mode("signer.pub"), 0o644);
}

#[test]
fn encrypt_decrypt_through_files() {
    let dir = tempdir().unwrap();
    let basename = dir.path().join("bob");
    run_quiet(&keygen_kem("ML-KEM-768", &basename)).unwrap();

    let message = dir.path().join("message.txt");
    fs::write(&message, b"attack at dawn").unwrap();
    let ciphertext = dir.path().join("message.bin");
    let recovered = dir.path().join("recovered.txt");

    run_quiet(&Command::Encrypt(OperationArgs {
        key: path_arg(&dir.path().join("bob.pub")),
        data: path_arg(&message),
        algorithm: "ml-kem-768".to_string(),
        output: Some(ciphertext.clone()),
    }))
    .unwrap();

    // KEM ciphertext (1088) + nonce (12) + plaintext (14) + tag (16)
    assert_eq!(fs::read(&ciphertext).unwrap().len(), 1088 + 12 + 14 + 16);

    run_quiet(&Command::Decrypt(OperationArgs {
        key: path_arg(&dir.path().join("bob.priv")),
        data: path_arg(&ciphertext),
        algorithm: "ML-KEM-768".to_string(),
        output: Some(recovered.clone()),
    }))
    .unwrap();

    assert_eq!(fs::read(&recovered).unwrap(), b"attack at dawn");
}

#[test]
fn decrypt_with_wrong_algorithm_is_truncated_or_rejected() {
    let dir = tempdir().unwrap();
    run_quiet(&keygen_kem("Kyber512", &dir.path().join("k"))).unwrap();
    let ciphertext = dir.path().join("c.bin");

    run_quiet(&Command::Encrypt(OperationArgs {
        key: path_arg(&dir.path().join("k.pub")),
        data: "short".to_string(),
        algorithm: "Kyber512".to_string(),
        output: Some(ciphertext.clone()),
    }))
    .unwrap();

    // Kyber1024 expects a 1568-byte KEM ciphertext, more than the whole file
    let err = run_quiet(&Command::Decrypt(OperationArgs {
        key: path_arg(&dir.path().join("k.priv")),
        data: path_arg(&ciphertext),
        algorithm: "Kyber1024".to_string(),
        output: None,
    }))
    .unwrap_err();

    assert!(matches!(err, CliError::Crypto(CryptoError::TruncatedInput { .. })));
}

#[test]
fn tampered_ciphertext_file_fails_authentication() {
    let dir = tempdir().unwrap();
    run_quiet(&keygen_kem("Kyber768", &dir.path().join("k"))).unwrap();
    let ciphertext = dir.path().join("c.bin");

    run_quiet(&Command::Encrypt(OperationArgs {
        key: path_arg(&dir.path().join("k.pub")),
        data: "payload".to_string(),
        algorithm: "DEFAULT".to_string(),
        output: Some(ciphertext.clone()),
    }))
    .unwrap();

    let mut bytes = fs::read(&ciphertext).unwrap();
    let last = bytes.len() - 1;
    bytes[last] ^= 0x80;
    fs::write(&ciphertext, &bytes).unwrap();

    let err = run_quiet(&Command::Decrypt(OperationArgs {
        key: path_arg(&dir.path().join("k.priv")),
        data: path_arg(&ciphertext),
        algorithm: "DEFAULT".to_string(),
        output: None,
    }))
    .unwrap_err();

    assert!(matches!(err, CliError::Crypto(CryptoError::AuthenticationFailure)));
    assert!(err.is_tamper_evidence());
}

#[test]
fn sign_verify_through_files() {
    let dir = tempdir().unwrap();
    run_quiet(&keygen_sig("Dilithium3", &dir.path().join("signer"))).unwrap();

    let document = dir.path().join("doc.txt");
    fs::write(&document, b"release notes").unwrap();
    let signature = dir.path().join("doc.sig");

    run_quiet(&Command::Sign(OperationArgs {
        key: path_arg(&dir.path().join("signer.priv")),
        data: path_arg(&document),
        algorithm: "Dilithium3".to_string(),
        output: Some(signature.clone()),
    }))
    .unwrap();

    let verify = || {
        Command::Verify(VerifyArgs {
            key: path_arg(&dir.path().join("signer.pub")),
            data: path_arg(&document),
            signature: path_arg(&signature),
            algorithm: "Dilithium3".to_string(),
        })
    };

    let mut out = Vec::new();
    assert_eq!(run(&verify(), &mut out).unwrap(), Outcome::Success);
    assert_eq!(out, b"SIGNATURE VALID\n");

    // Forge: flip one byte of the signature
    let mut forged = fs::read(&signature).unwrap();
    forged[0] ^= 0x01;
    fs::write(&signature, &forged).unwrap();

    let mut out = Vec::new();
    assert_eq!(run(&verify(), &mut out).unwrap(), Outcome::SignatureInvalid);
    assert_eq!(out, b"SIGNATURE NOT VALID\n");
}

#[test]
fn truncated_signature_is_an_error_not_invalid() {
    let dir = tempdir().unwrap();
    run_quiet(&keygen_sig("Dilithium2", &dir.path().join("s"))).unwrap();

    let err = run_quiet(&Command::Verify(VerifyArgs {
        key: path_arg(&dir.path().join("s.pub")),
        data: "message".to_string(),
        signature: "00112233".to_string(),
        algorithm: "Dilithium2".to_string(),
    }))
    .unwrap_err();

    assert!(matches!(err, CliError::Crypto(CryptoError::VerificationError { .. })));
}

#[test]
fn missing_output_directory_leaves_nothing_behind() {
    let dir = tempdir().unwrap();
    let basename = dir.path().join("absent").join("key");

    let err = run_quiet(&keygen_kem("Kyber512", &basename)).unwrap_err();

    assert!(matches!(err, CliError::Io { .. }));
    assert!(!dir.path().join("absent").exists());
}

#[test]
fn unknown_algorithm_is_reported() {
    let dir = tempdir().unwrap();
    let err = run_quiet(&keygen_kem("NTRU", &dir.path().join("k"))).unwrap_err();

    assert!(matches!(
        err,
        CliError::Crypto(CryptoError::UnsupportedAlgorithm { role: "kem", .. })
    ));
    assert!(!dir.path().join("k.pub").exists());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_data_role_never_fails_on_non_path(text in "[g-z ]{1,64}") {
        // Not hex (letters past 'f'), not an existing path
        prop_assert_eq!(resolve(&text, InputRole::Data).unwrap(), text.as_bytes().to_vec());
        prop_assert!(resolve(&text, InputRole::Key).is_err());
    }

    #[test]
    fn prop_hex_resolves_identically_for_both_roles(
        bytes in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let encoded = hex::encode(&bytes);
        prop_assert_eq!(resolve(&encoded, InputRole::Key).unwrap(), bytes.clone());
        prop_assert_eq!(resolve(&encoded, InputRole::Data).unwrap(), bytes);
    }
}
