//! Command-level error type.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use pqkit_crypto::CryptoError;
use thiserror::Error;

use crate::input::InputRole;

/// Errors that abort a command.
///
/// Every variant is terminal: `main` prints it with [`CliError::report`]
/// and exits non-zero. A signature that does not verify is not an error, see
/// [`crate::commands::Outcome::SignatureInvalid`].
#[derive(Debug, Error)]
pub enum CliError {
    /// Argument is neither a readable file nor valid hex
    #[error("cannot resolve {role} argument: {reason}")]
    InputResolution {
        /// Which argument failed
        role: InputRole,
        /// Why the last resolution step failed
        reason: String,
    },

    /// Reading or writing a file (or stdout) failed
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        /// Path being accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Cryptographic operation failed
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

impl CliError {
    /// Returns true if the failure says something about the input's
    /// integrity rather than about how the tool was invoked.
    pub fn is_tamper_evidence(&self) -> bool {
        match self {
            Self::Crypto(err) => err.is_tamper_evidence(),
            Self::InputResolution { .. } | Self::Io { .. } => false,
        }
    }

    /// Write the one-line diagnostic for a failed command.
    ///
    /// Independent of the log filter, so a failure is never silent.
    pub fn report(&self, stderr: &mut impl Write) {
        let _ = writeln!(stderr, "pqkit: {self}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_writes_diagnostic_line() {
        let err = CliError::from(CryptoError::AuthenticationFailure);
        let mut stderr = Vec::new();

        err.report(&mut stderr);
        assert_eq!(
            String::from_utf8(stderr).unwrap(),
            "pqkit: authentication failed: ciphertext rejected\n"
        );
    }

    #[test]
    fn io_error_names_path() {
        let err = CliError::Io {
            path: PathBuf::from("/tmp/missing.pub"),
            source: io::Error::new(io::ErrorKind::NotFound, "not found"),
        };
        assert_eq!(err.to_string(), "i/o error on /tmp/missing.pub: not found");
    }

    #[test]
    fn crypto_errors_are_transparent() {
        let err = CliError::from(CryptoError::AuthenticationFailure);
        assert_eq!(err.to_string(), CryptoError::AuthenticationFailure.to_string());
        assert!(err.is_tamper_evidence());
    }

    #[test]
    fn input_resolution_is_not_tamper_evidence() {
        let err = CliError::InputResolution { role: InputRole::Key, reason: "bad hex".into() };
        assert_eq!(err.to_string(), "cannot resolve key argument: bad hex");
        assert!(!err.is_tamper_evidence());
    }
}
