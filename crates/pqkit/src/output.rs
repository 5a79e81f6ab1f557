//! Atomic file output.
//!
//! Bytes go to a temporary file in the destination directory, get their
//! final permissions, and are renamed into place. A failure at any step
//! leaves no partially written file behind.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::CliError;

/// Mode for public keys, signatures, ciphertexts and plaintexts.
pub const PUBLIC_MODE: u32 = 0o644;

/// Mode for exported secret keys.
pub const SECRET_MODE: u32 = 0o400;

/// Write `bytes` to `path` atomically with Unix permissions `mode`.
///
/// An existing file at `path` is replaced.
pub fn write_file(path: &Path, bytes: &[u8], mode: u32) -> Result<(), CliError> {
    let io_err = |source| CliError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    set_mode(&tmp, mode).map_err(io_err)?;

    tmp.persist(path).map_err(|err| io_err(err.error))?;
    debug!(
        path = %path.display(),
        len = bytes.len(),
        mode = %format!("{mode:o}"),
        "wrote file"
    );
    Ok(())
}

/// `<basename>.pub` and `<basename>.priv`.
pub fn key_pair_paths(basename: &Path) -> (PathBuf, PathBuf) {
    let with_suffix = |suffix: &str| {
        let mut name = basename.as_os_str().to_owned();
        name.push(suffix);
        PathBuf::from(name)
    };
    (with_suffix(".pub"), with_suffix(".priv"))
}

#[cfg(unix)]
fn set_mode(file: &NamedTempFile, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.as_file().set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &NamedTempFile, _mode: u32) -> std::io::Result<()> {
    Ok(())
}
