//! Acquia Cloud API credential storage.
//!
//! Credentials live in `~/.acquia/cloud_api.conf` as a JSON object with
//! `key` and `secret` fields. The file is shared with other Acquia tooling,
//! so the format is fixed.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroize;

use crate::core::constants;
use crate::error::{CredentialsError, Result};

/// An API key and secret pair.
///
/// The secret is wiped from memory on drop and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub key: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl Drop for Credentials {
    fn drop(&mut self) {
        self.secret.zeroize();
    }
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Store at the standard location under the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::NoHomeDir` if HOME cannot be resolved.
    pub fn locate() -> Result<Self> {
        let home = dirs::home_dir().ok_or(CredentialsError::NoHomeDir)?;
        Ok(Self::at(
            home.join(constants::CREDENTIALS_DIR)
                .join(constants::CREDENTIALS_FILE),
        ))
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load stored credentials.
    ///
    /// Returns `Ok(None)` when no credential file exists.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::Malformed` if the file exists but does not
    /// hold a `{key, secret}` JSON object, and `ReadFailed` on I/O failure.
    pub fn load(&self) -> Result<Option<Credentials>> {
        debug!(path = %self.path.display(), "loading credentials");

        if !self.path.exists() {
            debug!("no credential file");
            return Ok(None);
        }

        #[cfg(unix)]
        check_permissions(&self.path);

        let contents = fs::read_to_string(&self.path).map_err(|source| {
            CredentialsError::ReadFailed {
                path: self.path.clone(),
                source,
            }
        })?;

        let credentials: Credentials =
            serde_json::from_str(&contents).map_err(|source| CredentialsError::Malformed {
                path: self.path.clone(),
                source,
            })?;

        Ok(Some(credentials))
    }

    /// Write credentials, replacing any existing file.
    ///
    /// Creates the containing directory if needed and restricts the file to
    /// the owner on Unix.
    ///
    /// # Errors
    ///
    /// Returns `CredentialsError::WriteFailed` if the directory or file
    /// cannot be written.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        debug!(path = %self.path.display(), "saving credentials");

        let write_failed = |source: std::io::Error| CredentialsError::WriteFailed {
            path: self.path.clone(),
            source,
        };

        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir).map_err(write_failed)?;
        }

        let json = serde_json::to_string(credentials).map_err(CredentialsError::Encode)?;
        fs::write(&self.path, json).map_err(write_failed)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600))
                .map_err(write_failed)?;
        }

        Ok(())
    }
}

#[cfg(unix)]
fn check_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    if let Ok(metadata) = fs::metadata(path) {
        let mode = metadata.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            tracing::warn!(
                path = %path.display(),
                mode = %format!("{:o}", mode),
                "credential file is readable by other users"
            );
        }
    }
}
