//! Credentials storage.
//!
//! The bearer token is the only state the client persists. It lives in
//! `~/.chitchat/.credentials.json` until the user logs out.

use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{ChatError, ChatResult};

/// The credentials directory name.
pub const CREDENTIALS_DIR: &str = ".chitchat";

/// The credentials file name.
const CREDENTIALS_FILE: &str = ".credentials.json";

/// Stored credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Credentials {
    /// Bearer token for the REST API.
    pub access_token: Option<String>,
}

impl Credentials {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            access_token: Some(token.into()),
        }
    }

    /// The token, if one is stored and non-blank.
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// Manages credential storage and retrieval.
#[derive(Debug, Clone)]
pub struct CredentialsManager {
    credentials_path: PathBuf,
}

impl CredentialsManager {
    /// Create a manager for the default location under the home directory.
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn new() -> Option<Self> {
        let home = dirs::home_dir()?;
        Some(Self::with_path(
            home.join(CREDENTIALS_DIR).join(CREDENTIALS_FILE),
        ))
    }

    /// Create a manager for an explicit file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            credentials_path: path.into(),
        }
    }

    pub fn credentials_path(&self) -> &Path {
        &self.credentials_path
    }

    /// Load credentials from the credentials file.
    ///
    /// A missing or unreadable file yields empty credentials.
    pub fn load(&self) -> Credentials {
        let file = match File::open(&self.credentials_path) {
            Ok(f) => f,
            Err(_) => return Credentials::default(),
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(creds) => creds,
            Err(e) => {
                warn!(path = %self.credentials_path.display(), error = %e, "Ignoring corrupt credentials file");
                Credentials::default()
            }
        }
    }

    /// Save credentials, creating the parent directory if needed.
    pub fn save(&self, credentials: &Credentials) -> ChatResult<()> {
        if let Some(parent) = self.credentials_path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.storage_error(e))?;
        }

        let file = File::create(&self.credentials_path).map_err(|e| self.storage_error(e))?;
        restrict_permissions(&self.credentials_path);

        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, credentials)
            .map_err(|e| self.storage_error(e))?;
        writer.flush().map_err(|e| self.storage_error(e))?;

        debug!(path = %self.credentials_path.display(), "Saved credentials");
        Ok(())
    }

    /// Remove the credentials file. Succeeds if it does not exist.
    pub fn clear(&self) -> ChatResult<()> {
        match fs::remove_file(&self.credentials_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.storage_error(e)),
        }
    }

    fn storage_error(&self, err: impl std::fmt::Display) -> ChatError {
        ChatError::Storage {
            path: self.credentials_path.display().to_string(),
            message: err.to_string(),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) {
    use std::os::unix::fs::PermissionsExt;
    if let Err(e) = fs::set_permissions(path, fs::Permissions::from_mode(0o600)) {
        warn!(path = %path.display(), error = %e, "Could not restrict credentials file permissions");
    }
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) {}
