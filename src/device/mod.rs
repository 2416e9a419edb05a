use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;


const CREDENTIALS_FILE: &str = "credentials.json";

#[derive(Error, Debug)]
pub enum DeviceError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Credentials the user asked to be remembered between launches.
/// Stored as plaintext, scoped to the app's data directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RememberedCredentials {
    pub email: String,
    pub password: String,
}

/// File-backed key-value storage for the remember-me checkbox.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(CREDENTIALS_FILE),
        }
    }

    /// Returns the remembered credentials, or `None` if nothing was saved
    /// or the file is unreadable.
    pub fn get(&self) -> Option<RememberedCredentials> {
        let raw = fs::read(&self.path).ok()?;
        serde_json::from_slice(&raw).ok()
    }

    pub fn set(&self, credentials: &RememberedCredentials) -> Result<(), DeviceError> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(credentials)?)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), DeviceError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
