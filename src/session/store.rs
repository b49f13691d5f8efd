//! Credential persistence
//!
//! The credential is the only durable session state. Everything else
//! (role, display name, expiry) is decoded from it on demand.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Durable holder of at most one bearer credential.
pub trait TokenStore: Send + Sync {
    /// Persist a credential, replacing any previous one.
    fn set(&self, credential: &str) -> Result<()>;

    /// Current credential, if any.
    fn get(&self) -> Option<String>;

    /// Remove the credential. Clearing an empty store succeeds.
    fn clear(&self) -> Result<()>;
}

/// On-disk shape of the session file
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    token: String,
}

/// Stores the credential in a YAML file readable only by the owner.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Get the default session file path
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(".carectl").join("session.yaml"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn set(&self, credential: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(&SessionFile {
            token: credential.to_string(),
        })
        .map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&self.path, contents)?;

        // Set file permissions to 600 on Unix systems
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        log::debug!("Stored credential at {}", self.path.display());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                log::warn!("Could not read {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_yaml::from_str::<SessionFile>(&contents) {
            Ok(file) if !file.token.trim().is_empty() => Some(file.token),
            Ok(_) => None,
            Err(e) => {
                log::debug!("Ignoring unreadable session file: {}", e);
                None
            }
        }
    }

    fn clear(&self) -> Result<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                log::debug!("Removed credential at {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process store with no durability.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: std::sync::Mutex<Option<String>>,
}

#[cfg(test)]
impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(credential: impl Into<String>) -> Self {
        Self {
            token: std::sync::Mutex::new(Some(credential.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
impl TokenStore for MemoryTokenStore {
    fn set(&self, credential: &str) -> Result<()> {
        *self.slot() = Some(credential.to_string());
        Ok(())
    }

    fn get(&self) -> Option<String> {
        self.slot().clone()
    }

    fn clear(&self) -> Result<()> {
        *self.slot() = None;
        Ok(())
    }
}
