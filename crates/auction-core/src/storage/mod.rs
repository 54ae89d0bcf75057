//! Single-record JSON persistence under the client data directory.

use std::fs;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StateError;

mod token_store;

pub use token_store::FileTokenStore;

/// Directory name for data storage.
pub const DATA_DIR: &str = ".auction";
/// Record holding the access/refresh token pair.
pub const TOKENS_FILE: &str = "tokens.json";
/// Record holding the cached session user.
pub const USER_FILE: &str = "user.json";
/// Record holding the anonymous favorites ID list.
pub const FAVORITES_FILE: &str = "favorites.json";

/// Handle on a data directory of single-record JSON files.
///
/// Explicitly owned and injectable: tests and embedders construct one over
/// any directory. Reads tolerate missing and corrupt records by returning
/// `None`; writes go through a temp file and rename so a record is never
/// half-written.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    /// Open (creating if needed) the given data directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, StateError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .map_err(|e| StateError::Storage(format!("failed to create {}: {}", dir.display(), e)))?;
        Ok(Self { dir })
    }

    /// Resolve the data directory from the environment.
    ///
    /// Priority:
    /// 1. `AUCTION_DATA_DIR` environment variable (container deployments)
    /// 2. `~/.auction` (desktop default)
    pub fn from_env() -> Result<Self, StateError> {
        let dir = if let Ok(custom) = std::env::var("AUCTION_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let home = dirs::home_dir()
                .ok_or_else(|| StateError::Storage("cannot resolve home directory".to_string()))?;
            home.join(DATA_DIR)
        };
        Self::new(dir)
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Load a record. Missing or malformed records read as `None`.
    pub fn load<T: DeserializeOwned>(&self, file: &str) -> Option<T> {
        let path = self.dir.join(file);
        let content = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&content) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("discarding corrupt record {}: {}", path.display(), e);
                None
            },
        }
    }

    /// Save a record atomically (temp file + rename).
    pub fn save<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StateError> {
        let path = self.dir.join(file);
        let temp_path = self.dir.join(format!("{}.tmp", file));

        let content = serde_json::to_string_pretty(value)
            .map_err(|e| StateError::Storage(format!("failed to serialize {}: {}", file, e)))?;

        if let Err(e) = fs::write(&temp_path, content) {
            let _ = fs::remove_file(&temp_path);
            return Err(StateError::Storage(format!("failed to write {}: {}", file, e)));
        }

        fs::rename(&temp_path, &path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StateError::Storage(format!("failed to replace {}: {}", file, e))
        })
    }

    /// Delete a record. Missing records are fine; other failures are logged
    /// and swallowed so teardown paths always complete.
    pub fn remove(&self, file: &str) {
        let path = self.dir.join(file);
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!("failed to remove {}: {}", path.display(), e);
            }
        }
    }
}
