//! Persistent local key-value storage for credentials

use crate::error::{ClientError, Result};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Debug;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Key-value store the bearer token is read from
#[async_trait]
pub trait TokenStore: Debug + Send + Sync {
    /// Read the value stored under `key`
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read or written
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing a missing key is not an error
    ///
    /// # Errors
    ///
    /// Returns a storage error if the backing store cannot be read or written
    async fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store, lost when the process exits
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single entry
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let store = Self::new();
        store.entries.write().insert(key.into(), value.into());
        store
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Store persisted as a JSON object in a single file
///
/// A missing file reads as an empty store. Writes create the parent
/// directory and, on Unix, restrict the file to its owner.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store backed by `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                ClientError::storage(format!("corrupt store {}: {e}", self.path.display()))
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(ClientError::storage(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    async fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                ClientError::storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let contents = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, contents).await.map_err(|e| {
            ClientError::storage(format!("failed to write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| {
                    ClientError::storage(format!(
                        "failed to restrict {}: {e}",
                        self.path.display()
                    ))
                })?;
        }

        debug!(path = %self.path.display(), keys = entries.len(), "token store written");
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all().await?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_all().await?;
        if entries.remove(key).is_some() {
            self.write_all(&entries).await?;
        }
        Ok(())
    }
}
