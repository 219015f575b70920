//! Persisted key-value store
//!
//! Storefront state (purchases, points, gifts, uploads, bookmarks) is kept as
//! JSON values under string keys, the way a browser app would use local
//! storage.

use crate::error::StoreError;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Result type for store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Abstract key-value store
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Value stored under `key`, if any
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Store `value` under `key`, replacing any previous value
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Remove the value under `key`
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

/// Read and deserialize a value
pub async fn load_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StoreResult<Option<T>> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Serialize and write a value
pub async fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StoreResult<()> {
    store.set(key, serde_json::to_value(value)?).await
}

/// Keys are restricted so they map safely onto file names
fn validate_key(key: &str) -> StoreResult<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

/// Store keeping one JSON file per key under a root directory
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a file store rooted at `root`. The directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a key to its file, rejecting keys that could escape the root
    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        validate_key(key)?;
        // ':' is not portable in file names and '%' never appears in a key
        Ok(self.root.join(format!("{}.json", key.replace(':', "%3A"))))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key)?;
        match tokio::fs::read_to_string(&path).await {
            Ok(data) => Ok(Some(serde_json::from_str(&data)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        let path = self.path_for(key)?;
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;

        let data = serde_json::to_string_pretty(&value)?;

        // Write to a temp file unique to this write, then rename over the target
        let temp_path = path.with_extension(format!("json.{}.tmp", Uuid::new_v4()));
        tokio::fs::write(&temp_path, data)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.path_for(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::NotFound(key.to_string()))
            }
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

/// In-memory store (for testing)
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> StoreResult<Option<Value>> {
        validate_key(key)?;
        Ok(self.data.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> StoreResult<()> {
        validate_key(key)?;
        self.data.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        self.data
            .write()
            .await
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| StoreError::NotFound(key.to_string()))
    }
}
