//! Key-value storage backends for persisted collections.
//!
//! The storage medium mirrors browser local storage: synchronous get/set/
//! remove of strings by key, values holding JSON-encoded lists. Reads never
//! fail - a missing key or unreadable value is an empty collection. Write
//! failures are surfaced as `io::Error` so the adapter can log them; they
//! are never propagated to callers of the store.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Synchronous string key-value storage.
///
/// Implementations must be safe to share across handler tasks; all interior
/// mutability lives behind the implementation.
pub trait StorageBackend: Send + Sync {
    /// Read the raw value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be made durable.
    fn set(&self, key: &str, value: &str) -> io::Result<()>;

    /// Remove the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal could not be made durable.
    fn remove(&self, key: &str) -> io::Result<()>;
}

/// Deserialize the list stored under `key`.
///
/// Missing key and malformed JSON both yield an empty list; corruption is
/// logged at debug level and never surfaced.
pub fn read_list<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Vec<T> {
    let Some(raw) = backend.get(key) else {
        return Vec::new();
    };
    match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::debug!(key, error = %e, "Discarding corrupt stored collection");
            Vec::new()
        }
    }
}

/// Serialize and store `items` under `key`.
///
/// Failures (serialization, quota, I/O) are logged and swallowed; the
/// in-memory view proceeds and storage stays stale until the next
/// successful write.
pub fn write_list<T: Serialize>(backend: &dyn StorageBackend, key: &str, items: &[T]) {
    let raw = match serde_json::to_string(items) {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to serialize collection");
            return;
        }
    };
    if let Err(e) = backend.set(key, &raw) {
        tracing::warn!(key, error = %e, "Failed to persist collection");
    }
}

// =============================================================================
// FileStorage
// =============================================================================

/// File-backed storage: one JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Create a file-backed store rooted at `dir`, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        // Write-then-rename so readers never observe a partial value.
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{key}.json.tmp"));
        std::fs::write(&tmp, value)?;
        std::fs::rename(&tmp, &path)
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}

// =============================================================================
// MemoryStorage
// =============================================================================

/// In-memory storage for tests and ephemeral deployments.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> io::Result<()> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .remove(key);
        Ok(())
    }
}
