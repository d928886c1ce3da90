//! Key-value store wrapper with automatic serialization.

use std::path::PathBuf;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use crate::backend::{Backend, FileBackend, MemoryBackend};
use crate::StoreError;

/// Type-safe store over a byte [`Backend`].
///
/// Values are serialized as JSON, so anything implementing `Serialize` and
/// `DeserializeOwned` can be stored. Cloning a `Store` shares the backend.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}

impl Store {
    /// Wrap an arbitrary backend.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Open an in-memory store.
    ///
    /// # Example
    ///
    /// ```
    /// let store = astharhat_store::Store::memory();
    /// store.set("greeting", &"hello").unwrap();
    /// let value: Option<String> = store.get("greeting").unwrap();
    /// assert_eq!(value.as_deref(), Some("hello"));
    /// ```
    pub fn memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Open a file-backed store rooted at `dir`.
    pub fn open_dir(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self::new(FileBackend::open(dir)?))
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist, and an error if the stored
    /// bytes do not deserialize into `T`.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.get(key)? {
            Some(bytes) => {
                let value: T = serde_json::from_slice(&bytes)?;
                debug!(key, bytes = bytes.len(), "store read");
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        debug!(key, bytes = bytes.len(), "store write");
        self.backend.set(key, &bytes)
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(key)
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.exists(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        ids: Vec<String>,
    }

    #[test]
    fn test_typed_roundtrip() {
        let store = Store::memory();
        let entry = Entry {
            ids: vec!["p1".into(), "p3".into()],
        };
        store.set("entry", &entry).unwrap();
        assert_eq!(store.get::<Entry>("entry").unwrap(), Some(entry));
    }

    #[test]
    fn test_corrupt_value_is_an_error() {
        let backend = MemoryBackend::new();
        backend.set("entry", b"not json").unwrap();
        let store = Store::new(backend);
        assert!(matches!(
            store.get::<Entry>("entry"),
            Err(StoreError::SerializeError(_))
        ));
    }

    #[test]
    fn test_clones_share_backend() {
        let store = Store::memory();
        let other = store.clone();
        store.set("k", &1u32).unwrap();
        assert_eq!(other.get::<u32>("k").unwrap(), Some(1));
        other.delete("k").unwrap();
        assert!(!store.exists("k").unwrap());
    }

    #[test]
    fn test_open_dir() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::open_dir(dir.path().join("nested")).unwrap();
        store.set("k", &vec!["a"]).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);
    }
}
