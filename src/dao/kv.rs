//! Durable key-value storage: the local-storage analogue every persisted blob lives in.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::Arc,
};

use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};
use tracing::{info, warn};

use crate::dao::storage::{StorageError, StorageResult};

/// String-valued store addressed by short keys. Last write wins.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&self, key: &str) -> StorageResult<()>;
}

/// Shared handle to a key-value backend.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// One file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: Arc<Path>,
}

impl FileStore {
    /// Open (and create if needed) the storage directory.
    pub fn open(root: impl Into<PathBuf>) -> StorageResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| {
            StorageError::unavailable(
                format!("cannot create storage directory `{}`", root.display()),
                source,
            )
        })?;
        Ok(Self {
            root: Arc::from(root.as_path()),
        })
    }

    /// Directory holding the entries.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey { key: key.into() });
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::unavailable(
                format!("cannot read `{}`", path.display()),
                err,
            )),
        }
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        fs::write(&path, value).map_err(|source| {
            StorageError::unavailable(format!("cannot write `{}`", path.display()), source)
        })
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StorageError::unavailable(
                format!("cannot remove `{}`", path.display()),
                err,
            )),
        }
    }
}

/// Volatile store, for tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Read and decode a JSON blob.
///
/// Absent, unreadable and malformed entries all yield `None`; the caller falls back to its
/// default.
pub fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Option<T>
where
    T: DeserializeOwned,
{
    match store.get(key) {
        Ok(Some(contents)) => match serde_json::from_str::<T>(&contents) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, error = %err, "failed to parse stored entry; falling back to defaults");
                None
            }
        },
        Ok(None) => {
            info!(key, "stored entry not found; using defaults");
            None
        }
        Err(err) => {
            warn!(key, error = %err, "failed to read stored entry; falling back to defaults");
            None
        }
    }
}

/// Encode a value as JSON and write it under `key`.
pub fn write_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> StorageResult<()>
where
    T: ?Sized + Serialize,
{
    let encoded = serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_store_round_trips_and_removes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("gongzhu_rounds").unwrap(), None);
        store.set("gongzhu_rounds", "[]").unwrap();
        assert_eq!(store.get("gongzhu_rounds").unwrap().as_deref(), Some("[]"));
        assert!(store.root().join("gongzhu_rounds.json").exists());

        store.remove("gongzhu_rounds").unwrap();
        store.remove("gongzhu_rounds").unwrap();
        assert_eq!(store.get("gongzhu_rounds").unwrap(), None);
    }

    #[test]
    fn file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.set("../escape", "x"),
            Err(StorageError::InvalidKey { .. })
        ));
        assert!(store.get("").is_err());
    }

    #[test]
    fn read_json_falls_back_on_garbage() {
        let store = MemoryStore::new();
        store.set("numbers", "not json").unwrap();
        assert_eq!(read_json::<Vec<i64>>(&store, "numbers"), None);
        assert_eq!(read_json::<Vec<i64>>(&store, "missing"), None);

        write_json(&store, "numbers", &[1, 2, 3]).unwrap();
        assert_eq!(read_json::<Vec<i64>>(&store, "numbers"), Some(vec![1, 2, 3]));
    }
}
