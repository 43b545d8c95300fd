//! Key-value persistence for profiles, the leaderboard, and the global high
//! score.
//!
//! Screens never touch the filesystem directly; they go through the
//! [`KvStore`] capability held in [`crate::util`]'s globals so that tests can
//! substitute [`MemoryStore`].
use serde::{de::DeserializeOwned, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Storage capability: get/set a raw JSON string by namespaced key.
///
/// Keys use `/` to separate the namespace (a wallet address or `guest`) from
/// the field name, e.g. `guest/coins` or `leaderboard`.
pub(crate) trait KvStore: fmt::Debug {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    #[error("failed to read stored value")]
    Read(#[source] std::io::Error),
    #[error("failed to write stored value")]
    Write(#[source] std::io::Error),
}

/// On-disk store: one JSON file per key under a root directory
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct DiskStore {
    root: PathBuf,
}

impl DiskStore {
    pub(crate) fn new<P: Into<PathBuf>>(root: P) -> DiskStore {
        DiskStore { root: root.into() }
    }

    /// Map a key to a file path under the root.  Each `/`-separated segment
    /// becomes a path component, with unruly characters replaced so that a
    /// hostile namespace cannot escape the root.
    fn key_path(&self, key: &str) -> PathBuf {
        let mut path = self.root.clone();
        for segment in key.split('/').filter(|s| !s.is_empty()) {
            let clean = segment
                .chars()
                .map(|c| {
                    if c.is_ascii_alphanumeric() || matches!(c, '-' | '_') {
                        c
                    } else {
                        '_'
                    }
                })
                .collect::<String>();
            path.push(clean);
        }
        path.set_extension("json");
        path
    }
}

impl KvStore for DiskStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs_err::read_to_string(self.key_path(key)) {
            Ok(src) => Ok(Some(src)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.key_path(key);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs_err::create_dir_all(parent).map_err(StoreError::Write)?;
        }
        fs_err::write(&path, value).map_err(StoreError::Write)
    }
}

/// In-memory store for tests and for `--no-save` sessions
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    cells: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub(crate) fn new() -> MemoryStore {
        MemoryStore::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.cells.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.cells.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Fetch & deserialize the value stored under `key`.  A missing key is
/// `Ok(None)`; corrupt JSON is an error so that callers can fall back to the
/// key's default and warn.
pub(crate) fn get_value<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, LoadError> {
    let Some(src) = store.get(key).map_err(|e| LoadError::read(key, e))? else {
        return Ok(None);
    };
    serde_json::from_str(&src)
        .map(Some)
        .map_err(|e| LoadError::deserialize(key, e))
}

/// Serialize & store `value` under `key`
pub(crate) fn put_value<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), SaveError> {
    let src = serde_json::to_string(value).map_err(|e| SaveError::serialize(key, e))?;
    store.set(key, &src).map_err(|e| SaveError::write(key, e))
}

#[derive(Debug, Error)]
#[error("Failed to load saved value {key:?}")]
pub(crate) struct LoadError {
    key: String,
    #[source]
    source: LoadErrorSource,
}

impl LoadError {
    fn read(key: &str, e: StoreError) -> LoadError {
        LoadError {
            key: key.to_owned(),
            source: LoadErrorSource::Read(e),
        }
    }

    fn deserialize(key: &str, e: serde_json::Error) -> LoadError {
        LoadError {
            key: key.to_owned(),
            source: LoadErrorSource::Deserialize(e),
        }
    }
}

#[derive(Debug, Error)]
enum LoadErrorSource {
    #[error("failed to read value from the data store")]
    Read(#[source] StoreError),
    #[error("failed to deserialize stored value")]
    Deserialize(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("Failed to save value {key:?}")]
pub(crate) struct SaveError {
    key: String,
    #[source]
    source: SaveErrorSource,
}

impl SaveError {
    fn serialize(key: &str, e: serde_json::Error) -> SaveError {
        SaveError {
            key: key.to_owned(),
            source: SaveErrorSource::Serialize(e),
        }
    }

    fn write(key: &str, e: StoreError) -> SaveError {
        SaveError {
            key: key.to_owned(),
            source: SaveErrorSource::Write(e),
        }
    }
}

#[derive(Debug, Error)]
enum SaveErrorSource {
    #[error("failed to serialize value")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to write value to the data store")]
    Write(#[source] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disk_roundtrip() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let store = DiskStore::new(tmp.path());
        put_value(&store, "guest/coins", &42u32).expect("put should succeed");
        let coins = get_value::<u32>(&store, "guest/coins").expect("get should succeed");
        assert_eq!(coins, Some(42));
    }

    #[test]
    fn disk_missing_key() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let store = DiskStore::new(tmp.path());
        let coins = get_value::<u32>(&store, "guest/coins").expect("get should succeed");
        assert_eq!(coins, None);
    }

    #[test]
    fn disk_corrupt_value() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let store = DiskStore::new(tmp.path());
        store
            .set("guest/coins", "{not json")
            .expect("set should succeed");
        assert!(get_value::<u32>(&store, "guest/coins").is_err());
    }

    #[test]
    fn disk_namespace_cannot_escape_root() {
        let tmp = tempfile::tempdir().expect("tempdir should be creatable");
        let store = DiskStore::new(tmp.path());
        let path = store.key_path("../../etc/passwd");
        assert!(path.starts_with(tmp.path()));
    }

    #[test]
    fn memory_roundtrip() {
        let store = MemoryStore::new();
        put_value(&store, "guest/active-skin", &"gold").expect("put should succeed");
        let skin = get_value::<String>(&store, "guest/active-skin").expect("get should succeed");
        assert_eq!(skin.as_deref(), Some("gold"));
    }
}
