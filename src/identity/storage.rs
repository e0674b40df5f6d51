//! Durable key/value capability backing the session store.
//!
//! The store only needs three string entries, but it needs them written and removed as a
//! group, so the trait exposes grouped operations instead of single-key setters.

use std::collections::{BTreeMap, HashMap};
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage corrupt: {0}")]
    Corrupt(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub trait KeyValueStore: Send + Sync {
    /// Read several keys in one consistent pass. The result has one slot per key.
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError>;
    /// Write every entry or none of them.
    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError>;
    /// Remove every key or none of them. Missing keys are not an error.
    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError>;
}

/// Process-local store. Used by tests and by callers that do not want the session to
/// outlive the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    /// Write a single raw entry, bypassing grouping. Lets tests build partial state.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    pub fn is_empty(&self) -> bool { self.entries.lock().is_empty() }
}

impl KeyValueStore for MemoryStore {
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let map = self.entries.lock();
        Ok(keys.iter().map(|k| map.get(*k).cloned()).collect())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut map = self.entries.lock();
        for (k, v) in entries {
            map.insert(k.to_string(), v.to_string());
        }
        Ok(())
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut map = self.entries.lock();
        for k in keys {
            map.remove(*k);
        }
        Ok(())
    }
}

/// JSON object file on disk. Each grouped write replaces the whole file through a
/// uniquely named sibling temp file and a rename, so a reader never sees half of a group.
/// The in-process lock only orders writers within one process; across processes the last
/// rename wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), lock: Mutex::new(()) }
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let text = std::fs::read_to_string(&self.path)?;
        if text.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&text).map_err(|e| StorageError::Corrupt(format!("{}: {}", self.path.display(), e)))
    }

    // Staging file is unique per write and lives next to the target.
    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(d) if !d.as_os_str().is_empty() => d,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir)?;
        let body = serde_json::to_string_pretty(map).map_err(|e| StorageError::Corrupt(e.to_string()))?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(body.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get_many(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let _g = self.lock.lock();
        let map = self.read_map()?;
        Ok(keys.iter().map(|k| map.get(*k).cloned()).collect())
    }

    fn set_many(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let _g = self.lock.lock();
        // A corrupt file is replaced rather than blocking every future login.
        let mut map = self.read_map().unwrap_or_default();
        for (k, v) in entries {
            map.insert(k.to_string(), v.to_string());
        }
        self.write_map(&map)
    }

    fn remove_many(&self, keys: &[&str]) -> Result<(), StorageError> {
        let _g = self.lock.lock();
        let (mut map, corrupt) = match self.read_map() {
            Ok(m) => (m, false),
            Err(_) => (BTreeMap::new(), true),
        };
        let before = map.len();
        for k in keys {
            map.remove(*k);
        }
        if !corrupt && map.len() == before {
            return Ok(());
        }
        self.write_map(&map)
    }
}
