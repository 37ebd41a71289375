//! # Key-Value Backends
//!
//! Durable string storage addressed by key, the same contract as a browser's
//! local storage.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  KeyValueStore (trait)                                                  │
//! │  ├── get(key)        → Option<String>                                   │
//! │  ├── set(key, value)                                                    │
//! │  └── remove(key)                                                        │
//! │                                                                         │
//! │  FileStore    one <key>.json file per key, atomic replace on write      │
//! │  MemoryStore  shared in-process map; counts writes, can fail on demand  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{PersistResult, PersistenceError};

/// String storage addressed by key.
///
/// Absence of a key is a normal state, reported as `Ok(None)`.
pub trait KeyValueStore: Send + fmt::Debug {
    /// Reads the value under `key`.
    fn get(&self, key: &str) -> PersistResult<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> PersistResult<()>;

    /// Deletes `key`. Removing a missing key succeeds.
    fn remove(&mut self, key: &str) -> PersistResult<()>;

    /// Stores `value` under `key` and deletes `stale` as one write.
    ///
    /// If the removal fails, `key` has already been written.
    fn replace(&mut self, key: &str, value: &str, stale: &str) -> PersistResult<()> {
        self.set(key, value)?;
        self.remove(stale)
    }
}

// =============================================================================
// File Store
// =============================================================================

/// Stores each key as `<dir>/<key>.json`.
///
/// ## Write Path
/// ```text
/// value ──► <key>.json.tmp ──► rename ──► <key>.json
/// ```
/// A crash mid-write leaves the previous value in place.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Opens (and creates if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> PersistResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| PersistenceError::io(dir.display().to_string(), e))?;
        debug!(dir = %dir.display(), "Opened file store");
        Ok(FileStore { dir })
    }

    /// Directory holding the key files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistenceError::io(key, e)),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");

        fs::write(&tmp, value).map_err(|e| PersistenceError::io(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| PersistenceError::io(key, e))?;

        debug!(key, bytes = value.len(), "Wrote key");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {
                debug!(key, "Removed key");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PersistenceError::io(key, e)),
        }
    }
}

// =============================================================================
// Memory Store
// =============================================================================

#[derive(Debug, Default)]
struct MemoryInner {
    values: HashMap<String, String>,
    writes: usize,
    fail_writes: bool,
}

/// In-process backend.
///
/// Clones share the same map, so a test can keep one handle and inspect what
/// the store wrote through another.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<MemoryInner>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Creates a store pre-populated with raw values.
    pub fn with_values<K, V>(values: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let store = MemoryStore::new();
        if let Ok(mut inner) = store.inner.lock() {
            inner.values = values
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect();
        }
        store
    }

    /// Number of successful `set`/`remove`/`replace` calls so far.
    pub fn write_count(&self) -> usize {
        self.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    /// Makes every following write fail until turned off again.
    pub fn set_fail_writes(&self, fail: bool) {
        if let Ok(mut inner) = self.lock() {
            inner.fail_writes = fail;
        }
    }

    /// Raw value under a key, bypassing the trait.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.lock()
            .ok()
            .and_then(|inner| inner.values.get(key).cloned())
    }

    fn lock(&self) -> PersistResult<MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| PersistenceError::Unavailable("memory store lock poisoned".to_string()))
    }

    fn write(&self, key: &str, op: impl FnOnce(&mut HashMap<String, String>)) -> PersistResult<()> {
        let mut inner = self.lock()?;
        if inner.fail_writes {
            return Err(PersistenceError::Unavailable(format!(
                "write to '{key}' refused"
            )));
        }
        op(&mut inner.values);
        inner.writes += 1;
        Ok(())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> PersistResult<Option<String>> {
        Ok(self.lock()?.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> PersistResult<()> {
        self.write(key, |values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&mut self, key: &str) -> PersistResult<()> {
        self.write(key, |values| {
            values.remove(key);
        })
    }

    fn replace(&mut self, key: &str, value: &str, stale: &str) -> PersistResult<()> {
        self.write(key, |values| {
            values.insert(key.to_string(), value.to_string());
            values.remove(stale);
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
