//! Single-file key-value store.
//!
//! ## Layout
//!
//! The whole store is one JSON object whose values are the raw stored strings:
//!
//! ```text
//! {
//!   "posts": "[{\"id\":\"1\", ...}]",
//!   "comments/1": "[...]"
//! }
//! ```
//!
//! The file is read once on [`FileStore::open`] and rewritten in full on every
//! `set`/`remove` (written to a sibling temp file, then renamed over the
//! original).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use super::{KeyValueStore, StorageError};

/// File-backed key-value store.
#[derive(Clone, Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileStore {
    /// Open the store at `path`, creating nothing until the first write.
    ///
    /// A missing file is an empty store. A file that is not a JSON object of
    /// strings is logged and treated as empty; it gets replaced on the next
    /// write.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable store file");
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn entries(&self) -> MutexGuard<'_, BTreeMap<String, String>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let encoded = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, encoded)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        let mut entries = self.entries();
        let previous = entries.insert(key.to_owned(), value);

        if let Err(e) = self.flush(&entries) {
            // Keep memory in step with what is on disk.
            match previous {
                Some(old) => entries.insert(key.to_owned(), old),
                None => entries.remove(key),
            };
            return Err(e);
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries();
        let Some(previous) = entries.remove(key) else {
            return Ok(());
        };

        if let Err(e) = self.flush(&entries) {
            entries.insert(key.to_owned(), previous);
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    /// A fresh directory (removed on drop) and a store path inside it.
    fn scratch() -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        (dir, path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, path) = scratch();
        let store = FileStore::open(path).unwrap();
        assert!(store.get("posts").unwrap().is_none());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_reopen_sees_previous_writes() {
        let (_dir, path) = scratch();

        let store = FileStore::open(&path).unwrap();
        store.set("posts", "[]".to_string()).unwrap();
        store.set("comments/1", "[{}]".to_string()).unwrap();
        store.remove("comments/1").unwrap();

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("posts").unwrap().as_deref(), Some("[]"));
        assert!(reopened.get("comments/1").unwrap().is_none());
    }

    #[test]
    fn test_garbage_file_opens_empty() {
        let (_dir, path) = scratch();
        std::fs::write(&path, "not json at all").unwrap();

        let store = FileStore::open(&path).unwrap();
        assert!(store.get("posts").unwrap().is_none());

        store.set("posts", "[]".to_string()).unwrap();
        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("posts").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_first_write_creates_parent_dirs() {
        let (dir, _) = scratch();
        let path = dir.path().join("nested").join("data").join("store.json");

        let store = FileStore::open(&path).unwrap();
        store.set("posts", "[]".to_string()).unwrap();
        assert!(path.exists());
    }
}
