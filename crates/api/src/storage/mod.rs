//! Local string key-value medium.
//!
//! The stores in [`crate::db`] only ever see a [`KeyValueStore`], so the
//! service layer runs the same against [`MemoryStore`] in tests and
//! [`FileStore`] on disk.
//!
//! Reads and writes are synchronous. Each `set` replaces the whole value for
//! its key in one step.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The in-memory snapshot could not be encoded for writing.
    #[error("storage encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

/// A string key-value medium with whole-value replace semantics.
pub trait KeyValueStore: Send + Sync + std::fmt::Debug {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
