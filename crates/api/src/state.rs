//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ApiConfig;
use crate::services::BlogService;
use crate::storage::{FileStore, KeyValueStore, MemoryStore, StorageError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. Two states built separately
/// share nothing unless handed the same storage.
#[derive(Clone, Debug)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

#[derive(Debug)]
struct AppStateInner {
    config: ApiConfig,
    storage: Arc<dyn KeyValueStore>,
    blog: BlogService,
}

impl AppState {
    /// Create a new application state over an existing storage medium.
    ///
    /// `config.data_file` is informational here; `storage` is used as given.
    #[must_use]
    pub fn new(config: ApiConfig, storage: Arc<dyn KeyValueStore>) -> Self {
        let blog = BlogService::new(Arc::clone(&storage), config.latency);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                storage,
                blog,
            }),
        }
    }

    /// Create application state, opening the file store named by the config
    /// or falling back to memory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the data file exists but cannot be read.
    pub fn from_config(config: ApiConfig) -> Result<Self, StorageError> {
        let storage: Arc<dyn KeyValueStore> = match &config.data_file {
            Some(path) => {
                tracing::info!(path = %path.display(), "Opening file store");
                Arc::new(FileStore::open(path)?)
            }
            None => Arc::new(MemoryStore::new()),
        };

        Ok(Self::new(config, storage))
    }

    /// Get a reference to the API configuration.
    #[must_use]
    pub fn config(&self) -> &ApiConfig {
        &self.inner.config
    }

    /// Get a reference to the storage medium.
    #[must_use]
    pub fn storage(&self) -> &Arc<dyn KeyValueStore> {
        &self.inner.storage
    }

    /// Get a reference to the blog service.
    #[must_use]
    pub fn blog(&self) -> &BlogService {
        &self.inner.blog
    }
}
