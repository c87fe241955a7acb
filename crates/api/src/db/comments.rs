//! Local comment store, one collection per post.

use postboard_core::{Comment, PostId};

use super::{comments_key, load_json};
use crate::storage::{KeyValueStore, StorageError};

/// Store for per-post comment collections.
pub struct CommentStore<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> CommentStore<'a> {
    /// Create a new comment store.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// Comments of `post_id`, empty if none are stored or the value is unreadable.
    #[must_use]
    pub fn get_for_post(&self, post_id: &PostId) -> Vec<Comment> {
        load_json(self.storage, &comments_key(post_id.as_str())).unwrap_or_default()
    }

    /// Replace the comment collection of `post_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium rejects the write.
    pub fn set_for_post(&self, post_id: &PostId, comments: &[Comment]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(comments)?;
        self.storage.set(&comments_key(post_id.as_str()), encoded)
    }

    /// Drop the comment collection of `post_id`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium rejects the write.
    pub fn clear_for_post(&self, post_id: &PostId) -> Result<(), StorageError> {
        self.storage.remove(&comments_key(post_id.as_str()))
    }
}
