//! Local post store.

use postboard_core::Post;

use super::{POSTS_KEY, load_json, seed};
use crate::storage::{KeyValueStore, StorageError};

/// Store for the post collection.
pub struct PostStore<'a> {
    storage: &'a dyn KeyValueStore,
}

impl<'a> PostStore<'a> {
    /// Create a new post store.
    #[must_use]
    pub const fn new(storage: &'a dyn KeyValueStore) -> Self {
        Self { storage }
    }

    /// Every stored post in stored order.
    ///
    /// Falls back to the seed collection when nothing is stored yet or the
    /// stored value is unreadable.
    #[must_use]
    pub fn get_all(&self) -> Vec<Post> {
        load_json(self.storage, POSTS_KEY).unwrap_or_else(seed::seed_posts)
    }

    /// Replace the whole post collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the medium rejects the write.
    pub fn set(&self, posts: &[Post]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(posts)?;
        self.storage.set(POSTS_KEY, encoded)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use postboard_core::{NewPost, PostId};

    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn test_empty_store_yields_seed() {
        let storage = MemoryStore::new();
        let posts = PostStore::new(&storage).get_all();
        assert_eq!(posts, seed::seed_posts());
        assert!(storage.is_empty(), "reading must not persist the seed");
    }

    #[test]
    fn test_set_replaces_collection() {
        let storage = MemoryStore::new();
        let store = PostStore::new(&storage);
        let post = Post::create(PostId::new("9"), NewPost::new("T", "C"), Utc::now());

        store.set(std::slice::from_ref(&post)).unwrap();
        assert_eq!(store.get_all(), vec![post]);

        store.set(&[]).unwrap();
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_corrupt_value_falls_back_to_seed() {
        let storage = MemoryStore::new();
        storage.set(POSTS_KEY, "{not json".to_string()).unwrap();
        assert_eq!(PostStore::new(&storage).get_all(), seed::seed_posts());
    }
}
