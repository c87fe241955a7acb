//! Post and comment stores over the key-value medium.
//!
//! # Keys
//!
//! - `posts` - JSON array of every post, newest-first as created
//! - `comments/{post_id}` - JSON array of one post's comments, oldest first
//!
//! # Corrupt data
//!
//! A value that fails to parse is logged at `warn` and treated as missing:
//! posts fall back to the [`seed`] collection, comments to an empty list.
//! Callers never see the parse error.

pub mod comments;
pub mod posts;
pub mod seed;

pub use comments::CommentStore;
pub use posts::PostStore;

use serde::de::DeserializeOwned;

use crate::storage::KeyValueStore;

/// Key holding the post collection.
pub const POSTS_KEY: &str = "posts";

/// Key holding the comment collection of `post_id`.
#[must_use]
pub fn comments_key(post_id: &str) -> String {
    format!("comments/{post_id}")
}

/// Read and decode the value under `key`, absorbing read and parse failures.
fn load_json<T: DeserializeOwned>(storage: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match storage.get(key) {
        Ok(raw) => raw?,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored value");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "Discarding corrupt stored value");
            None
        }
    }
}
