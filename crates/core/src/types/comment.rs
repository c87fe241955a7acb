//! Comment records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CommentId, PostId};

/// A reply attached to exactly one post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique within the parent post's comment collection.
    pub id: CommentId,
    /// Parent post. Not enforced referentially.
    pub post_id: PostId,
    pub author: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Build a new comment on `post_id`.
    #[must_use]
    pub fn create(id: CommentId, post_id: PostId, data: NewComment, now: DateTime<Utc>) -> Self {
        Self {
            id,
            post_id,
            author: data.author,
            content: data.content,
            created_at: now,
        }
    }
}

/// Payload for creating a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    #[serde(default)]
    pub author: String,
    pub content: String,
}

impl NewComment {
    #[must_use]
    pub fn new(author: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            content: content.into(),
        }
    }
}
