//! Blog post records.
//!
//! [`Post`] is the persisted record. [`NewPost`] and [`PostPatch`] are the
//! request payloads for creating and updating one, and [`PostWithComments`] is
//! the detail view returned when a single post is fetched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::comment::Comment;
use super::id::PostId;

/// A blog post.
///
/// Serialized in camelCase (`createdAt`, `updatedAt`), which is also the
/// persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique post ID, assigned at creation.
    pub id: PostId,
    pub title: String,
    /// Body text, may contain markdown.
    pub content: String,
    /// Optional short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Author display name.
    pub author: String,
    /// Set once at creation.
    pub created_at: DateTime<Utc>,
    /// Refreshed on every update. Never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Build a freshly created post with both timestamps set to `now`.
    #[must_use]
    pub fn create(id: PostId, data: NewPost, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: data.title,
            content: data.content,
            description: data.description,
            author: data.author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields over this post and bump `updated_at`.
    ///
    /// `id` and `created_at` are never touched. `updated_at` is clamped so it
    /// never falls behind `created_at` or its previous value, even if the clock
    /// moved backwards.
    pub fn apply(&mut self, patch: PostPatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(author) = patch.author {
            self.author = author;
        }
        self.updated_at = now.max(self.updated_at).max(self.created_at);
    }

    /// Case-insensitive substring match on title, content or author.
    ///
    /// `needle` must already be lowercased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
            || self.author.to_lowercase().contains(needle)
    }
}

/// Payload for creating a post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub author: String,
}

impl NewPost {
    /// Create a payload with just a title and content.
    #[must_use]
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// Builder method to set the author.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    /// Builder method to set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Partial update for a post. Absent fields are left unchanged.
///
/// Unknown fields (including `id`, `createdAt`) are ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl PostPatch {
    /// A patch that only changes the title.
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }
}

/// A post together with its comments, as returned by the detail endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostWithComments {
    #[serde(flatten)]
    pub post: Post,
    pub comments: Vec<Comment>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Duration, TimeZone};

    use super::*;

    fn sample() -> Post {
        let at = Utc.with_ymd_and_hms(2024, 5, 20, 10, 30, 0).unwrap();
        Post::create(
            PostId::new("1"),
            NewPost::new("Introdução à POO", "Classes e objetos")
                .with_author("Prof. Carlos Silva")
                .with_description("Conceitos fundamentais"),
            at,
        )
    }

    #[test]
    fn test_create_sets_equal_timestamps() {
        let post = sample();
        assert_eq!(post.created_at, post.updated_at);
    }

    #[test]
    fn test_apply_preserves_identity() {
        let mut post = sample();
        let created = post.created_at;
        post.apply(PostPatch::title("New"), created + Duration::minutes(5));

        assert_eq!(post.id.as_str(), "1");
        assert_eq!(post.title, "New");
        assert_eq!(post.content, "Classes e objetos");
        assert_eq!(post.created_at, created);
        assert_eq!(post.updated_at, created + Duration::minutes(5));
    }

    #[test]
    fn test_apply_never_moves_updated_at_backwards() {
        let mut post = sample();
        let created = post.created_at;
        post.apply(PostPatch::title("Earlier clock"), created - Duration::hours(1));
        assert_eq!(post.updated_at, created);
    }

    #[test]
    fn test_matches_is_case_insensitive() {
        let post = sample();
        assert!(post.matches("silva"));
        assert!(post.matches("poo"));
        assert!(post.matches("objetos"));
        assert!(!post.matches("react"));
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["createdAt"], "2024-05-20T10:30:00Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn test_persisted_roundtrip_is_exact() {
        let post = sample();
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn test_patch_ignores_identity_fields() {
        let patch: PostPatch =
            serde_json::from_str(r#"{"id":"99","createdAt":"2020-01-01T00:00:00Z","title":"T"}"#)
                .unwrap();
        assert_eq!(patch, PostPatch::title("T"));
    }

    #[test]
    fn test_detail_flattens_post() {
        let detail = PostWithComments {
            post: sample(),
            comments: Vec::new(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["id"], "1");
        assert_eq!(json["comments"], serde_json::json!([]));
    }
}
