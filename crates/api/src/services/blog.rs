//! Blog service: posts and comments.
//!
//! Every operation first waits its simulated latency, then does a synchronous
//! read-modify-write against the stores. Two overlapping calls can interleave
//! across that wait; the later write wins.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use postboard_core::{
    Comment, LoginResponse, NewComment, NewPost, Post, PostId, PostPatch, PostWithComments,
};

use super::auth::{AuthError, AuthService};
use crate::config::LatencyProfile;
use crate::db::{CommentStore, PostStore};
use crate::ids::IdGenerator;
use crate::storage::{KeyValueStore, StorageError};

/// Errors from post and comment operations.
#[derive(Debug, Error)]
pub enum BlogError {
    /// No post with this ID exists.
    #[error("post not found: {0}")]
    PostNotFound(PostId),

    /// The storage medium rejected a write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Acknowledgement returned by a successful delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deleted {
    pub success: bool,
}

/// The mock backend: login plus post and comment operations.
#[derive(Debug)]
pub struct BlogService {
    storage: Arc<dyn KeyValueStore>,
    latency: LatencyProfile,
    auth: AuthService,
    ids: IdGenerator,
}

impl BlogService {
    /// Create a new blog service over `storage`.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, latency: LatencyProfile) -> Self {
        Self {
            storage,
            latency,
            auth: AuthService::default(),
            ids: IdGenerator::new(),
        }
    }

    fn posts(&self) -> PostStore<'_> {
        PostStore::new(self.storage.as_ref())
    }

    fn comments(&self) -> CommentStore<'_> {
        CommentStore::new(self.storage.as_ref())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Log in with one of the fixed credentials.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the pair does not match.
    #[instrument(skip(self, password))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginResponse, AuthError> {
        simulate(self.latency.login).await;

        let response = self.auth.login(email, password, Utc::now())?;
        tracing::info!(user_id = %response.user.id, "User logged in");
        Ok(response)
    }

    // =========================================================================
    // Posts
    // =========================================================================

    /// All posts, newest first, optionally filtered by a search term.
    ///
    /// A non-empty `search` keeps posts whose title, content or author
    /// contains it, ignoring case. Posts with equal `created_at` keep their
    /// stored relative order.
    #[instrument(skip(self))]
    pub async fn list_posts(&self, search: Option<&str>) -> Vec<Post> {
        simulate(self.latency.list_posts).await;

        let mut posts = self.posts().get_all();

        if let Some(term) = search.filter(|t| !t.is_empty()) {
            let needle = term.to_lowercase();
            posts.retain(|post| post.matches(&needle));
        }

        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }

    /// A single post with its comments.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::PostNotFound` if no post has this ID.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn get_post(&self, id: &PostId) -> Result<PostWithComments, BlogError> {
        simulate(self.latency.get_post).await;

        let post = self
            .posts()
            .get_all()
            .into_iter()
            .find(|p| &p.id == id)
            .ok_or_else(|| BlogError::PostNotFound(id.clone()))?;

        let comments = self.comments().get_for_post(id);
        Ok(PostWithComments { post, comments })
    }

    /// Create a post and put it at the front of the collection.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Storage` if the collection cannot be written.
    #[instrument(skip(self, data), fields(title = %data.title))]
    pub async fn create_post(&self, data: NewPost) -> Result<Post, BlogError> {
        simulate(self.latency.create_post).await;

        let now = Utc::now();
        let post = Post::create(self.ids.next_id(now), data, now);

        let store = self.posts();
        let mut posts = store.get_all();
        posts.insert(0, post.clone());
        store.set(&posts)?;

        tracing::info!(post_id = %post.id, "Post created");
        Ok(post)
    }

    /// Merge `patch` into an existing post.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::PostNotFound` if no post has this ID.
    /// Returns `BlogError::Storage` if the collection cannot be written.
    #[instrument(skip(self, patch), fields(post_id = %id))]
    pub async fn update_post(&self, id: &PostId, patch: PostPatch) -> Result<Post, BlogError> {
        simulate(self.latency.update_post).await;

        let store = self.posts();
        let mut posts = store.get_all();
        let post = posts
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| BlogError::PostNotFound(id.clone()))?;

        post.apply(patch, Utc::now());
        let updated = post.clone();
        store.set(&posts)?;

        tracing::info!("Post updated");
        Ok(updated)
    }

    /// Delete a post and its comments.
    ///
    /// Comments are cleared before the post collection is rewritten, so a
    /// failed write never leaves comments behind for a deleted post. If the
    /// second write fails the post stays listed with no comments.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::PostNotFound` if no post has this ID.
    /// Returns `BlogError::Storage` if the stores cannot be written.
    #[instrument(skip(self), fields(post_id = %id))]
    pub async fn delete_post(&self, id: &PostId) -> Result<Deleted, BlogError> {
        simulate(self.latency.delete_post).await;

        let store = self.posts();
        let mut posts = store.get_all();
        let index = posts
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| BlogError::PostNotFound(id.clone()))?;

        self.comments().clear_for_post(id)?;
        posts.remove(index);
        store.set(&posts)?;

        tracing::info!("Post deleted");
        Ok(Deleted { success: true })
    }

    // =========================================================================
    // Comments
    // =========================================================================

    /// Append a comment to a post's collection.
    ///
    /// The parent post is not checked; commenting on a deleted post starts a
    /// fresh collection.
    ///
    /// # Errors
    ///
    /// Returns `BlogError::Storage` if the collection cannot be written.
    #[instrument(skip(self, data), fields(post_id = %post_id))]
    pub async fn create_comment(
        &self,
        post_id: &PostId,
        data: NewComment,
    ) -> Result<Comment, BlogError> {
        simulate(self.latency.create_comment).await;

        let now = Utc::now();
        let comment = Comment::create(self.ids.next_id(now), post_id.clone(), data, now);

        let store = self.comments();
        let mut comments = store.get_for_post(post_id);
        comments.push(comment.clone());
        store.set_for_post(post_id, &comments)?;

        tracing::info!(comment_id = %comment.id, "Comment created");
        Ok(comment)
    }

    /// Comments of a post, oldest first.
    #[instrument(skip(self), fields(post_id = %post_id))]
    pub async fn list_comments(&self, post_id: &PostId) -> Vec<Comment> {
        simulate(self.latency.list_comments).await;
        self.comments().get_for_post(post_id)
    }
}

/// Wait out a simulated network delay.
async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
