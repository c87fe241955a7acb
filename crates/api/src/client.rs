//! Session-aware typed client over [`MockApi`].
//!
//! Remembers the token from the last successful login and attaches it to
//! every later request, the way a browser front end would keep it in local
//! storage.

use axum::http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use postboard_core::{
    AuthToken, Comment, LoginResponse, NewComment, NewPost, Post, PostId, PostPatch,
    PostWithComments,
};

use crate::fetch::{ApiRequest, ApiResponse, MockApi};
use crate::services::Deleted;

/// Errors seen by client callers.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The router answered with a non-2xx status.
    #[error("{status}: {message}")]
    Status { status: StatusCode, message: String },

    /// A request or response body did not match the expected shape.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// The HTTP status of a rejected request.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Json(_) => None,
        }
    }
}

/// Typed client holding an optional session token.
#[derive(Debug, Clone)]
pub struct ApiClient {
    api: MockApi,
    token: Option<AuthToken>,
}

impl ApiClient {
    /// Create a logged-out client.
    #[must_use]
    pub const fn new(api: MockApi) -> Self {
        Self { api, token: None }
    }

    /// The current session token, if logged in.
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Builder method to start with an existing token.
    #[must_use]
    pub fn with_token(mut self, token: AuthToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Log in and keep the issued token.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 on bad credentials.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response: LoginResponse = self
            .send(ApiRequest::post("/api/auth/login").json(&body))
            .await?;

        self.token = Some(response.token.clone());
        Ok(response)
    }

    /// Forget the session token.
    pub fn logout(&mut self) {
        self.token = None;
    }

    /// List posts, optionally filtered.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the response is not a post list.
    pub async fn list_posts(&self, search: Option<&str>) -> Result<Vec<Post>, ClientError> {
        let url = match search {
            Some(term) => {
                let encoded: String = url::form_urlencoded::byte_serialize(term.as_bytes()).collect();
                format!("/api/posts?search={encoded}")
            }
            None => "/api/posts".to_string(),
        };
        self.send(ApiRequest::get(url)).await
    }

    /// Fetch one post with its comments.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 404 if the post does not exist.
    pub async fn get_post(&self, id: &PostId) -> Result<PostWithComments, ClientError> {
        self.send(ApiRequest::get(format!("/api/posts/{id}"))).await
    }

    /// Create a post.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 when logged out.
    pub async fn create_post(&self, data: &NewPost) -> Result<Post, ClientError> {
        self.send_json(ApiRequest::post("/api/posts"), data).await
    }

    /// Update a post.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 when logged out, 404 if the post
    /// does not exist.
    pub async fn update_post(&self, id: &PostId, patch: &PostPatch) -> Result<Post, ClientError> {
        self.send_json(ApiRequest::put(format!("/api/posts/{id}")), patch)
            .await
    }

    /// Delete a post.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 when logged out, 404 if the post
    /// does not exist.
    pub async fn delete_post(&self, id: &PostId) -> Result<Deleted, ClientError> {
        self.send(ApiRequest::delete(format!("/api/posts/{id}"))).await
    }

    /// List a post's comments.
    ///
    /// # Errors
    ///
    /// Returns `ClientError` if the response is not a comment list.
    pub async fn list_comments(&self, post_id: &PostId) -> Result<Vec<Comment>, ClientError> {
        self.send(ApiRequest::get(format!("/api/posts/{post_id}/comments")))
            .await
    }

    /// Comment on a post.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Status` with 401 when logged out.
    pub async fn create_comment(
        &self,
        post_id: &PostId,
        data: &NewComment,
    ) -> Result<Comment, ClientError> {
        self.send_json(
            ApiRequest::post(format!("/api/posts/{post_id}/comments")),
            data,
        )
        .await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        request: ApiRequest,
        body: &B,
    ) -> Result<T, ClientError> {
        let body = serde_json::to_value(body)?;
        self.send(request.json(&body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ClientError> {
        let request = match &self.token {
            Some(token) => request.bearer(token.as_str()),
            None => request,
        };

        let response = self.api.fetch(request).await;
        decode(&response)
    }
}

fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T, ClientError> {
    if !response.ok() {
        return Err(ClientError::Status {
            status: response.status(),
            message: response
                .error_message()
                .unwrap_or_else(|| response.status().to_string()),
        });
    }
    Ok(response.json()?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_login_keeps_token() {
        let mut client = ApiClient::new(MockApi::in_memory());
        assert!(!client.is_authenticated());

        let response = client.login("professor@exemplo.com", "demo123").await.unwrap();
        assert_eq!(client.token(), Some(&response.token));

        client.logout();
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn test_bad_login_keeps_logged_out() {
        let mut client = ApiClient::new(MockApi::in_memory());
        let err = client.login("professor@exemplo.com", "nope").await.unwrap_err();

        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!client.is_authenticated());
    }

    #[tokio::test]
    async fn test_mutations_need_login() {
        let mut client = ApiClient::new(MockApi::in_memory());
        let data = NewPost::new("T", "C");

        let err = client.create_post(&data).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));

        client.login("maria@exemplo.com", "123456").await.unwrap();
        let post = client.create_post(&data).await.unwrap();

        let posts = client.list_posts(None).await.unwrap();
        assert_eq!(posts[0].id, post.id);
    }

    #[tokio::test]
    async fn test_search_with_spaces_and_accents() {
        let client = ApiClient::new(MockApi::in_memory());

        let posts = client.list_posts(Some("Git e GitHub")).await.unwrap();
        assert_eq!(posts.len(), 1);

        let posts = client.list_posts(Some("introdução")).await.unwrap();
        assert_eq!(posts.len(), 2);
    }

    #[tokio::test]
    async fn test_comment_round_trip() {
        let mut client = ApiClient::new(MockApi::in_memory());
        client.login("admin@exemplo.com", "admin123").await.unwrap();
        let id = PostId::new("4");

        let comment = client
            .create_comment(&id, &NewComment::new("Admin", "Muito bom"))
            .await
            .unwrap();
        assert_eq!(client.list_comments(&id).await.unwrap(), vec![comment.clone()]);
        assert_eq!(client.get_post(&id).await.unwrap().comments, vec![comment]);

        assert!(client.delete_post(&id).await.unwrap().success);
        let err = client.get_post(&id).await.unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }
}
