//! Bearer token gate for mutating routes.
//!
//! The gate runs before route resolution, so a protected request without a
//! token is rejected even when no handler would match it.

use axum::{
    extract::Request,
    http::{Method, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use postboard_core::AuthToken;

use crate::error::AppError;

const POSTS_PREFIX: &str = "/api/posts";

/// Whether a request with this method and path must carry a bearer token.
///
/// Protected: POST, PUT and DELETE anywhere under `/api/posts`, and POST to
/// any path with a `comments` segment.
#[must_use]
pub fn requires_bearer(method: &Method, path: &str) -> bool {
    let under_posts = path == POSTS_PREFIX
        || path
            .strip_prefix(POSTS_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'));

    let mutating = *method == Method::POST || *method == Method::PUT || *method == Method::DELETE;
    let comments = *method == Method::POST && path.split('/').any(|segment| segment == "comments");

    (mutating && under_posts) || comments
}

/// Middleware that rejects protected requests lacking a `Bearer mock_token_...`
/// header.
///
/// On success the parsed [`AuthToken`] is stored in the request extensions.
pub async fn require_bearer(mut request: Request, next: Next) -> Response {
    if !requires_bearer(request.method(), request.uri().path()) {
        return next.run(request).await;
    }

    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(AuthToken::from_authorization);

    match token {
        Some(token) => {
            request.extensions_mut().insert(token);
            next.run(request).await
        }
        None => {
            tracing::debug!(
                method = %request.method(),
                path = request.uri().path(),
                "Missing bearer token"
            );
            AppError::Unauthorized("authentication required".to_string()).into_response()
        }
    }
}
