//! HTTP route handlers for the mock API.
//!
//! # Route Structure
//!
//! ```text
//! # Auth
//! POST   /api/auth/login               - Login
//!
//! # Posts (mutations require a bearer token)
//! GET    /api/posts                    - List posts (?search=)
//! POST   /api/posts                    - Create post
//! GET    /api/posts/{id}               - Post with comments
//! PUT    /api/posts/{id}               - Update post
//! DELETE /api/posts/{id}               - Delete post and its comments
//! GET    /api/posts/{id}/comments      - List comments
//! POST   /api/posts/{id}/comments      - Add comment
//! ```
//!
//! Anything else, including a known path with the wrong method, is a 404.

pub mod auth;
pub mod comments;
pub mod extract;
pub mod posts;

use axum::{
    Router,
    http::{Method, Uri},
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/api/auth/login", post(auth::login))
}

/// Create the post and comment routes router.
pub fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/api/posts", get(posts::index).post(posts::create))
        .route(
            "/api/posts/{id}",
            get(posts::show).put(posts::update).delete(posts::destroy),
        )
        .route(
            "/api/posts/{id}/comments",
            get(comments::index).post(comments::create),
        )
}

/// Create all routes for the mock API, with a JSON 404 for anything
/// unmatched.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(post_routes())
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
}

async fn route_not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method,
        path: uri.path().to_string(),
    }
}
