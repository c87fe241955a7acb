//! Comment route handlers.

use axum::{Json, extract::State};
use tracing::instrument;

use postboard_core::{Comment, NewComment, PostId};

use super::extract::{JsonBody, PathParam};
use crate::error::Result;
use crate::state::AppState;

/// List a post's comments, oldest first.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    PathParam(id): PathParam<PostId>,
) -> Json<Vec<Comment>> {
    Json(state.blog().list_comments(&id).await)
}

/// Add a comment to a post.
#[instrument(skip(state, data))]
pub async fn create(
    State(state): State<AppState>,
    PathParam(id): PathParam<PostId>,
    JsonBody(data): JsonBody<NewComment>,
) -> Result<Json<Comment>> {
    Ok(Json(state.blog().create_comment(&id, data).await?))
}
