//! Post route handlers.

use axum::{
    Json,
    extract::{RawQuery, State},
};
use tracing::instrument;

use postboard_core::{NewPost, Post, PostId, PostPatch, PostWithComments};

use super::extract::{JsonBody, PathParam};
use crate::error::Result;
use crate::services::Deleted;
use crate::state::AppState;

/// Query parameters for the post listing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
}

impl ListQuery {
    /// Parse a raw query string. Unknown keys are ignored and a repeated
    /// `search` keeps its first value.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        let search = raw.and_then(|raw| {
            url::form_urlencoded::parse(raw.as_bytes())
                .find(|(key, _)| key == "search")
                .map(|(_, value)| value.into_owned())
        });
        Self { search }
    }
}

/// List posts, newest first.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>, RawQuery(raw): RawQuery) -> Json<Vec<Post>> {
    let query = ListQuery::parse(raw.as_deref());
    Json(state.blog().list_posts(query.search.as_deref()).await)
}

/// Show one post with its comments.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    PathParam(id): PathParam<PostId>,
) -> Result<Json<PostWithComments>> {
    Ok(Json(state.blog().get_post(&id).await?))
}

/// Create a post.
#[instrument(skip(state, data))]
pub async fn create(
    State(state): State<AppState>,
    JsonBody(data): JsonBody<NewPost>,
) -> Result<Json<Post>> {
    Ok(Json(state.blog().create_post(data).await?))
}

/// Update a post with the supplied fields.
#[instrument(skip(state, patch))]
pub async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<PostId>,
    JsonBody(patch): JsonBody<PostPatch>,
) -> Result<Json<Post>> {
    Ok(Json(state.blog().update_post(&id, patch).await?))
}

/// Delete a post and its comments.
#[instrument(skip(state))]
pub async fn destroy(
    State(state): State<AppState>,
    PathParam(id): PathParam<PostId>,
) -> Result<Json<Deleted>> {
    Ok(Json(state.blog().delete_post(&id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_parse() {
        assert_eq!(ListQuery::parse(None), ListQuery::default());
        assert_eq!(ListQuery::parse(Some("page=2")).search, None);
        assert_eq!(
            ListQuery::parse(Some("search=ol%C3%A1+mundo")).search.as_deref(),
            Some("olá mundo")
        );
        assert_eq!(
            ListQuery::parse(Some("search=silva&search=react")).search.as_deref(),
            Some("silva")
        );
        assert_eq!(ListQuery::parse(Some("search=")).search.as_deref(), Some(""));
    }
}
