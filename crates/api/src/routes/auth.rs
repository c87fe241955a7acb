//! Login route handler.

use axum::{Json, extract::State};
use secrecy::SecretString;
use serde::Deserialize;
use tracing::instrument;

use postboard_core::LoginResponse;

use super::extract::JsonBody;
use crate::error::Result;
use crate::state::AppState;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Exchange an email/password pair for a token and user summary.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let password = SecretString::from(form.password);
    let response = state.blog().login(&form.email, &password).await?;
    Ok(Json(response))
}
