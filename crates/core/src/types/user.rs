//! User summary returned by login.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::token::AuthToken;

/// Public view of a logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub email: Email,
}

/// Successful login payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: AuthToken,
    pub user: UserSummary,
}
