//! Mock bearer tokens.
//!
//! Tokens are opaque to clients but have a fixed shape:
//! `mock_token_{user_id}_{unix_millis}`. The router only checks that shape;
//! there is no signature or expiry.

use core::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

/// A bearer token issued by login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Every issued token starts with this prefix.
    pub const PREFIX: &'static str = "mock_token_";

    /// Scheme expected in the `Authorization` header.
    pub const SCHEME: &'static str = "Bearer ";

    /// Mint a token for `user_id` at `issued_at`.
    #[must_use]
    pub fn issue(user_id: &UserId, issued_at: DateTime<Utc>) -> Self {
        Self(format!(
            "{}{}_{}",
            Self::PREFIX,
            user_id,
            issued_at.timestamp_millis()
        ))
    }

    /// Extract a token from an `Authorization` header value.
    ///
    /// Returns `None` unless the value is `Bearer mock_token_...`.
    #[must_use]
    pub fn from_authorization(header: &str) -> Option<Self> {
        header
            .strip_prefix(Self::SCHEME)
            .filter(|token| token.starts_with(Self::PREFIX))
            .map(|token| Self(token.to_owned()))
    }

    /// The full `Authorization` header value for this token.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("{}{}", Self::SCHEME, self.0)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}
