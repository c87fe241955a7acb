//! Authentication error types.

use thiserror::Error;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No credential record matches the email/password pair.
    #[error("invalid credentials")]
    InvalidCredentials,
}
