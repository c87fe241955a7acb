//! Authentication service.
//!
//! Matches login attempts against a fixed credential list and mints mock
//! bearer tokens. There is no user registration and no token verification;
//! the router only checks token shape.

mod error;

pub use error::AuthError;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use postboard_core::{AuthToken, Email, EmailError, LoginResponse, UserId, UserSummary};

/// A static login credential.
#[derive(Debug, Clone, Copy)]
pub struct Credential {
    pub id: &'static str,
    pub email: &'static str,
    pub password: &'static str,
    pub name: &'static str,
}

impl Credential {
    /// The public summary of this credential's user.
    ///
    /// # Errors
    ///
    /// Returns `EmailError` if the configured email is malformed.
    pub fn summary(&self) -> Result<UserSummary, EmailError> {
        Ok(UserSummary {
            id: UserId::new(self.id),
            name: self.name.to_owned(),
            email: Email::parse(self.email)?,
        })
    }
}

/// The accounts that can log in.
pub const CREDENTIALS: &[Credential] = &[
    Credential {
        id: "1",
        email: "professor@exemplo.com",
        password: "demo123",
        name: "Prof. João Silva",
    },
    Credential {
        id: "2",
        email: "admin@exemplo.com",
        password: "admin123",
        name: "Admin Sistema",
    },
    Credential {
        id: "3",
        email: "maria@exemplo.com",
        password: "123456",
        name: "Profa. Maria Santos",
    },
];

/// Authentication service over a credential list.
#[derive(Debug, Clone, Copy)]
pub struct AuthService {
    credentials: &'static [Credential],
}

impl Default for AuthService {
    fn default() -> Self {
        Self::new(CREDENTIALS)
    }
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(credentials: &'static [Credential]) -> Self {
        Self { credentials }
    }

    /// Find the credential matching `email` and `password` exactly.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if nothing matches.
    pub fn authenticate(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<&'static Credential, AuthError> {
        self.credentials
            .iter()
            .find(|cred| cred.email == email && cred.password == password.expose_secret())
            .ok_or(AuthError::InvalidCredentials)
    }

    /// Login with email and password, minting a token stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub fn login(
        &self,
        email: &str,
        password: &SecretString,
        now: DateTime<Utc>,
    ) -> Result<LoginResponse, AuthError> {
        let credential = self.authenticate(email, password)?;

        // Credential emails are compile-time constants; a bad one is unusable.
        let user = credential.summary().map_err(|e| {
            tracing::error!(user_id = credential.id, error = %e, "Malformed credential email");
            AuthError::InvalidCredentials
        })?;

        Ok(LoginResponse {
            token: AuthToken::issue(&user.id, now),
            user,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn test_every_credential_logs_in() {
        let auth = AuthService::default();
        let now = Utc::now();

        for cred in CREDENTIALS {
            let response = auth.login(cred.email, &secret(cred.password), now).unwrap();
            assert_eq!(response.user.id.as_str(), cred.id);
            assert_eq!(response.user.name, cred.name);
            assert_eq!(response.user.email.as_str(), cred.email);
            assert!(response.token.as_str().starts_with(AuthToken::PREFIX));
            assert_eq!(
                response.token.as_str(),
                format!("mock_token_{}_{}", cred.id, now.timestamp_millis())
            );
        }
    }

    #[test]
    fn test_wrong_pairs_are_rejected() {
        let auth = AuthService::default();
        let now = Utc::now();

        let attempts = [
            ("professor@exemplo.com", "admin123"),
            ("admin@exemplo.com", "demo123"),
            ("PROFESSOR@exemplo.com", "demo123"),
            ("professor@exemplo.com", "demo123 "),
            ("ninguem@exemplo.com", "123456"),
            ("", ""),
        ];

        for (email, password) in attempts {
            assert_eq!(
                auth.login(email, &secret(password), now).unwrap_err(),
                AuthError::InvalidCredentials,
                "{email}/{password} should not log in"
            );
        }
    }

    #[test]
    fn test_all_credential_emails_are_valid() {
        for cred in CREDENTIALS {
            assert!(cred.summary().is_ok(), "{} has a bad email", cred.email);
        }
    }
}
