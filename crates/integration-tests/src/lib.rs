//! Integration tests for Postboard.
//!
//! Every test drives a [`MockApi`] the way a front end would: HTTP-shaped
//! requests in, `{ok, status, body}` responses out.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p postboard-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `api_routes` - route resolution, bearer gate, error mapping
//! - `persistence` - file-backed store across reopen, corrupt data
//! - `client_session` - typed client flows

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use postboard_api::{ApiConfig, ApiRequest, ApiResponse, MockApi};
use postboard_core::{AuthToken, LoginResponse};
use serde_json::json;

/// A data file path inside a private temp directory.
///
/// The directory and everything in it is removed when this is dropped, even
/// if the test panics first.
#[derive(Debug)]
pub struct ScratchFile {
    _dir: TempDir,
    path: PathBuf,
}

impl ScratchFile {
    /// Create a fresh directory and name a data file inside it. The file
    /// itself is not created.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the temp directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("postboard.json");
        Ok(Self { _dir: dir, path })
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// A file-backed router with no simulated latency.
///
/// # Errors
///
/// Returns the storage error if the file exists but cannot be read.
pub fn file_api(path: &Path) -> Result<MockApi, postboard_api::storage::StorageError> {
    MockApi::from_config(ApiConfig::instant().with_data_file(path))
}

/// Log in through the router and return the issued token.
///
/// # Errors
///
/// Returns the failed response if login is rejected or undecodable.
pub async fn login(api: &MockApi, email: &str, password: &str) -> Result<AuthToken, ApiResponse> {
    let response = api
        .fetch(
            ApiRequest::post("/api/auth/login")
                .json(&json!({ "email": email, "password": password })),
        )
        .await;

    match response.json::<LoginResponse>() {
        Ok(login) if response.ok() => Ok(login.token),
        _ => Err(response),
    }
}
