//! API configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POSTBOARD_DATA_FILE` - JSON file backing the local store (default: in-memory)
//! - `POSTBOARD_SIMULATE_LATENCY` - `true`/`false`, simulate network delays (default: true)

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Postboard API configuration.
#[derive(Debug, Clone, Default)]
pub struct ApiConfig {
    /// File backing the key-value store. `None` keeps everything in memory.
    pub data_file: Option<PathBuf>,
    /// Simulated per-operation delays.
    pub latency: LatencyProfile,
}

/// Simulated delay before each service operation completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyProfile {
    pub login: Duration,
    pub list_posts: Duration,
    pub get_post: Duration,
    pub create_post: Duration,
    pub update_post: Duration,
    pub delete_post: Duration,
    pub create_comment: Duration,
    pub list_comments: Duration,
}

impl LatencyProfile {
    /// Delays that feel like a real backend.
    #[must_use]
    pub const fn realistic() -> Self {
        Self {
            login: Duration::from_millis(800),
            list_posts: Duration::from_millis(300),
            get_post: Duration::from_millis(400),
            create_post: Duration::from_millis(600),
            update_post: Duration::from_millis(500),
            delete_post: Duration::from_millis(400),
            create_comment: Duration::from_millis(300),
            list_comments: Duration::from_millis(200),
        }
    }

    /// No delays at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            list_posts: Duration::ZERO,
            get_post: Duration::ZERO,
            create_post: Duration::ZERO,
            update_post: Duration::ZERO,
            delete_post: Duration::ZERO,
            create_comment: Duration::ZERO,
            list_comments: Duration::ZERO,
        }
    }
}

impl Default for LatencyProfile {
    fn default() -> Self {
        Self::realistic()
    }
}

impl ApiConfig {
    /// In-memory store, no simulated delays. Handy for tests.
    #[must_use]
    pub const fn instant() -> Self {
        Self {
            data_file: None,
            latency: LatencyProfile::none(),
        }
    }

    /// Builder method to back the store with a file.
    #[must_use]
    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let data_file = get_optional_env("POSTBOARD_DATA_FILE").map(PathBuf::from);
        let simulate = parse_bool(
            "POSTBOARD_SIMULATE_LATENCY",
            &get_env_or_default("POSTBOARD_SIMULATE_LATENCY", "true"),
        )?;

        Ok(Self {
            data_file,
            latency: if simulate {
                LatencyProfile::realistic()
            } else {
                LatencyProfile::none()
            },
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse a boolean flag value.
fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("expected a boolean, got '{other}'"),
        )),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert!(parse_bool("K", "true").unwrap());
        assert!(parse_bool("K", " ON ").unwrap());
        assert!(parse_bool("K", "1").unwrap());
        assert!(!parse_bool("K", "false").unwrap());
        assert!(!parse_bool("K", "off").unwrap());
    }

    #[test]
    fn test_parse_bool_rejects_garbage() {
        let err = parse_bool("POSTBOARD_SIMULATE_LATENCY", "maybe").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(key, _) if key == "POSTBOARD_SIMULATE_LATENCY"));
    }

    #[test]
    fn test_default_is_realistic_in_memory() {
        let config = ApiConfig::default();
        assert!(config.data_file.is_none());
        assert_eq!(config.latency, LatencyProfile::realistic());
        assert_eq!(config.latency.login, Duration::from_millis(800));
    }

    #[test]
    fn test_instant_has_no_delays() {
        let config = ApiConfig::instant().with_data_file("/tmp/postboard.json");
        assert_eq!(config.latency, LatencyProfile::none());
        assert_eq!(
            config.data_file.as_deref(),
            Some(std::path::Path::new("/tmp/postboard.json"))
        );
    }
}
