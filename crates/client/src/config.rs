//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VITRINA_BACKEND_URL` - Base URL of the inventory backend
//!
//! ## Optional
//! - `VITRINA_USER_ID` - Identity to act as (the auth collaborator's uid)
//! - `VITRINA_PAGE_SIZE` - Items fetched per page (default: 100)
//! - `VITRINA_TIMEOUT_SECS` - Per-request timeout in seconds (default: 30)

use std::time::Duration;

use thiserror::Error;
use url::Url;
use vitrina_core::UserId;

const DEFAULT_PAGE_SIZE: usize = 100;
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the inventory backend
    pub backend_url: Url,
    /// Identity to act as, when provided via the environment
    pub user_id: Option<UserId>,
    /// Items fetched per page
    pub page_size: usize,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing or a value
    /// fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend_url = required("VITRINA_BACKEND_URL")?;
        let backend_url = Url::parse(&backend_url).map_err(|e| {
            ConfigError::InvalidEnvVar("VITRINA_BACKEND_URL".to_string(), e.to_string())
        })?;

        let user_id = optional("VITRINA_USER_ID").map(UserId::new);

        let page_size = match optional("VITRINA_PAGE_SIZE") {
            Some(raw) => {
                let parsed: usize = raw.parse().map_err(|_| {
                    ConfigError::InvalidEnvVar("VITRINA_PAGE_SIZE".to_string(), raw.clone())
                })?;
                if parsed == 0 {
                    return Err(ConfigError::InvalidEnvVar(
                        "VITRINA_PAGE_SIZE".to_string(),
                        "page size must be positive".to_string(),
                    ));
                }
                parsed
            }
            None => DEFAULT_PAGE_SIZE,
        };

        let timeout_secs = match optional("VITRINA_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                ConfigError::InvalidEnvVar("VITRINA_TIMEOUT_SECS".to_string(), raw.clone())
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        Ok(Self {
            backend_url,
            user_id,
            page_size,
            timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Build a configuration for a known backend URL, defaults elsewhere.
    ///
    /// Used by tests and by callers that resolve the URL themselves.
    #[must_use]
    pub fn for_backend(backend_url: Url) -> Self {
        Self {
            backend_url,
            user_id: None,
            page_size: DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}
