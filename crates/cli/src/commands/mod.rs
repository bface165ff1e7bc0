//! CLI command implementations.

use thiserror::Error;

use vitrina_client::{ApiClient, ApiError, Config, ConfigError};
use vitrina_core::{CategoryError, UserId};

pub mod add_product;
pub mod credentials;
pub mod items;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// No identity to act as.
    #[error("VITRINA_USER_ID is not set; the console needs an identity to act as")]
    MissingIdentity,

    /// Backend operation failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Unknown category name.
    #[error(transparent)]
    Category(#[from] CategoryError),

    /// Image file could not be read.
    #[error("Failed to read image {path}: {source}")]
    Image {
        path: String,
        source: std::io::Error,
    },
}

/// Load configuration and build the API client plus the acting identity.
pub fn bootstrap() -> Result<(Config, ApiClient, UserId), CommandError> {
    let config = Config::from_env()?;
    let api = ApiClient::new(&config)?;
    let user_id = config
        .user_id
        .clone()
        .ok_or(CommandError::MissingIdentity)?;
    Ok((config, api, user_id))
}
