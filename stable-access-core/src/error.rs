//! Error types for configuration loading
//!
//! Access decisions never fail: a missing revision, approval or right is a
//! negative decision, not an error. Only building the configuration can go
//! wrong, and those failures are described here.

use thiserror::Error;

use stable_access_rbac::RightsError;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key
        key: String,
        /// Error message
        message: String,
    },

    /// Configuration document could not be parsed
    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Rights table could not be built
    #[error("Invalid rights table: {0}")]
    Rights(#[from] RightsError),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

impl ConfigError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.to_string(),
            message: message.into(),
        }
    }
}
