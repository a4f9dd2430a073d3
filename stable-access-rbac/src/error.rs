//! Error types for rights tables

use thiserror::Error;

/// Errors raised while building rights tables from external input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RightsError {
    /// A right name was not recognised
    #[error("Unknown right: {0}")]
    UnknownRight(String),

    /// A group name was empty
    #[error("Group name must not be empty")]
    EmptyGroup,
}

/// Result type for rights table operations.
pub type RightsResult<T> = Result<T, RightsError>;
