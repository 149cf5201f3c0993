//! Error types shared by every TALON store

use thiserror::Error;

/// TALON errors
///
/// Every failure is caller misuse: there is no I/O on the query paths and
/// nothing transient to retry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TalonError {
    /// A query was made against a store that holds no samples
    #[error("Store has no samples")]
    EmptyStore,

    /// Malformed input rejected before any state was touched
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TalonError {
    /// Shorthand for [`TalonError::InvalidArgument`]
    pub fn invalid(msg: impl Into<String>) -> Self {
        TalonError::InvalidArgument(msg.into())
    }

    /// Shorthand for [`TalonError::Config`]
    pub fn config(msg: impl Into<String>) -> Self {
        TalonError::Config(msg.into())
    }
}

impl From<toml::de::Error> for TalonError {
    fn from(err: toml::de::Error) -> Self {
        TalonError::Config(err.to_string())
    }
}

impl From<std::io::Error> for TalonError {
    fn from(err: std::io::Error) -> Self {
        TalonError::Config(err.to_string())
    }
}

/// Result type for TALON operations
pub type TalonResult<T> = Result<T, TalonError>;
