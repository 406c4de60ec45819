//! Error types for miniapp-schema.

use thiserror::Error;

use crate::validate::ValidationError;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// Result type for miniapp-schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Error type for miniapp-schema operations outside of document validation.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Invalid validator configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration parse error.
    #[error("Failed to parse configuration: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    /// Configuration serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] toml::ser::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A metadata document failed validation.
    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl From<anyhow::Error> for SchemaError {
    fn from(err: anyhow::Error) -> Self {
        SchemaError::Generic(format!("{:#}", err))
    }
}
