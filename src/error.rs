//! Custom error types and handling
//!
//! Producers never fail for a well-formed integer slice; these errors cover
//! range computation, lookups by name, configuration and the runners.

use crate::config::ConfigError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Algorithm errors
    #[error("Invalid range: cannot compute min/max of an empty sequence")]
    InvalidRange,

    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),

    // Validation errors
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Runner errors
    #[error("Timed out: {0}")]
    Timeout(String),

    #[error("Render error: {0}")]
    Render(String),

    // Internal errors
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRange => "INVALID_RANGE",
            Self::UnknownAlgorithm(_) => "UNKNOWN_ALGORITHM",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Timeout(_) => "TIMEOUT",
            Self::Render(_) => "RENDER_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Render(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
