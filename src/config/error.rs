//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Retry attempts must be at least 1")]
    InvalidRetryAttempts,

    #[error("Receipt history capacity must be at least 1")]
    InvalidHistoryCapacity,

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_errors_display_their_reason() {
        assert_eq!(
            ValidationError::InvalidRetryAttempts.to_string(),
            "Retry attempts must be at least 1"
        );
        assert_eq!(
            ValidationError::InvalidCatalog("duplicate game pass 7".to_string()).to_string(),
            "Invalid catalog: duplicate game pass 7"
        );
    }

    #[test]
    fn validation_error_converts_to_config_error() {
        let err: ConfigError = ValidationError::InvalidHistoryCapacity.into();

        assert!(matches!(
            err,
            ConfigError::ValidationFailed(ValidationError::InvalidHistoryCapacity)
        ));
        assert_eq!(
            err.to_string(),
            "Validation failed: Receipt history capacity must be at least 1"
        );
    }
}
