//! Configuration errors.

use thiserror::Error;

/// Loading or validating `AppConfig` failed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// A loaded value is unusable.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Request timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    #[error("Invalid service URL for {0}")]
    InvalidServiceUrl(&'static str),

    #[error("Service URL for {0} must use HTTPS in production")]
    ServiceUrlMustBeHttps(&'static str),

    #[error("Invalid service timeout")]
    InvalidServiceTimeout,

    #[error("Too many classifier retries (maximum 5)")]
    TooManyRetries,

    #[error(
        "Request timeout of {request_secs}s is shorter than the {required_secs}s \
         the remote services may take"
    )]
    RequestTimeoutTooShort { request_secs: u64, required_secs: u64 },
}
