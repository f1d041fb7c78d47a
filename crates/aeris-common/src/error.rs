//! Error types for Aeris
//!
//! This module defines `AerisError`, the application-specific error enum
//! shared across crates.

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum AerisError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("dataset error: {0}")]
    DatasetError(String),

    #[error("network error: {0}")]
    NetworkError(String),

    #[error("registration error: {0}")]
    RegistrationError(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    InternalError(String),
}
