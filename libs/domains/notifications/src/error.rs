//! Error types for the notifications domain.
//!
//! Rendering never fails; these errors come from decoding requests,
//! configuration, and the delivery provider.

use thiserror::Error;

/// Result type for notification operations.
pub type NotificationResult<T> = Result<T, NotificationError>;

/// Errors that can occur in the notifications domain.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// Request is missing something a send needs (recipient, blocks).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidEmail(String),

    /// Transport-level failure talking to the provider.
    #[error("Email provider error: {0}")]
    ProviderError(String),

    /// Provider answered with a structured `{error: {message}}` body.
    #[error("Email provider rejected the message: {message}")]
    ProviderRejected { status: u16, message: String },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request or template document could not be decoded.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Membership lookup failed.
    #[error("Membership lookup failed: {0}")]
    MembershipLookup(String),
}

impl From<serde_json::Error> for NotificationError {
    fn from(err: serde_json::Error) -> Self {
        NotificationError::SerializationError(err.to_string())
    }
}

impl From<reqwest::Error> for NotificationError {
    fn from(err: reqwest::Error) -> Self {
        NotificationError::ProviderError(err.to_string())
    }
}

impl From<core_config::ConfigError> for NotificationError {
    fn from(err: core_config::ConfigError) -> Self {
        NotificationError::ConfigError(err.to_string())
    }
}
