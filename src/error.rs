//! Error types for Kaiwatore
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Kaiwatore operations
///
/// This enum encompasses all possible errors that can occur during
/// configuration loading, provider interactions, and session handling.
///
/// Provider failures are almost always absorbed by the coach components,
/// which map them to deterministic fallback values; the only error that
/// deliberately reaches the transport layer is `SessionNotFound`.
#[derive(Error, Debug)]
pub enum KaiwatoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Provider-related errors (API calls, malformed responses, etc.)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Missing credentials for provider
    #[error("Missing credentials for provider: {0}")]
    MissingCredentials(String),

    /// Provider returned a response with no usable text
    #[error("Provider returned an empty completion")]
    EmptyCompletion,

    /// Referenced session id is absent from the store
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Kaiwatore operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;
