//! Error types for the quiz engine
//!
//! This module defines all error types used throughout the crate.
//!
//! Question generation and answer submission never fail with an `Error`:
//! insufficient data degrades into a shorter batch, and invalid call
//! sequencing is a logged no-op. Errors surface only at the edges, namely
//! configuration validation and country sourcing.

use thiserror::Error;

/// Result type alias for quiz operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the quiz engine
#[derive(Error, Debug)]
pub enum Error {
    /// Country source errors (unreadable or malformed documents)
    #[error("country source error: {0}")]
    Source(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),

    /// I/O errors from source implementations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a country source error
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

/// Helper for converting anyhow::Error to our Error type
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
