//! Error types for gqlpad.
//!
//! Defines the main error enum used throughout the application.

use thiserror::Error;

/// Main error type for gqlpad operations.
#[derive(Error, Debug)]
pub enum GqlpadError {
    /// The request could not be sent or no response was received
    /// (connection refused, DNS failure, timeout, truncated body).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The request was rejected before it left the process (empty query, bad variables).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// A response arrived but did not contain what the command needed.
    #[error("Schema error: {0}")]
    Schema(String),

    /// Configuration errors (invalid config file, bad endpoint URL, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal application errors (I/O on stdout, unexpected states, etc.)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl GqlpadError {
    /// Creates a transport error with the given message.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates an invalid request error with the given message.
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Creates a schema error with the given message.
    pub fn schema(msg: impl Into<String>) -> Self {
        Self::Schema(msg.into())
    }

    /// Creates a configuration error with the given message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Creates an internal error with the given message.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Transport Error",
            Self::InvalidRequest(_) => "Invalid Request",
            Self::Schema(_) => "Schema Error",
            Self::Config(_) => "Configuration Error",
            Self::Internal(_) => "Internal Error",
        }
    }

    /// Returns true if this error came from the network layer.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

impl From<std::io::Error> for GqlpadError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

/// Result type alias using GqlpadError.
pub type Result<T> = std::result::Result<T, GqlpadError>;
