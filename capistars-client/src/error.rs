//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, TLS, body read)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Response body is not a tRPC envelope of the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Procedure name is not a dot-delimited identifier path
    #[error("Invalid procedure name: {0:?}")]
    InvalidProcedure(String),

    /// Edit field unknown for the resource, or its value does not parse
    #[error("Invalid field {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Whether the failure happened before the server produced a response
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
