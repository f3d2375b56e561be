//! Client-related error types.

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a chat client implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// API-level error with an HTTP-style status.
    #[error("API error: {status} - {message}")]
    Api {
        /// Status code reported by the backend.
        status: u16,
        /// Error message.
        message: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Request timeout.
    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    /// The backend answered with something the client could not decode.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Other error.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ClientError {
    /// Check if this error is retryable.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Timeout(_) => true,
            ClientError::Connection(_) => true,
            ClientError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

/// Result type for client operations.
pub type ClientResult<T> = Result<T, ClientError>;
