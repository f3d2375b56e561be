//! Streaming errors.

use glean_ai_client::ClientError;
use thiserror::Error;

/// Errors a stream can surface.
///
/// Only transport problems become stream errors. A fragment that does not
/// parse yet is simply retried when the next fragment lands, and an element
/// the schema rejects is skipped; neither ever appears as an `Err` item.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The underlying client failed mid-stream.
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl StreamError {
    /// Whether retrying the whole request might succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Client(err) => err.is_retryable(),
            Self::Other(_) => false,
        }
    }

    /// Create from any displayable error.
    pub fn from_err<E: std::fmt::Display>(err: E) -> Self {
        Self::Other(err.to_string())
    }
}

/// Result type for streaming operations.
pub type StreamResult<T> = Result<T, StreamError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_client_errors_keep_their_retry_class() {
        let timeout = StreamError::from(ClientError::Timeout(Duration::from_secs(5)));
        assert!(timeout.is_retryable());

        let api = StreamError::from(ClientError::api(400, "bad request"));
        assert!(!api.is_retryable());
    }

    #[test]
    fn test_from_err_wraps_display() {
        let err = StreamError::from_err("boom");
        assert_eq!(err.to_string(), "boom");
        assert!(!err.is_retryable());
    }
}
