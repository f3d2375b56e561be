//! Extraction errors.
//!
//! `Err` is reserved for the two states a caller cannot recover from by
//! looking at the data: a misconfigured extractor and a failed transport.
//! Missing content, undecodable structure, and schema rejection all come
//! back as `Ok(None)` or skipped elements instead.

use glean_ai_client::ClientError;
use thiserror::Error;

/// Errors returned by [`Extractor`](crate::Extractor) and its builder.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The extractor was built without something it cannot run without.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The chat client failed to deliver a response.
    #[error("client error: {0}")]
    Client(#[from] ClientError),
}

impl ExtractError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Whether this is a configuration error.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Result type for extraction operations.
pub type ExtractResult<T> = Result<T, ExtractError>;
