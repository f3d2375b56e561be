//! Mock chat client for testing.
//!
//! [`MockClient`] returns pre-configured responses and fragment scripts in
//! order, and records every request it receives.
//!
//! # Examples
//!
//! ```rust
//! use glean_ai_client::MockClient;
//!
//! let client = MockClient::new()
//!     .with_text_response("First response")
//!     .with_fragments(["Here", " you go: ", "[1, 2, 3]"]);
//! ```

use async_trait::async_trait;
use futures::stream;
use glean_ai_core::{ChatFragment, ChatRequest, ChatResponse};
use parking_lot::Mutex;
use std::sync::Arc;

use crate::client::{ChatClient, FragmentStream};
use crate::error::ClientError;

/// A script for one streamed response, consumed item by item.
pub type FragmentScript = Vec<Result<ChatFragment, ClientError>>;

/// A mock client with pre-configured responses.
///
/// Complete responses and fragment scripts are kept in separate queues:
/// `send` consumes the response queue, `send_streaming` the script queue.
/// Cloning the client shares both queues and the request log.
#[derive(Debug, Clone, Default)]
pub struct MockClient {
    responses: Arc<Mutex<Vec<ChatResponse>>>,
    scripts: Arc<Mutex<Vec<FragmentScript>>>,
    requests: Arc<Mutex<Vec<ChatRequest>>>,
}

impl MockClient {
    /// Create a new mock client with empty queues.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a complete response.
    #[must_use]
    pub fn with_response(self, response: ChatResponse) -> Self {
        self.responses.lock().push(response);
        self
    }

    /// Queue a complete response with the given text content.
    #[must_use]
    pub fn with_text_response(self, text: impl Into<String>) -> Self {
        self.with_response(ChatResponse::text(text).with_model_name("mock"))
    }

    /// Queue a complete response that carries no content at all.
    #[must_use]
    pub fn with_empty_response(self) -> Self {
        self.with_response(ChatResponse::empty().with_model_name("mock"))
    }

    /// Queue a fragment script made of plain text deltas.
    #[must_use]
    pub fn with_fragments<I, S>(self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = fragments
            .into_iter()
            .map(|text| Ok(ChatFragment::delta(text)))
            .collect();
        self.with_fragment_script(script)
    }

    /// Queue a raw fragment script, including empty fragments or errors.
    #[must_use]
    pub fn with_fragment_script(self, script: FragmentScript) -> Self {
        self.scripts.lock().push(script);
        self
    }

    /// Get recorded requests.
    #[must_use]
    pub fn recorded_requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().clone()
    }

    /// Clear recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().clear();
    }
}

#[async_trait]
impl ChatClient for MockClient {
    fn provider(&self) -> &str {
        "mock"
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        self.requests.lock().push(request.clone());

        let mut responses = self.responses.lock();
        if responses.is_empty() {
            Ok(ChatResponse::text("Mock response").with_model_name("mock"))
        } else {
            Ok(responses.remove(0))
        }
    }

    async fn send_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, ClientError> {
        self.requests.lock().push(request.clone());

        let mut scripts = self.scripts.lock();
        if scripts.is_empty() {
            Err(ClientError::Other(anyhow::anyhow!(
                "no fragment script queued for MockClient"
            )))
        } else {
            Ok(Box::pin(stream::iter(scripts.remove(0))))
        }
    }
}
