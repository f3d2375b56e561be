//! Core chat client trait and types.
//!
//! This module defines the `ChatClient` trait, the seam where real network
//! clients plug into the workspace. Everything above this trait is
//! transport-agnostic: model selection, authentication, retries, and
//! timeouts all live behind it.

use async_trait::async_trait;
use futures::Stream;
use glean_ai_core::{ChatFragment, ChatRequest, ChatResponse};
use std::pin::Pin;
use std::sync::Arc;

use crate::error::ClientError;

/// Type alias for a streamed response: fragments as the model produces them.
pub type FragmentStream = Pin<Box<dyn Stream<Item = Result<ChatFragment, ClientError>> + Send>>;

/// Core chat client trait.
///
/// Implementations send one request and either return the complete response
/// or a stream of fragments. The stream ends when the fragment source is
/// exhausted; there is no explicit end-of-stream marker.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// The provider this client talks to (openai, anthropic, mock, ...).
    fn provider(&self) -> &str;

    /// Send a request and wait for the complete response.
    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError>;

    /// Send a request and stream the response fragments.
    async fn send_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, ClientError>;
}

/// Type alias for a shared, dynamically-dispatched client.
pub type BoxedClient = Arc<dyn ChatClient>;

#[async_trait]
impl<T: ChatClient + ?Sized> ChatClient for Arc<T> {
    fn provider(&self) -> &str {
        (**self).provider()
    }

    async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, ClientError> {
        (**self).send(request).await
    }

    async fn send_streaming(&self, request: &ChatRequest) -> Result<FragmentStream, ClientError> {
        (**self).send_streaming(request).await
    }
}
