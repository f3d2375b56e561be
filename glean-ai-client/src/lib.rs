//! # glean-ai-client
//!
//! Chat client trait and testing clients for glean-ai.
//!
//! This crate provides the [`ChatClient`] trait, the boundary between
//! glean-ai and whatever actually talks to a model: an HTTP provider
//! binding, a local inference server, or a test double. The rest of the
//! workspace only ever sees this trait.
//!
//! Provider bindings live outside this workspace. What ships here is the
//! trait itself plus [`MockClient`], a scriptable client for tests.
//!
//! ## Example
//!
//! ```rust
//! use glean_ai_client::{ChatClient, MockClient};
//! use glean_ai_core::ChatRequest;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let client = MockClient::new().with_text_response("42");
//!
//! let request = ChatRequest::new("test-model");
//! let response = client.send(&request).await.unwrap();
//! assert_eq!(response.content(), Some("42"));
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod error;
pub mod mock;

// Re-exports
pub use client::{BoxedClient, ChatClient, FragmentStream};
pub use error::{ClientError, ClientResult};
pub use mock::{FragmentScript, MockClient};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::client::{BoxedClient, ChatClient, FragmentStream};
    pub use crate::error::{ClientError, ClientResult};
    pub use crate::mock::MockClient;
}
