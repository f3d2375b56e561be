//! # glean-ai - Structured Output Extraction for LLM Responses
//!
//! Language models wrap their answers in prose, Markdown fences, and
//! half-finished JSON. glean-ai digs the typed value out: it narrows a
//! response to its fenced payload, decodes it tolerantly (repairing
//! truncated JSON, falling back to YAML, keeping raw text as a last
//! resort), and validates the result against a schema. The same pipeline
//! runs over complete responses and over live fragment streams, where
//! sequence elements are yielded as soon as they can no longer change.
//!
//! ## Quick Start
//!
//! ```
//! use glean_ai::prelude::*;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Fact {
//!     subject: String,
//!     claim: String,
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ExtractError> {
//!     // Stands in for a real provider client.
//!     let client = MockClient::new().with_text_response(
//!         "Here you go:\n```json\n{\"subject\": \"Osaka\", \"claim\": \"Japan's kitchen\"}\n```",
//!     );
//!
//!     let extractor = Extractor::builder()
//!         .client(client)
//!         .model("test-model")
//!         .system_prompt("Reply with a single JSON object.")
//!         .schema(ObjectSchema::<Fact>::new())
//!         .build()?;
//!
//!     let fact = extractor.run(&"One fact about Osaka".to_string()).await?;
//!     assert_eq!(fact.unwrap().subject, "Osaka");
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! Sequence-shaped schemas stream their elements incrementally. Every
//! element except the still-growing last one is yielded as fragments
//! arrive; the final element follows once the model finishes:
//!
//! ```
//! use futures::StreamExt;
//! use glean_ai::prelude::*;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ExtractError> {
//!     let client = MockClient::new().with_fragments([
//!         "Sure:\n```json\n[\"red\",",
//!         " \"green\",",
//!         " \"blue\"]\n```",
//!     ]);
//!
//!     let extractor = Extractor::builder()
//!         .client(client)
//!         .model("test-model")
//!         .schema(SequenceSchema::<String>::new())
//!         .build()?;
//!
//!     let mut colors = extractor.stream(&"Three colors".to_string()).await?.elements();
//!     while let Some(color) = colors.next().await {
//!         println!("{}", color.unwrap());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## How a response is processed
//!
//! 1. **Shape policy** - the schema's [`OutputShape`] is looked up once per
//!    run. Text-shaped schemas skip straight to validation with the body
//!    verbatim; object and sequence shapes get the full pipeline.
//! 2. **Extraction** - [`extract_fenced_block`] slices out the first fenced
//!    code block, ignoring commentary around it.
//! 3. **Tolerant parsing** - [`parse_tolerant`] tries partial-JSON repair,
//!    then YAML, then keeps the raw window text.
//! 4. **Validation** - the [`OutputSchema`] has the only veto. A rejected
//!    candidate is `Ok(None)` from [`Extractor::run`], a skipped element on
//!    a stream; never a panic, never a retry loop.
//!
//! ## Architecture
//!
//! glean-ai is organized as a workspace of focused crates:
//!
//! - [`glean_ai_core`] - Chat messages, request settings, fragment types
//! - [`glean_ai_client`] - The `ChatClient` boundary and the mock client
//! - [`glean_ai_output`] - Extraction, tolerant parsing, schemas, validation
//! - [`glean_ai_streaming`] - The incremental element stream

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod builder;
pub mod errors;
pub mod extractor;
pub mod template;

// ============================================================================
// Member Crate Re-exports
// ============================================================================

/// Chat message and settings types.
pub use glean_ai_core as core;

/// Chat client boundary.
pub use glean_ai_client as client;

/// Extraction, parsing, and schema validation.
pub use glean_ai_output as output;

/// Incremental element streaming.
pub use glean_ai_streaming as streaming;

// ============================================================================
// Core Type Re-exports (Flat)
// ============================================================================

// Extractor
pub use builder::ExtractorBuilder;
pub use errors::{ExtractError, ExtractResult};
pub use extractor::Extractor;
pub use template::PromptTemplate;

// Messages
pub use glean_ai_core::{
    ChatFragment, ChatMessage, ChatRequest, ChatResponse, RequestSettings, Role,
};

// Client
pub use glean_ai_client::{
    BoxedClient, ChatClient, ClientError, ClientResult, FragmentScript, FragmentStream, MockClient,
};

// Output
pub use glean_ai_output::{
    extract_fenced_block, parse_partial_json, parse_tolerant, validated, validated_element,
    ObjectSchema, OutputSchema, OutputShape, SchemaError, SchemaResult, SequenceSchema,
    ShapePolicy, TextSchema,
};

// Streaming
pub use glean_ai_streaming::{
    ElementStream, Elements, GleanStreamExt, StreamError, StreamItem, StreamPhase, StreamResult,
    TextDeltas,
};

// ============================================================================
// Prelude Module
// ============================================================================

/// Convenient prelude for common imports.
///
/// Import everything you need with a single use statement:
///
/// ```
/// use glean_ai::prelude::*;
/// ```
pub mod prelude {
    // Extractor
    pub use crate::builder::ExtractorBuilder;
    pub use crate::errors::{ExtractError, ExtractResult};
    pub use crate::extractor::Extractor;
    pub use crate::template::PromptTemplate;

    // Messages
    pub use crate::core::{
        ChatFragment, ChatMessage, ChatRequest, ChatResponse, RequestSettings, Role,
    };

    // Client
    pub use crate::client::{ChatClient, ClientError, MockClient};

    // Output
    pub use crate::output::{
        ObjectSchema, OutputSchema, OutputShape, SchemaError, SequenceSchema, TextSchema,
    };

    // Streaming
    pub use crate::streaming::{
        ElementStream, GleanStreamExt, StreamError, StreamItem, StreamPhase,
    };
}

// ============================================================================
// Version Information
// ============================================================================

/// Returns the current version of glean-ai.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Returns version information as a tuple (major, minor, patch).
pub fn version_tuple() -> (u32, u32, u32) {
    let version = version();
    let parts: Vec<&str> = version.split('.').collect();
    (
        parts.first().and_then(|s| s.parse().ok()).unwrap_or(0),
        parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(0),
        parts.get(2).and_then(|s| s.parse().ok()).unwrap_or(0),
    )
}
