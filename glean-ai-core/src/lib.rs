//! # glean-ai-core
//!
//! Core chat types for the glean-ai workspace.
//!
//! This crate provides the data model shared by every other glean-ai crate:
//!
//! - **Messages**: chat roles, request payloads, complete responses, and
//!   streamed fragments
//! - **Settings**: generation parameters attached to a request
//!
//! A complete response may carry no textual content at all, and a streamed
//! fragment may carry no delta; both states are modeled as `None` and kept
//! distinct from the empty string throughout the workspace.
//!
//! ## Example
//!
//! ```rust
//! use glean_ai_core::{ChatRequest, ChatResponse, RequestSettings};
//!
//! let mut request = ChatRequest::new("test-model");
//! request.add_system_prompt("You extract structured data.");
//! request.add_user_prompt("List three colors.");
//!
//! let request = request.with_settings(RequestSettings::new().temperature(0.2));
//! assert_eq!(request.messages.len(), 2);
//!
//! let response = ChatResponse::text("[\"red\", \"green\", \"blue\"]");
//! assert!(response.content().is_some());
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod messages;
pub mod settings;

// Re-exports for convenience
pub use messages::{ChatFragment, ChatMessage, ChatRequest, ChatResponse, Role};
pub use settings::RequestSettings;

/// Prelude module for common imports.
///
/// ```rust
/// use glean_ai_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::messages::{ChatFragment, ChatMessage, ChatRequest, ChatResponse, Role};
    pub use crate::settings::RequestSettings;
}
