//! Streaming support for glean-ai.
//!
//! A model streams text in arbitrary slices; this crate turns those slices
//! into typed items while the response is still arriving. The centerpiece
//! is [`ElementStream`], which buffers fragments and, for sequence-shaped
//! schemas, yields each element of the collection as soon as it can no
//! longer change. Text-shaped schemas get their deltas passed straight
//! through instead.
//!
//! The [`GleanStreamExt`] adapters narrow the mixed item stream to just
//! elements or just text.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//!
//! use futures::StreamExt;
//! use glean_ai_client::ClientError;
//! use glean_ai_core::ChatFragment;
//! use glean_ai_output::SequenceSchema;
//! use glean_ai_streaming::{ElementStream, GleanStreamExt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let fragments = futures::stream::iter(vec![
//!     Ok::<_, ClientError>(ChatFragment::delta("```json\n[\"alpha\",")),
//!     Ok(ChatFragment::delta(" \"beta\"]\n```")),
//! ]);
//!
//! let schema = Arc::new(SequenceSchema::<String>::new());
//! let mut elements = ElementStream::new(fragments, schema).elements();
//!
//! while let Some(element) = elements.next().await {
//!     println!("{}", element.unwrap());
//! }
//! # }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod adapters;
pub mod element_stream;
pub mod error;
pub mod item;

pub use adapters::{Elements, GleanStreamExt, TextDeltas};
pub use element_stream::{ElementStream, StreamPhase};
pub use error::{StreamError, StreamResult};
pub use item::StreamItem;

/// Prelude for common imports.
pub mod prelude {
    pub use crate::adapters::GleanStreamExt;
    pub use crate::element_stream::{ElementStream, StreamPhase};
    pub use crate::error::{StreamError, StreamResult};
    pub use crate::item::StreamItem;
}
