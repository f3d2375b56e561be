//! Structured output handling for glean-ai.
//!
//! Language models return prose. This crate turns that prose into typed
//! values in three tolerant steps, each driven by the schema's
//! [`OutputShape`]:
//!
//! 1. **Extraction** ([`extract_fenced_block`]) narrows the response to the
//!    first fenced code block, since models habitually wrap payloads in
//!    Markdown fences surrounded by commentary.
//! 2. **Parsing** ([`parse_tolerant`]) decodes the window as JSON (repairing
//!    truncation), then as YAML, and otherwise keeps the raw text. It never
//!    fails; an undecodable window simply reaches validation as a string.
//! 3. **Validation** ([`OutputSchema`]) is the single gatekeeper. The
//!    [`validated`] and [`validated_element`] adapters reduce its verdict to
//!    presence or absence.
//!
//! Text-shaped schemas skip steps 1 and 2 entirely, so free-form prose is
//! never mangled by structure-oriented cleanup.
//!
//! # Examples
//!
//! ```
//! use glean_ai_output::{extract_fenced_block, parse_tolerant, ObjectSchema, validated};
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize)]
//! struct Verdict {
//!     score: u8,
//! }
//!
//! let response = "Here is the verdict:\n```json\n{\"score\": 9}\n```\nHope it helps!";
//! let window = extract_fenced_block(response);
//! let candidate = parse_tolerant(window);
//!
//! let schema = ObjectSchema::<Verdict>::new();
//! let verdict = validated(&schema, &candidate).unwrap();
//! assert_eq!(verdict.score, 9);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod error;
pub mod extract;
pub mod parser;
pub mod schema;
pub mod shape;
pub mod structured;
pub mod text;
pub mod validator;

pub use error::{SchemaError, SchemaResult};
pub use extract::extract_fenced_block;
pub use parser::{parse_partial_json, parse_tolerant};
pub use schema::OutputSchema;
pub use shape::{OutputShape, ShapePolicy};
pub use structured::{ObjectSchema, SequenceSchema};
pub use text::TextSchema;
pub use validator::{validated, validated_element};

/// Prelude for common imports.
pub mod prelude {
    pub use crate::error::{SchemaError, SchemaResult};
    pub use crate::extract::extract_fenced_block;
    pub use crate::parser::parse_tolerant;
    pub use crate::schema::OutputSchema;
    pub use crate::shape::{OutputShape, ShapePolicy};
    pub use crate::structured::{ObjectSchema, SequenceSchema};
    pub use crate::text::TextSchema;
    pub use crate::validator::{validated, validated_element};
}
