//! Schema shapes and the pipeline policy they imply.
//!
//! Every schema reports one of three shapes. The shape is a closed set and
//! is queried exactly once per run or stream; nothing downstream inspects
//! schema internals again after that.

use serde::{Deserialize, Serialize};

/// The shape of the value a schema expects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputShape {
    /// Free-form text, taken verbatim from the response.
    #[default]
    Text,
    /// A single structured object.
    Object,
    /// An ordered collection of elements.
    Sequence,
}

impl OutputShape {
    /// The pipeline policy for this shape.
    #[must_use]
    pub const fn policy(self) -> ShapePolicy {
        match self {
            OutputShape::Text => ShapePolicy {
                apply_extraction: false,
                apply_parsing: false,
            },
            OutputShape::Object | OutputShape::Sequence => ShapePolicy {
                apply_extraction: true,
                apply_parsing: true,
            },
        }
    }

    /// Whether this shape yields validated elements while streaming.
    ///
    /// Only sequences do. Text streams raw deltas instead, and objects
    /// produce nothing until the batch path validates the whole value.
    #[must_use]
    pub const fn streams_elements(self) -> bool {
        matches!(self, OutputShape::Sequence)
    }
}

impl std::fmt::Display for OutputShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputShape::Text => write!(f, "text"),
            OutputShape::Object => write!(f, "object"),
            OutputShape::Sequence => write!(f, "sequence"),
        }
    }
}

/// What the pipeline does to response content before validation.
///
/// Computed once from the schema shape. Both fields are false for text
/// schemas: the caller asked for prose, so the content is passed through
/// verbatim rather than mined for a structured payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapePolicy {
    /// Whether to isolate a fenced block before parsing.
    pub apply_extraction: bool,
    /// Whether to decode the window into a structured candidate.
    pub apply_parsing: bool,
}
