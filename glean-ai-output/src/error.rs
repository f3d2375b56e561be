//! Schema validation error types.

use thiserror::Error;

use crate::shape::OutputShape;

/// Errors produced when a candidate value is checked against a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// The candidate has the wrong JSON type.
    #[error("expected {expected}, got {actual}")]
    TypeMismatch {
        /// What the schema expected.
        expected: &'static str,
        /// What the candidate actually was.
        actual: &'static str,
    },

    /// The candidate did not deserialize into the target type.
    #[error("deserialization failed: {0}")]
    Deserialize(#[from] serde_json::Error),

    /// Text shorter than the configured minimum.
    #[error("text too short: {length} chars, minimum is {min}")]
    TooShort {
        /// Actual length.
        length: usize,
        /// Required minimum.
        min: usize,
    },

    /// Text longer than the configured maximum.
    #[error("text too long: {length} chars, maximum is {max}")]
    TooLong {
        /// Actual length.
        length: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// Text did not match the configured pattern.
    #[error("text does not match pattern: {pattern}")]
    PatternMismatch {
        /// The pattern that failed.
        pattern: String,
    },

    /// Sequence with fewer items than the configured minimum.
    #[error("sequence has {count} items, minimum is {min}")]
    TooFewItems {
        /// Actual item count.
        count: usize,
        /// Required minimum.
        min: usize,
    },

    /// Sequence with more items than the configured maximum.
    #[error("sequence has {count} items, maximum is {max}")]
    TooManyItems {
        /// Actual item count.
        count: usize,
        /// Allowed maximum.
        max: usize,
    },

    /// Element validation requested on a schema that has no elements.
    #[error("{shape} output has no elements to validate")]
    ElementsUnsupported {
        /// The shape of the schema.
        shape: OutputShape,
    },
}

impl SchemaError {
    /// Create a type mismatch error.
    pub fn type_mismatch(expected: &'static str, actual: &serde_json::Value) -> Self {
        Self::TypeMismatch {
            expected,
            actual: value_kind(actual),
        }
    }

    /// Create a too-short error.
    pub fn too_short(length: usize, min: usize) -> Self {
        Self::TooShort { length, min }
    }

    /// Create a too-long error.
    pub fn too_long(length: usize, max: usize) -> Self {
        Self::TooLong { length, max }
    }

    /// Create an elements-unsupported error.
    pub fn elements_unsupported(shape: OutputShape) -> Self {
        Self::ElementsUnsupported { shape }
    }
}

/// Result type for schema validation.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// The JSON type name of a value, for error messages.
pub(crate) fn value_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
