//! The schema trait output types implement.

use serde_json::Value;

use crate::error::SchemaError;
use crate::shape::OutputShape;

/// A typed description of what a run should produce.
///
/// A schema does three things: it reports its [`OutputShape`] (queried once
/// per run or stream, never per fragment), it validates a complete
/// candidate value into `Output`, and, for sequences, it validates one
/// element at a time into `Element` while the collection is still growing.
///
/// Element validation deliberately knows nothing about the collection:
/// constraints that quantify over the whole sequence (such as item counts)
/// belong to [`validate`](OutputSchema::validate) alone, so they can never
/// retract an element a stream has already yielded.
pub trait OutputSchema: Send + Sync {
    /// The fully validated output type.
    type Output: Send;
    /// The element type yielded while streaming a sequence.
    type Element: Send;

    /// The shape of this schema.
    fn shape(&self) -> OutputShape;

    /// Validate a complete candidate value.
    fn validate(&self, candidate: &Value) -> Result<Self::Output, SchemaError>;

    /// Validate one element of a sequence candidate.
    ///
    /// Only meaningful for [`OutputShape::Sequence`] schemas; the default
    /// implementation rejects the call for every other shape.
    fn validate_element(&self, element: &Value) -> Result<Self::Element, SchemaError> {
        let _ = element;
        Err(SchemaError::elements_unsupported(self.shape()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Verbatim;

    impl OutputSchema for Verbatim {
        type Output = String;
        type Element = String;

        fn shape(&self) -> OutputShape {
            OutputShape::Text
        }

        fn validate(&self, candidate: &Value) -> Result<String, SchemaError> {
            candidate
                .as_str()
                .map(str::to_owned)
                .ok_or_else(|| SchemaError::type_mismatch("string", candidate))
        }
    }

    #[test]
    fn test_default_element_validation_rejects_non_sequences() {
        let schema = Verbatim;
        let err = schema
            .validate_element(&Value::String("x".into()))
            .unwrap_err();
        assert!(err.to_string().contains("text"));
    }
}
