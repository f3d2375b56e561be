//! Reduces schema outcomes to presence or absence.
//!
//! Callers of the extraction pipeline see `Option`, not schema errors: a
//! candidate that fails validation becomes `None` (or a skipped element)
//! and the rejection is recorded at debug level. There is no retry and no
//! coercion here.

use serde_json::Value;
use tracing::debug;

use crate::schema::OutputSchema;

/// Validates a whole candidate, turning rejection into `None`.
pub fn validated<S: OutputSchema>(schema: &S, candidate: &Value) -> Option<S::Output> {
    match schema.validate(candidate) {
        Ok(output) => Some(output),
        Err(error) => {
            debug!(%error, "candidate rejected by schema");
            None
        }
    }
}

/// Validates one sequence element, turning rejection into `None`.
///
/// `index` is the element's position in the candidate collection; it only
/// feeds the debug log.
pub fn validated_element<S: OutputSchema>(
    schema: &S,
    element: &Value,
    index: usize,
) -> Option<S::Element> {
    match schema.validate_element(element) {
        Ok(element) => Some(element),
        Err(error) => {
            debug!(index, %error, "element rejected by schema");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::structured::SequenceSchema;
    use crate::text::TextSchema;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_valid_candidate_comes_back_some() {
        let schema = TextSchema::new();
        let out = validated(&schema, &Value::String("fine".into()));
        assert_eq!(out, Some("fine".to_owned()));
    }

    #[test]
    fn test_rejected_candidate_comes_back_none() {
        let schema = TextSchema::new().with_min_length(10);
        assert_eq!(validated(&schema, &Value::String("nope".into())), None);
    }

    #[test]
    fn test_elements_validate_independently() {
        let schema = SequenceSchema::<i64>::new();
        assert_eq!(validated_element(&schema, &json!(7), 0), Some(7));
        assert_eq!(validated_element(&schema, &json!("x"), 1), None);
        assert_eq!(validated_element(&schema, &json!(9), 2), Some(9));
    }
}
