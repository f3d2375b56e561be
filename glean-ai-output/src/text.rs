//! Plain text schema with optional constraints.

use regex::Regex;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::OutputSchema;
use crate::shape::OutputShape;

/// Accepts free-form text, optionally constrained.
///
/// Text output skips extraction and parsing entirely (see
/// [`ShapePolicy`](crate::ShapePolicy)); the response body reaches
/// validation verbatim.
///
/// # Examples
///
/// ```
/// use glean_ai_output::TextSchema;
///
/// let schema = TextSchema::new()
///     .trim()
///     .with_min_length(1)
///     .with_max_length(280);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TextSchema {
    pattern: Option<Regex>,
    pattern_str: Option<String>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    trim_whitespace: bool,
}

impl TextSchema {
    /// Creates an unconstrained text schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the text to match a regular expression.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        self.pattern = Some(Regex::new(&pattern)?);
        self.pattern_str = Some(pattern);
        Ok(self)
    }

    /// Requires at least `min` characters.
    #[must_use]
    pub fn with_min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    /// Requires at most `max` characters.
    #[must_use]
    pub fn with_max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    /// Trims surrounding whitespace before the other checks run.
    #[must_use]
    pub fn trim(mut self) -> Self {
        self.trim_whitespace = true;
        self
    }

    fn check(&self, text: &str) -> Result<String, SchemaError> {
        let text = if self.trim_whitespace {
            text.trim()
        } else {
            text
        };

        let length = text.chars().count();
        if let Some(min) = self.min_length {
            if length < min {
                return Err(SchemaError::too_short(length, min));
            }
        }
        if let Some(max) = self.max_length {
            if length > max {
                return Err(SchemaError::too_long(length, max));
            }
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                return Err(SchemaError::PatternMismatch {
                    pattern: self.pattern_str.clone().unwrap_or_default(),
                });
            }
        }

        Ok(text.to_owned())
    }
}

impl OutputSchema for TextSchema {
    type Output = String;
    type Element = String;

    fn shape(&self) -> OutputShape {
        OutputShape::Text
    }

    fn validate(&self, candidate: &Value) -> Result<String, SchemaError> {
        let text = candidate
            .as_str()
            .ok_or_else(|| SchemaError::type_mismatch("string", candidate))?;
        self.check(text)
    }
}
