//! Schemas for structured output: single objects and sequences.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::SchemaError;
use crate::schema::OutputSchema;
use crate::shape::OutputShape;

/// Deserializes the candidate into a single value of type `T`.
///
/// # Examples
///
/// ```
/// use glean_ai_output::{ObjectSchema, OutputSchema};
/// use serde::Deserialize;
/// use serde_json::json;
///
/// #[derive(Debug, Deserialize, PartialEq)]
/// struct City {
///     name: String,
///     population: u64,
/// }
///
/// let schema = ObjectSchema::<City>::new();
/// let city = schema
///     .validate(&json!({"name": "Osaka", "population": 2_750_000}))
///     .unwrap();
/// assert_eq!(city.name, "Osaka");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema<T> {
    marker: PhantomData<fn() -> T>,
}

impl<T> ObjectSchema<T> {
    /// Creates a schema for `T`.
    pub fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }
}

impl<T> OutputSchema for ObjectSchema<T>
where
    T: DeserializeOwned + Send,
{
    type Output = T;
    type Element = T;

    fn shape(&self) -> OutputShape {
        OutputShape::Object
    }

    fn validate(&self, candidate: &Value) -> Result<T, SchemaError> {
        T::deserialize(candidate).map_err(SchemaError::from)
    }
}

/// Deserializes the candidate into a `Vec<E>`, one element at a time.
///
/// Item count bounds apply only when validating the whole collection.
/// Element validation through [`OutputSchema::validate_element`] checks a
/// single element in isolation, so a stream never has to take back an
/// element it already produced just because the final count came up short.
#[derive(Debug, Clone, Default)]
pub struct SequenceSchema<E> {
    min_items: Option<usize>,
    max_items: Option<usize>,
    marker: PhantomData<fn() -> E>,
}

impl<E> SequenceSchema<E> {
    /// Creates a schema for a sequence of `E`.
    pub fn new() -> Self {
        Self {
            min_items: None,
            max_items: None,
            marker: PhantomData,
        }
    }

    /// Requires at least `min` items in the full collection.
    #[must_use]
    pub fn with_min_items(mut self, min: usize) -> Self {
        self.min_items = Some(min);
        self
    }

    /// Requires at most `max` items in the full collection.
    #[must_use]
    pub fn with_max_items(mut self, max: usize) -> Self {
        self.max_items = Some(max);
        self
    }

    /// Requires exactly `count` items in the full collection.
    #[must_use]
    pub fn with_exact_items(mut self, count: usize) -> Self {
        self.min_items = Some(count);
        self.max_items = Some(count);
        self
    }
}

impl<E> OutputSchema for SequenceSchema<E>
where
    E: DeserializeOwned + Send,
{
    type Output = Vec<E>;
    type Element = E;

    fn shape(&self) -> OutputShape {
        OutputShape::Sequence
    }

    fn validate(&self, candidate: &Value) -> Result<Vec<E>, SchemaError> {
        let items = candidate
            .as_array()
            .ok_or_else(|| SchemaError::type_mismatch("array", candidate))?;

        if let Some(min) = self.min_items {
            if items.len() < min {
                return Err(SchemaError::TooFewItems {
                    count: items.len(),
                    min,
                });
            }
        }
        if let Some(max) = self.max_items {
            if items.len() > max {
                return Err(SchemaError::TooManyItems {
                    count: items.len(),
                    max,
                });
            }
        }

        items
            .iter()
            .map(|item| E::deserialize(item).map_err(SchemaError::from))
            .collect()
    }

    fn validate_element(&self, element: &Value) -> Result<E, SchemaError> {
        E::deserialize(element).map_err(SchemaError::from)
    }
}
