//! Generation settings attached to a chat request.

use serde::{Deserialize, Serialize};

/// Settings for model generation.
///
/// All fields are optional; unset fields are left to the model's defaults.
/// Request timeouts are deliberately not represented here: enforcing them is
/// the job of the network client behind the [`ChatClient`] seam, not of the
/// request payload.
///
/// [`ChatClient`]: https://docs.rs/glean-ai-client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestSettings {
    /// Maximum tokens to generate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u64>,

    /// Sampling temperature (0.0 to 2.0 typically).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Top-p (nucleus) sampling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f64>,

    /// Stop sequences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,

    /// Random seed for reproducibility.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl RequestSettings {
    /// Create new empty settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set max tokens.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.max_tokens = Some(tokens);
        self
    }

    /// Set temperature.
    #[must_use]
    pub fn temperature(mut self, temp: f64) -> Self {
        self.temperature = Some(temp);
        self
    }

    /// Set top-p.
    #[must_use]
    pub fn top_p(mut self, p: f64) -> Self {
        self.top_p = Some(p);
        self
    }

    /// Set stop sequences.
    #[must_use]
    pub fn stop(mut self, sequences: Vec<String>) -> Self {
        self.stop = Some(sequences);
        self
    }

    /// Add a stop sequence.
    #[must_use]
    pub fn add_stop(mut self, sequence: impl Into<String>) -> Self {
        self.stop.get_or_insert_with(Vec::new).push(sequence.into());
        self
    }

    /// Set seed.
    #[must_use]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check if all settings are None.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.max_tokens.is_none()
            && self.temperature.is_none()
            && self.top_p.is_none()
            && self.stop.is_none()
            && self.seed.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_new_is_empty() {
        let settings = RequestSettings::new();
        assert!(settings.is_empty());
    }

    #[test]
    fn test_settings_builder() {
        let settings = RequestSettings::new()
            .max_tokens(1000)
            .temperature(0.7)
            .top_p(0.9)
            .seed(42);

        assert_eq!(settings.max_tokens, Some(1000));
        assert_eq!(settings.temperature, Some(0.7));
        assert_eq!(settings.top_p, Some(0.9));
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.is_empty());
    }

    #[test]
    fn test_settings_add_stop() {
        let settings = RequestSettings::new().add_stop("\n\n").add_stop("END");

        assert_eq!(
            settings.stop,
            Some(vec!["\n\n".to_string(), "END".to_string()])
        );
    }

    #[test]
    fn test_serde_roundtrip() {
        let settings = RequestSettings::new().max_tokens(1000).temperature(0.7);

        let json = serde_json::to_string(&settings).unwrap();
        let parsed: RequestSettings = serde_json::from_str(&json).unwrap();

        assert_eq!(settings, parsed);
    }

    #[test]
    fn test_serde_skips_unset_fields() {
        let json = serde_json::to_string(&RequestSettings::new().seed(7)).unwrap();
        assert_eq!(json, r#"{"seed":7}"#);
    }
}
