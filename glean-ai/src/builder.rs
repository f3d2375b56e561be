//! Extractor builder.
//!
//! The builder provides a fluent interface for configuring extractors. The
//! schema and template setters change the builder's type parameters, so the
//! finished `Extractor<A, S>` knows its argument and output types statically.

use std::sync::Arc;

use glean_ai_client::{BoxedClient, ChatClient};
use glean_ai_core::RequestSettings;
use glean_ai_output::{OutputSchema, TextSchema};

use crate::errors::ExtractError;
use crate::extractor::Extractor;
use crate::template::PromptTemplate;

/// Builder for [`Extractor`].
///
/// Starts with the text schema and an identity template over `String` args;
/// [`schema`](ExtractorBuilder::schema) and
/// [`template`](ExtractorBuilder::template) swap those out. A client and a
/// model name are mandatory: [`build`](ExtractorBuilder::build) fails with
/// [`ExtractError::Configuration`] when either is missing, before anything
/// touches the network.
pub struct ExtractorBuilder<A = String, S = TextSchema> {
    client: Option<BoxedClient>,
    model: Option<String>,
    system_prompt: Option<String>,
    settings: RequestSettings,
    template: Box<dyn PromptTemplate<A>>,
    schema: S,
}

impl ExtractorBuilder<String, TextSchema> {
    /// Create a builder with the default schema and template.
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            model: None,
            system_prompt: None,
            settings: RequestSettings::default(),
            template: Box::new(|args: &String| args.clone()),
            schema: TextSchema::new(),
        }
    }
}

impl Default for ExtractorBuilder<String, TextSchema> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, S> ExtractorBuilder<A, S> {
    /// Set the chat client.
    #[must_use]
    pub fn client<C: ChatClient + 'static>(mut self, client: C) -> Self {
        self.client = Some(Arc::new(client));
        self
    }

    /// Designate the model requests go to.
    #[must_use]
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a static system prompt, prepended to every request.
    #[must_use]
    pub fn system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    /// Set the request settings wholesale.
    #[must_use]
    pub fn settings(mut self, settings: RequestSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Set the sampling temperature.
    #[must_use]
    pub fn temperature(mut self, temp: f64) -> Self {
        self.settings = self.settings.temperature(temp);
        self
    }

    /// Set the response token budget.
    #[must_use]
    pub fn max_tokens(mut self, tokens: u64) -> Self {
        self.settings = self.settings.max_tokens(tokens);
        self
    }

    /// Replace the prompt template, possibly changing the argument type.
    #[must_use]
    pub fn template<A2>(
        self,
        template: impl PromptTemplate<A2> + 'static,
    ) -> ExtractorBuilder<A2, S> {
        ExtractorBuilder {
            client: self.client,
            model: self.model,
            system_prompt: self.system_prompt,
            settings: self.settings,
            template: Box::new(template),
            schema: self.schema,
        }
    }

    /// Replace the schema, changing the output type.
    #[must_use]
    pub fn schema<S2: OutputSchema>(self, schema: S2) -> ExtractorBuilder<A, S2> {
        ExtractorBuilder {
            client: self.client,
            model: self.model,
            system_prompt: self.system_prompt,
            settings: self.settings,
            template: self.template,
            schema,
        }
    }

    /// Build the extractor.
    ///
    /// This is the only place a configuration error can surface; once an
    /// extractor exists, its runs fail only on transport.
    pub fn build(self) -> Result<Extractor<A, S>, ExtractError>
    where
        S: OutputSchema,
    {
        let client = self
            .client
            .ok_or_else(|| ExtractError::config("no chat client configured"))?;
        let model = self
            .model
            .ok_or_else(|| ExtractError::config("no model designated"))?;
        if model.is_empty() {
            return Err(ExtractError::config("model name is empty"));
        }

        Ok(Extractor {
            client,
            model,
            system_prompt: self.system_prompt,
            settings: self.settings,
            template: self.template,
            schema: Arc::new(self.schema),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glean_ai_client::MockClient;
    use glean_ai_output::{OutputShape, SequenceSchema};

    #[test]
    fn test_build_without_a_client_is_a_configuration_error() {
        let err = ExtractorBuilder::new().model("test-model").build().unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("client"));
    }

    #[test]
    fn test_build_without_a_model_is_a_configuration_error() {
        let err = ExtractorBuilder::new()
            .client(MockClient::new())
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_empty_model_name_is_rejected() {
        let err = ExtractorBuilder::new()
            .client(MockClient::new())
            .model("")
            .build()
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_schema_setter_changes_the_output_type() {
        let extractor = ExtractorBuilder::new()
            .client(MockClient::new())
            .model("test-model")
            .schema(SequenceSchema::<i64>::new())
            .build()
            .unwrap();
        assert_eq!(extractor.shape(), OutputShape::Sequence);
    }

    #[test]
    fn test_template_setter_changes_the_argument_type() {
        let _extractor = ExtractorBuilder::new()
            .client(MockClient::new())
            .model("test-model")
            .template(|count: &u32| format!("give me {count} items"))
            .build()
            .unwrap();
    }
}
