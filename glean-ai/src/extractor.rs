//! The extraction orchestrator.
//!
//! An [`Extractor`] owns a chat client, a prompt template, and a schema,
//! and runs the full pipeline: render the prompt, send the request, narrow
//! the response to its payload, parse it tolerantly, and validate. The
//! schema's shape decides which of those steps actually apply.

use std::sync::Arc;

use glean_ai_client::{BoxedClient, FragmentStream};
use glean_ai_core::{ChatRequest, RequestSettings};
use glean_ai_output::{
    extract_fenced_block, parse_tolerant, validated, OutputSchema, OutputShape, TextSchema,
};
use glean_ai_streaming::ElementStream;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::builder::ExtractorBuilder;
use crate::errors::ExtractError;
use crate::template::PromptTemplate;

/// Extracts typed output from model responses.
///
/// # Type Parameters
///
/// - `A`: the argument type the prompt template renders from.
/// - `S`: the output schema.
///
/// # Examples
///
/// ```
/// use glean_ai::prelude::*;
///
/// #[tokio::main(flavor = "current_thread")]
/// async fn main() -> Result<(), ExtractError> {
///     let client = MockClient::new()
///         .with_text_response("Sure!\n```json\n{\"answer\": 42}\n```");
///
///     #[derive(serde::Deserialize)]
///     struct Reply {
///         answer: i64,
///     }
///
///     let extractor = Extractor::builder()
///         .client(client)
///         .model("test-model")
///         .schema(ObjectSchema::<Reply>::new())
///         .build()?;
///
///     let reply = extractor.run(&"What is the answer?".to_string()).await?;
///     assert_eq!(reply.unwrap().answer, 42);
///     Ok(())
/// }
/// ```
pub struct Extractor<A = String, S = TextSchema> {
    pub(crate) client: BoxedClient,
    pub(crate) model: String,
    pub(crate) system_prompt: Option<String>,
    pub(crate) settings: RequestSettings,
    pub(crate) template: Box<dyn PromptTemplate<A>>,
    pub(crate) schema: Arc<S>,
}

impl Extractor<String, TextSchema> {
    /// Start building an extractor.
    #[must_use]
    pub fn builder() -> ExtractorBuilder<String, TextSchema> {
        ExtractorBuilder::new()
    }
}

impl<A, S> Extractor<A, S>
where
    S: OutputSchema,
{
    /// The model requests are addressed to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// The schema's shape.
    pub fn shape(&self) -> OutputShape {
        self.schema.shape()
    }

    /// The schema driving validation.
    pub fn schema(&self) -> &S {
        &self.schema
    }

    /// Renders the template once and assembles the request.
    fn build_request(&self, args: &A) -> ChatRequest {
        let prompt = self.template.render(args);
        let mut request = ChatRequest::new(&self.model).with_settings(self.settings.clone());
        if let Some(system) = &self.system_prompt {
            request.add_system_prompt(system);
        }
        request.add_user_prompt(prompt);
        request
    }

    /// Run the batch pipeline once.
    ///
    /// Returns `Ok(None)` when the model sent no content, when the response
    /// could not be decoded into anything the schema accepts, or when the
    /// schema rejected the candidate. `Err` means the extractor could not
    /// even ask: transport failure. The shape policy is evaluated once per
    /// run; text-shaped schemas see the response body verbatim, with no
    /// extraction and no parsing.
    pub async fn run(&self, args: &A) -> Result<Option<S::Output>, ExtractError> {
        let run_id = Uuid::new_v4();
        let shape = self.schema.shape();
        let request = self.build_request(args);
        debug!(%run_id, model = %self.model, %shape, "sending extraction request");

        let response = self.client.send(&request).await?;
        let Some(content) = response.content() else {
            debug!(%run_id, "response carried no content");
            return Ok(None);
        };

        let policy = shape.policy();
        let window = if policy.apply_extraction {
            extract_fenced_block(content)
        } else {
            content
        };
        let candidate = if policy.apply_parsing {
            parse_tolerant(window)
        } else {
            Value::String(window.to_owned())
        };

        let output = validated(self.schema.as_ref(), &candidate);
        debug!(%run_id, produced = output.is_some(), "extraction run finished");
        Ok(output)
    }

    /// Open the streaming pipeline.
    ///
    /// The request is assembled exactly as in [`run`](Extractor::run), with
    /// the template rendered once up front. `Err` here means the stream
    /// could not be opened; once it is, transport failures arrive as `Err`
    /// items on the stream itself.
    pub async fn stream(
        &self,
        args: &A,
    ) -> Result<ElementStream<FragmentStream, S>, ExtractError> {
        let run_id = Uuid::new_v4();
        let request = self.build_request(args);
        debug!(%run_id, model = %self.model, shape = %self.schema.shape(), "opening extraction stream");

        let fragments = self.client.send_streaming(&request).await?;
        Ok(ElementStream::new(fragments, Arc::clone(&self.schema)))
    }
}

impl<A, S> std::fmt::Debug for Extractor<A, S>
where
    S: OutputSchema,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Extractor")
            .field("model", &self.model)
            .field("provider", &self.client.provider())
            .field("shape", &self.schema.shape())
            .field("settings", &self.settings)
            .finish()
    }
}
