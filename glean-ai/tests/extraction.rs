//! End-to-end extraction tests over the mock client.
//!
//! These exercise the full pipeline: template rendering, request assembly,
//! the shape policy, extraction, tolerant parsing, validation, and the
//! streaming state machine, with `MockClient` standing in for a provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures::StreamExt;
use glean_ai::prelude::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde::Deserialize;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn sequence_extractor(client: MockClient) -> Extractor<String, SequenceSchema<i64>> {
    Extractor::builder()
        .client(client)
        .model("test-model")
        .schema(SequenceSchema::<i64>::new())
        .build()
        .unwrap()
}

#[derive(Debug, Deserialize, PartialEq)]
struct Person {
    name: String,
    age: u32,
}

#[tokio::test]
async fn test_batch_returns_the_full_sequence() {
    init_tracing();
    let client =
        MockClient::new().with_text_response("Here you go:\n```json\n[1,2,3]\n```");
    let extractor = sequence_extractor(client);

    let out = extractor.run(&"three numbers".to_string()).await.unwrap();
    assert_eq!(out, Some(vec![1, 2, 3]));
}

#[tokio::test]
async fn test_stream_agrees_with_batch_over_the_same_text() {
    init_tracing();
    // The same content, once as fragments and once complete.
    let streaming_client = MockClient::new().with_fragments([
        "Here",
        " you go:\n```json\n[1,",
        "2,3]\n```",
    ]);
    let batch_client =
        MockClient::new().with_text_response("Here you go:\n```json\n[1,2,3]\n```");

    let streamed: Vec<i64> = sequence_extractor(streaming_client)
        .stream(&"three numbers".to_string())
        .await
        .unwrap()
        .elements()
        .map(Result::unwrap)
        .collect()
        .await;

    let batched = sequence_extractor(batch_client)
        .run(&"three numbers".to_string())
        .await
        .unwrap();

    assert_eq!(streamed, vec![1, 2, 3]);
    assert_eq!(batched, Some(streamed));
}

#[tokio::test]
async fn test_text_stream_passes_deltas_verbatim() {
    init_tracing();
    let client = MockClient::new().with_fragments(["Bonjour", " le monde"]);
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .build()
        .unwrap();

    let deltas: Vec<String> = extractor
        .stream(&"greet".to_string())
        .await
        .unwrap()
        .text_deltas()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(deltas, vec!["Bonjour", " le monde"]);
}

#[rstest]
#[case::prose("I could not produce structured data today.")]
#[case::apology("Sorry, the request confused me.")]
#[tokio::test]
async fn test_unstructured_content_with_object_schema_is_absent(#[case] content: &str) {
    init_tracing();
    let client = MockClient::new().with_text_response(content);
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .schema(ObjectSchema::<Person>::new())
        .build()
        .unwrap();

    let out = extractor.run(&"a person".to_string()).await.unwrap();
    assert_eq!(out, None);
}

#[tokio::test]
async fn test_missing_content_is_absent() {
    init_tracing();
    let client = MockClient::new().with_empty_response();
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .schema(ObjectSchema::<Person>::new())
        .build()
        .unwrap();

    let out = extractor.run(&"a person".to_string()).await.unwrap();
    assert_eq!(out, None);
}

#[tokio::test]
async fn test_emitted_elements_arrive_in_order_exactly_once() {
    init_tracing();
    let client = MockClient::new().with_fragments([
        "```json\n[10",
        ", 20, 3",
        "0, 40]\n```",
    ]);

    let out: Vec<i64> = sequence_extractor(client)
        .stream(&"numbers".to_string())
        .await
        .unwrap()
        .elements()
        .map(Result::unwrap)
        .collect()
        .await;

    assert_eq!(out, vec![10, 20, 30, 40]);
}

#[tokio::test]
async fn test_invalid_elements_are_skipped_without_failing_the_stream() {
    init_tracing();
    let client =
        MockClient::new().with_fragments(["```json\n[1, \"two\", 3]\n```"]);

    let items: Vec<Result<i64, StreamError>> = sequence_extractor(client)
        .stream(&"numbers".to_string())
        .await
        .unwrap()
        .elements()
        .collect()
        .await;

    // Rejection is a skip, never an Err item.
    let out: Vec<i64> = items.into_iter().map(Result::unwrap).collect();
    assert_eq!(out, vec![1, 3]);
}

#[tokio::test]
async fn test_collection_bounds_reject_at_batch_but_not_while_streaming() {
    init_tracing();
    let schema = || SequenceSchema::<i64>::new().with_min_items(5);
    let content = "```json\n[1, 2, 3]\n```";

    let batch = Extractor::builder()
        .client(MockClient::new().with_text_response(content))
        .model("test-model")
        .schema(schema())
        .build()
        .unwrap();
    assert_eq!(batch.run(&"numbers".to_string()).await.unwrap(), None);

    let streaming = Extractor::builder()
        .client(MockClient::new().with_fragments([content]))
        .model("test-model")
        .schema(schema())
        .build()
        .unwrap();
    let out: Vec<i64> = streaming
        .stream(&"numbers".to_string())
        .await
        .unwrap()
        .elements()
        .map(Result::unwrap)
        .collect()
        .await;

    // Elements already shown are never taken back over a count shortfall.
    assert_eq!(out, vec![1, 2, 3]);
}

#[tokio::test]
async fn test_builder_fails_before_any_request_goes_out() {
    init_tracing();
    let client = MockClient::new();
    let result = Extractor::builder().client(client.clone()).build();

    assert!(matches!(result, Err(ExtractError::Configuration(_))));
    assert!(client.recorded_requests().is_empty());
}

#[tokio::test]
async fn test_stream_setup_failure_is_returned_before_any_item() {
    init_tracing();
    // No fragment script queued, so opening the stream fails outright.
    let client = MockClient::new();
    let extractor = sequence_extractor(client.clone());

    let result = extractor.stream(&"three numbers".to_string()).await;
    assert!(matches!(result, Err(ExtractError::Client(_))));
    assert_eq!(client.recorded_requests().len(), 1);
}

#[tokio::test]
async fn test_system_prompt_precedes_the_rendered_user_prompt() {
    init_tracing();
    let client = MockClient::new().with_text_response("ok");
    let extractor = Extractor::builder()
        .client(client.clone())
        .model("test-model")
        .system_prompt("Answer tersely.")
        .template(|args: &String| format!("Q: {args}"))
        .build()
        .unwrap();

    extractor.run(&"hello".to_string()).await.unwrap();

    let requests = client.recorded_requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages[0].role, Role::System);
    assert_eq!(requests[0].messages[0].content, "Answer tersely.");
    assert_eq!(requests[0].messages[1].role, Role::User);
    assert_eq!(requests[0].messages[1].content, "Q: hello");
}

#[tokio::test]
async fn test_template_renders_exactly_once_per_run() {
    init_tracing();
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);

    let client = MockClient::new().with_text_response("ok");
    let extractor = Extractor::builder()
        .client(client.clone())
        .model("test-model")
        .template(move |args: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            format!("Q: {args}")
        })
        .build()
        .unwrap();

    extractor.run(&"hello".to_string()).await.unwrap();

    assert_eq!(renders.load(Ordering::SeqCst), 1);
    assert_eq!(client.recorded_requests()[0].messages[0].content, "Q: hello");
}

#[tokio::test]
async fn test_template_renders_exactly_once_per_stream() {
    init_tracing();
    let renders = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&renders);

    let client = MockClient::new().with_fragments(["irrelevant"]);
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .template(move |args: &String| {
            counter.fetch_add(1, Ordering::SeqCst);
            args.clone()
        })
        .build()
        .unwrap();

    let stream = extractor.stream(&"hello".to_string()).await.unwrap();
    let _items: Vec<_> = stream.collect().await;

    assert_eq!(renders.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_mid_stream_client_error_surfaces_once_then_the_stream_ends() {
    init_tracing();
    let client = MockClient::new().with_fragment_script(vec![
        Ok(ChatFragment::delta("```json\n[1, 2,")),
        Err(ClientError::connection("connection reset")),
    ]);

    let items: Vec<Result<i64, StreamError>> = sequence_extractor(client)
        .stream(&"numbers".to_string())
        .await
        .unwrap()
        .elements()
        .collect()
        .await;

    assert_eq!(items.len(), 2);
    assert_eq!(*items[0].as_ref().unwrap(), 1);
    assert!(matches!(items[1], Err(StreamError::Client(_))));
}

#[tokio::test]
async fn test_yaml_payloads_validate_like_json() {
    init_tracing();
    let client =
        MockClient::new().with_text_response("```yaml\nname: Ada\nage: 36\n```");
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .schema(ObjectSchema::<Person>::new())
        .build()
        .unwrap();

    let out = extractor.run(&"a person".to_string()).await.unwrap();
    assert_eq!(
        out,
        Some(Person {
            name: "Ada".into(),
            age: 36
        })
    );
}

#[tokio::test]
async fn test_truncated_unfenced_tail_still_validates() {
    init_tracing();
    // One fence delimiter, then a response cut off mid-object.
    let client =
        MockClient::new().with_text_response("```json\n{\"name\": \"Ada\", \"age\": 36");
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .schema(ObjectSchema::<Person>::new())
        .build()
        .unwrap();

    let out = extractor.run(&"a person".to_string()).await.unwrap();
    assert_eq!(
        out,
        Some(Person {
            name: "Ada".into(),
            age: 36
        })
    );
}

#[tokio::test]
async fn test_object_streams_yield_no_items() {
    init_tracing();
    let client = MockClient::new()
        .with_fragments(["```json\n{\"name\": \"Ada\",", " \"age\": 36}\n```"]);
    let extractor = Extractor::builder()
        .client(client)
        .model("test-model")
        .schema(ObjectSchema::<Person>::new())
        .build()
        .unwrap();

    let items: Vec<_> = extractor
        .stream(&"a person".to_string())
        .await
        .unwrap()
        .collect()
        .await;

    assert!(items.is_empty());
}
