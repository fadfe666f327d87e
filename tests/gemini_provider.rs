//! HTTP contract tests for the Gemini embedding provider, against a mock
//! server.

use httpmock::prelude::*;
use serde_json::json;

use chunksmith::config::EmbeddingConfig;
use chunksmith::embeddings::{EmbeddingProvider, GeminiEmbeddingProvider};
use chunksmith::types::ChunksmithError;

fn provider_for(server: &MockServer) -> GeminiEmbeddingProvider {
    let config = EmbeddingConfig::new("gemini-embedding-001", "test-key")
        .with_base_url(server.base_url());
    GeminiEmbeddingProvider::new(config).unwrap()
}

#[tokio::test]
async fn embeds_text_through_the_rest_endpoint() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/models/gemini-embedding-001:embedContent")
                .header("x-goog-api-key", "test-key")
                .json_body_partial(r#"{"content": {"parts": [{"text": "hello world"}]}}"#);
            then.status(200)
                .json_body(json!({ "embedding": { "values": [0.1, 0.2, 0.3] } }));
        })
        .await;

    let provider = provider_for(&server);
    let values = provider.embed("hello world").await.unwrap();

    assert_eq!(values, vec![0.1, 0.2, 0.3]);
    assert_eq!(provider.model_name(), "gemini-embedding-001");
    mock.assert_async().await;
}

#[tokio::test]
async fn server_error_is_an_embedding_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains(":embedContent");
            then.status(500).body("internal error");
        })
        .await;

    let err = provider_for(&server).embed("text").await.unwrap_err();
    assert!(matches!(err, ChunksmithError::Embedding(_)));
}

#[tokio::test]
async fn missing_embedding_in_response_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains(":embedContent");
            then.status(200).json_body(json!({}));
        })
        .await;

    let err = provider_for(&server).embed("text").await.unwrap_err();
    assert!(matches!(err, ChunksmithError::Embedding(_)));
}

#[tokio::test]
async fn empty_vector_in_response_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains(":embedContent");
            then.status(200)
                .json_body(json!({ "embedding": { "values": [] } }));
        })
        .await;

    let err = provider_for(&server).embed("text").await.unwrap_err();
    assert!(matches!(err, ChunksmithError::Embedding(_)));
}

#[tokio::test]
async fn non_numeric_vector_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path_contains(":embedContent");
            then.status(200)
                .json_body(json!({ "embedding": { "values": ["a", "b"] } }));
        })
        .await;

    let err = provider_for(&server).embed("text").await.unwrap_err();
    assert!(matches!(err, ChunksmithError::Embedding(_)));
}
