//! Gemini `embedContent` client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::EmbeddingProvider;
use crate::config::EmbeddingConfig;
use crate::types::ChunksmithError;
use crate::vector;

/// Embedding provider backed by the Gemini REST API.
///
/// One `embedContent` call per text; the model name and endpoint come from
/// [`EmbeddingConfig`]. Responses are validated before they leave this
/// type: an empty or non-numeric vector is an
/// [`ChunksmithError::Embedding`], never a silently zeroed result.
#[derive(Clone)]
pub struct GeminiEmbeddingProvider {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
}

impl GeminiEmbeddingProvider {
    /// Builds a provider with its own HTTP client.
    pub fn new(config: EmbeddingConfig) -> Result<Self, ChunksmithError> {
        let client = Client::builder()
            .build()
            .map_err(|err| ChunksmithError::Embedding(err.to_string()))?;
        Ok(Self::with_client(client, config))
    }

    /// Builds a provider on an existing HTTP client (shared pools, tests).
    pub fn with_client(client: Client, config: EmbeddingConfig) -> Self {
        let endpoint = format!(
            "{}/models/{}:embedContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        Self {
            client,
            endpoint,
            api_key: config.api_key,
            model: config.model,
        }
    }
}

#[async_trait]
impl EmbeddingProvider for GeminiEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChunksmithError> {
        let request = EmbedContentRequest {
            content: Content {
                parts: vec![Part { text }],
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: EmbedContentResponse = response.json().await?;
        let values = body
            .embedding
            .map(|embedding| embedding.values)
            .unwrap_or_default();
        vector::validate_embedding(&values)?;

        debug!(model = %self.model, dim = values.len(), "embedded text");
        Ok(values)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct EmbedContentRequest<'a> {
    content: Content<'a>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct EmbedContentResponse {
    embedding: Option<ContentEmbedding>,
}

#[derive(Deserialize)]
struct ContentEmbedding {
    values: Vec<f32>,
}
