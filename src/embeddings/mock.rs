//! Deterministic embedding provider for tests and demos.

use std::hash::{DefaultHasher, Hash, Hasher};

use async_trait::async_trait;

use super::EmbeddingProvider;
use crate::types::ChunksmithError;

/// Hash-derived embeddings: the same text always maps to the same vector,
/// different texts almost surely to different ones. No network, no model —
/// suitable for CI and offline demos, useless for semantic quality.
#[derive(Clone, Debug)]
pub struct MockEmbeddingProvider {
    dimension: usize,
}

impl MockEmbeddingProvider {
    pub const DEFAULT_DIMENSION: usize = 16;

    #[must_use]
    pub fn new() -> Self {
        Self {
            dimension: Self::DEFAULT_DIMENSION,
        }
    }

    /// Mock with a specific output dimension, for dimension-mismatch tests.
    #[must_use]
    pub fn with_dimension(dimension: usize) -> Self {
        Self { dimension }
    }
}

impl Default for MockEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChunksmithError> {
        let mut values = Vec::with_capacity(self.dimension);
        for component in 0..self.dimension {
            let mut hasher = DefaultHasher::new();
            text.hash(&mut hasher);
            component.hash(&mut hasher);
            // Map the hash onto [-1, 1).
            let unit = (hasher.finish() % 10_000) as f32 / 10_000.0;
            values.push(unit * 2.0 - 1.0);
        }
        Ok(values)
    }

    fn model_name(&self) -> &str {
        "mock-embedding"
    }
}
