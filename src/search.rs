//! End-to-end query pipeline: embed the query, fetch embedded chunks, rank.

use std::sync::Arc;

use tracing::debug;

use crate::embeddings::{EmbeddingProvider, embed_validated};
use crate::retrieval::{Ranking, rank};
use crate::stores::ChunkStore;
use crate::types::ChunksmithError;

/// Binds an embedding provider and a chunk store into a query interface.
///
/// The provider must be the same model that embedded the stored chunks;
/// vectors from different models are not comparable, and beyond a dimension
/// mismatch the core cannot detect the mixup.
pub struct SearchEngine {
    store: Arc<dyn ChunkStore>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl SearchEngine {
    pub fn new(store: Arc<dyn ChunkStore>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, provider }
    }

    /// Embeds `query` and ranks every embedded chunk against it.
    ///
    /// Read-only; safe to run concurrently with itself. Running concurrently
    /// with a backfill may observe a partially-embedded snapshot, which is
    /// acceptable.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Ranking, ChunksmithError> {
        if query.trim().is_empty() {
            return Err(ChunksmithError::InvalidArgument("query is empty".into()));
        }

        let query_vector = embed_validated(self.provider.as_ref(), query).await?;
        debug!(dim = query_vector.len(), "embedded query");

        let candidates = self.store.embedded_chunks().await?;
        debug!(candidates = candidates.len(), "fetched embedded chunks");

        rank(&query_vector, candidates, top_k)
    }
}
