//! In-memory chunk store for tests and demos.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::ChunkStore;
use crate::types::{Chunk, ChunksmithError, NewChunk, PendingChunk};

/// Vec-backed store with monotonic ids. Insertion order is id order, so the
/// ascending-id contracts fall out of a plain scan.
#[derive(Clone, Default)]
pub struct MemoryChunkStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    chunks: Vec<Chunk>,
}

impl MemoryChunkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn missing(chunk: &Chunk) -> bool {
    chunk.embedding.as_ref().is_none_or(|e| e.is_empty())
}

#[async_trait]
impl ChunkStore for MemoryChunkStore {
    async fn insert_chunks(&self, chunks: Vec<NewChunk>) -> Result<Vec<i64>, ChunksmithError> {
        let mut inner = self.inner.lock().await;
        let mut ids = Vec::with_capacity(chunks.len());
        for chunk in chunks {
            inner.next_id += 1;
            let id = inner.next_id;
            inner.chunks.push(Chunk {
                id,
                text: chunk.text,
                source_filename: chunk.source_filename,
                strategy: chunk.strategy,
                embedding: None,
            });
            ids.push(id);
        }
        Ok(ids)
    }

    async fn pending_embeddings(
        &self,
        limit: usize,
    ) -> Result<Vec<PendingChunk>, ChunksmithError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .chunks
            .iter()
            .filter(|chunk| missing(chunk))
            .take(limit)
            .map(|chunk| PendingChunk {
                id: chunk.id,
                text: chunk.text.clone(),
            })
            .collect())
    }

    async fn set_embedding(&self, id: i64, embedding: &[f32]) -> Result<(), ChunksmithError> {
        let mut inner = self.inner.lock().await;
        let chunk = inner
            .chunks
            .iter_mut()
            .find(|chunk| chunk.id == id)
            .ok_or_else(|| ChunksmithError::Store(format!("no chunk with id {id}")))?;
        chunk.embedding = Some(embedding.to_vec());
        Ok(())
    }

    async fn embedded_chunks(&self) -> Result<Vec<Chunk>, ChunksmithError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .chunks
            .iter()
            .filter(|chunk| !missing(chunk))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<usize, ChunksmithError> {
        let inner = self.inner.lock().await;
        Ok(inner.chunks.len())
    }
}
