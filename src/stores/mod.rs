//! Chunk persistence.
//!
//! The core never owns stored state: it hands [`NewChunk`] records to a
//! [`ChunkStore`] and receives [`Chunk`]s back by value. The trait is the
//! whole storage contract — simple CRUD, no vector index; similarity
//! ranking happens in [`crate::retrieval`] over what
//! [`embedded_chunks`](ChunkStore::embedded_chunks) returns.
//!
//! ```text
//!                  ┌──────────────────┐
//!                  │ ChunkStore trait │
//!                  │   (async CRUD)   │
//!                  └────────┬─────────┘
//!                           │
//!                ┌──────────┴──────────┐
//!                ▼                     ▼
//!        ┌───────────────┐    ┌────────────────┐
//!        │    SQLite     │    │    Memory      │
//!        │ tokio-rusqlite│    │ (tests, demos) │
//!        └───────────────┘    └────────────────┘
//! ```

pub mod memory;
pub mod sqlite;

pub use memory::MemoryChunkStore;
pub use sqlite::SqliteChunkStore;

use async_trait::async_trait;

use crate::types::{Chunk, ChunksmithError, NewChunk, PendingChunk};

/// CRUD interface the core drives.
///
/// An embedding counts as *missing* when the column is NULL or holds an
/// empty vector; both states select the chunk for backfill. Implementations
/// assign ids monotonically in insertion order.
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// Persists freshly segmented chunks with no embedding. Returns the
    /// assigned ids in insertion order.
    async fn insert_chunks(&self, chunks: Vec<NewChunk>) -> Result<Vec<i64>, ChunksmithError>;

    /// Up to `limit` chunks whose embedding is missing, ascending id —
    /// oldest first, so repeated backfill runs process deterministically.
    async fn pending_embeddings(
        &self,
        limit: usize,
    ) -> Result<Vec<PendingChunk>, ChunksmithError>;

    /// Attaches an embedding to one chunk. Writing to an unknown id is a
    /// [`ChunksmithError::Store`].
    async fn set_embedding(&self, id: i64, embedding: &[f32]) -> Result<(), ChunksmithError>;

    /// Every chunk carrying a non-empty embedding, ascending id.
    async fn embedded_chunks(&self) -> Result<Vec<Chunk>, ChunksmithError>;

    /// Total number of stored chunks, embedded or not.
    async fn count(&self) -> Result<usize, ChunksmithError>;
}
