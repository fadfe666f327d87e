//! ```text
//! Extracted document text ──► segmenter (fixed-size | sentence-aware)
//!                                   │
//!                                   ▼
//!             ingestion::index_document ──► stores::ChunkStore
//!                                              (embedding = NULL)
//!                                   │
//!        backfill::BackfillCoordinator ◄──┘
//!                    │
//!                    ├─► embeddings::EmbeddingProvider (Gemini / mock)
//!                    └─► store write-back (embedding attached)
//!
//! Query text ──► search::SearchEngine ──► retrieval::rank ──► ScoredChunk
//! ```
//!
//! Chunksmith splits documents into retrievable chunks, persists them,
//! backfills embeddings through a provider, and answers queries by cosine
//! ranking over every embedded chunk. Retrieval is an exhaustive linear
//! scan; swapping in an approximate nearest-neighbor index behind
//! [`retrieval::rank`] is the extension point for larger corpora.

pub mod backfill;
pub mod config;
pub mod embeddings;
pub mod ingestion;
pub mod retrieval;
pub mod search;
pub mod segmenter;
pub mod stores;
pub mod types;
pub mod vector;

pub use retrieval::{Ranking, rank};
pub use segmenter::{SegmentParams, chunk_by_sentences, chunk_fixed_size};
pub use types::{Chunk, ChunksmithError, NewChunk, PendingChunk, ScoredChunk, SplitStrategy};
