//! Core records shared across segmentation, backfill, and retrieval.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors produced by chunksmith operations.
///
/// Callers match on the variant rather than parsing messages:
/// [`InvalidArgument`](Self::InvalidArgument) for out-of-contract
/// parameters, [`Embedding`](Self::Embedding) for provider failures and
/// unusable responses, [`Store`](Self::Store) for persistence failures.
#[derive(Debug, Error)]
pub enum ChunksmithError {
    /// A caller-supplied parameter was out of contract (non-positive sizes,
    /// `overlap >= chunk_size`, zero `top_k`, empty query).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The embedding provider failed or returned an unusable response.
    #[error("embedding failed: {0}")]
    Embedding(String),

    /// The chunk store failed to read or write.
    #[error("store error: {0}")]
    Store(String),
}

impl From<tokio_rusqlite::Error> for ChunksmithError {
    fn from(err: tokio_rusqlite::Error) -> Self {
        ChunksmithError::Store(err.to_string())
    }
}

impl From<tokio_rusqlite::rusqlite::Error> for ChunksmithError {
    fn from(err: tokio_rusqlite::rusqlite::Error) -> Self {
        ChunksmithError::Store(err.to_string())
    }
}

impl From<reqwest::Error> for ChunksmithError {
    fn from(err: reqwest::Error) -> Self {
        ChunksmithError::Embedding(err.to_string())
    }
}

/// Segmentation strategy that produced a chunk.
///
/// The encoded form is what the store persists, so it must stay stable
/// across releases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Fixed-width character windows with overlap.
    FixedSize,
    /// Sentence-boundary packing up to a character budget.
    Sentence,
}

impl SplitStrategy {
    /// Stable string tag used in persisted rows.
    #[must_use]
    pub fn encode(&self) -> &'static str {
        match self {
            SplitStrategy::FixedSize => "fixed_size",
            SplitStrategy::Sentence => "sentence",
        }
    }

    /// Decodes a persisted tag. Returns `None` for unrecognized tags; the
    /// column is only ever written by this crate, so an unknown value means
    /// the row is corrupt.
    pub fn decode(s: &str) -> Option<Self> {
        match s {
            "fixed_size" => Some(SplitStrategy::FixedSize),
            "sentence" => Some(SplitStrategy::Sentence),
            _ => None,
        }
    }
}

impl fmt::Display for SplitStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.encode())
    }
}

/// A persisted chunk of document text.
///
/// `id` is assigned by the store, unique and monotonic by insertion order.
/// `embedding` is absent until the backfill coordinator attaches one; when
/// present it is non-empty and every component is finite.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: i64,
    pub text: String,
    pub source_filename: String,
    pub strategy: SplitStrategy,
    pub embedding: Option<Vec<f32>>,
}

/// A chunk ready for insertion, before the store assigns an id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewChunk {
    pub text: String,
    pub source_filename: String,
    pub strategy: SplitStrategy,
}

impl NewChunk {
    pub fn new(
        text: impl Into<String>,
        source_filename: impl Into<String>,
        strategy: SplitStrategy,
    ) -> Self {
        Self {
            text: text.into(),
            source_filename: source_filename.into(),
            strategy,
        }
    }
}

/// Selection row for the backfill pass: a chunk still missing its embedding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingChunk {
    pub id: i64,
    pub text: String,
}

/// A chunk paired with its similarity score, produced only during ranking.
#[derive(Clone, Debug)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    pub score: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strategy_tags_round_trip() {
        for strategy in [SplitStrategy::FixedSize, SplitStrategy::Sentence] {
            assert_eq!(SplitStrategy::decode(strategy.encode()), Some(strategy));
        }
    }

    #[test]
    fn unknown_strategy_tag_is_rejected() {
        assert_eq!(SplitStrategy::decode("paragraph"), None);
        assert_eq!(SplitStrategy::decode(""), None);
    }

    #[test]
    fn strategy_display_matches_persisted_tag() {
        assert_eq!(SplitStrategy::FixedSize.to_string(), "fixed_size");
        assert_eq!(SplitStrategy::Sentence.to_string(), "sentence");
    }
}
