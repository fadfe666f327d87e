//! Turning extracted document text into persisted chunk rows.
//!
//! File-format extraction (PDF, DOCX, …) happens upstream; this module
//! takes the already-extracted text, segments it under the requested
//! strategy, and hands the tagged rows to the store with no embedding yet.

use tracing::info;

use crate::segmenter::SegmentParams;
use crate::stores::ChunkStore;
use crate::types::{ChunksmithError, NewChunk, SplitStrategy};

/// Summary of one document indexing pass.
#[derive(Clone, Debug)]
pub struct IngestOutcome {
    ids: Vec<i64>,
    strategy: SplitStrategy,
}

impl IngestOutcome {
    /// Number of chunk rows inserted.
    #[must_use]
    pub fn inserted(&self) -> usize {
        self.ids.len()
    }

    /// Store-assigned ids, in insertion order.
    #[must_use]
    pub fn ids(&self) -> &[i64] {
        &self.ids
    }

    /// Strategy that produced the chunks.
    #[must_use]
    pub fn strategy(&self) -> SplitStrategy {
        self.strategy
    }
}

/// Segments `text` and persists the chunks, tagged with `filename` and the
/// strategy that produced them. Empty text simply inserts nothing.
pub async fn index_document(
    store: &dyn ChunkStore,
    text: &str,
    filename: &str,
    params: SegmentParams,
) -> Result<IngestOutcome, ChunksmithError> {
    let strategy = params.strategy();
    let records: Vec<NewChunk> = params
        .segment(text)?
        .into_iter()
        .map(|piece| NewChunk::new(piece, filename, strategy))
        .collect();

    let ids = store.insert_chunks(records).await?;
    info!(
        file = filename,
        strategy = %strategy,
        inserted = ids.len(),
        "indexed document"
    );
    Ok(IngestOutcome { ids, strategy })
}
