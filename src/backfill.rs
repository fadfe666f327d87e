//! Embedding backfill over stored chunks.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::embeddings::{EmbeddingProvider, embed_validated};
use crate::stores::ChunkStore;
use crate::types::ChunksmithError;

/// Counters for one backfill run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Chunks that received an embedding.
    pub updated: usize,
    /// Chunks skipped because their text was empty or all-whitespace.
    pub skipped: usize,
}

/// A backfill run aborted partway through.
///
/// `updated` and `skipped` count the work completed before the failure, so
/// callers lose no accounting when a run fails fast.
#[derive(Debug, Error)]
#[error("backfill aborted after {updated} updated and {skipped} skipped: {source}")]
pub struct BackfillError {
    pub updated: usize,
    pub skipped: usize,
    #[source]
    pub source: ChunksmithError,
}

/// Attaches missing embeddings to already-stored chunks.
///
/// Selection is oldest-first (ascending id) and bounded by the per-run
/// `limit`. A provider failure or a store-write failure aborts the run
/// immediately — there is no per-chunk retry or skip, since a failing
/// provider (bad credentials, missing model) would fail for every chunk.
/// Running against a fully-embedded store is a no-op.
///
/// The selection-then-write sequence is not mutually excluded: two
/// concurrent runs can both pick up the same pending chunk. Callers
/// serialize runs or rely on the store's own concurrency control.
pub struct BackfillCoordinator {
    store: Arc<dyn ChunkStore>,
    provider: Arc<dyn EmbeddingProvider>,
}

impl BackfillCoordinator {
    pub fn new(store: Arc<dyn ChunkStore>, provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self { store, provider }
    }

    /// Processes up to `limit` chunks that lack an embedding.
    pub async fn run(&self, limit: usize) -> Result<BackfillReport, BackfillError> {
        let mut report = BackfillReport::default();

        let pending = self
            .store
            .pending_embeddings(limit)
            .await
            .map_err(|source| fail(report, source))?;
        info!(
            pending = pending.len(),
            model = self.provider.model_name(),
            "starting embedding backfill"
        );

        for chunk in pending {
            if chunk.text.trim().is_empty() {
                debug!(chunk_id = chunk.id, "skipping chunk with empty text");
                report.skipped += 1;
                continue;
            }

            let values = embed_validated(self.provider.as_ref(), &chunk.text)
                .await
                .map_err(|source| fail(report, with_chunk_id(chunk.id, source)))?;

            self.store
                .set_embedding(chunk.id, &values)
                .await
                .map_err(|source| fail(report, with_chunk_id(chunk.id, source)))?;

            debug!(chunk_id = chunk.id, dim = values.len(), "updated embedding");
            report.updated += 1;
        }

        info!(
            updated = report.updated,
            skipped = report.skipped,
            "backfill complete"
        );
        Ok(report)
    }
}

fn fail(report: BackfillReport, source: ChunksmithError) -> BackfillError {
    BackfillError {
        updated: report.updated,
        skipped: report.skipped,
        source,
    }
}

/// Prefixes the failing chunk's id onto the error message, keeping the kind.
fn with_chunk_id(id: i64, err: ChunksmithError) -> ChunksmithError {
    match err {
        ChunksmithError::Embedding(msg) => ChunksmithError::Embedding(format!("chunk {id}: {msg}")),
        ChunksmithError::Store(msg) => ChunksmithError::Store(format!("chunk {id}: {msg}")),
        other => other,
    }
}
