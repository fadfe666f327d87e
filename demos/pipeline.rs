//! End-to-end demo: segment a document both ways, persist the chunks,
//! backfill embeddings with the deterministic mock provider, and run a
//! query. Runs without any setup:
//!
//! ```bash
//! cargo run --example pipeline
//! ```
//!
//! Swap [`MockEmbeddingProvider`] for [`GeminiEmbeddingProvider`] with
//! `EmbeddingConfig::from_env()` to index against the real API.

use std::sync::Arc;

use chunksmith::backfill::BackfillCoordinator;
use chunksmith::embeddings::MockEmbeddingProvider;
use chunksmith::ingestion::index_document;
use chunksmith::search::SearchEngine;
use chunksmith::segmenter::SegmentParams;
use chunksmith::stores::MemoryChunkStore;

const DOCUMENT: &str = "\
    Retrieval-augmented generation grounds model answers in stored documents. \
    The first step is segmentation: long texts are cut into chunks small enough \
    to embed and retrieve individually. Fixed-size windows are the simplest \
    strategy and keep chunk lengths uniform. Sentence-aware packing follows \
    sentence boundaries instead, which keeps each chunk readable. \
    Every chunk is embedded into a vector space by an external model. \
    At query time the question is embedded the same way, and cosine similarity \
    ranks the stored chunks against it. The best-scoring chunks become the \
    context the generator reads.";

fn preview(text: &str, width: usize) -> String {
    let flat = text.replace('\n', " ");
    if flat.chars().count() <= width {
        return flat;
    }
    let cut: String = flat.chars().take(width).collect();
    format!("{cut}...")
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let store = Arc::new(MemoryChunkStore::new());
    let provider = Arc::new(MockEmbeddingProvider::new());

    let fixed = index_document(
        store.as_ref(),
        DOCUMENT,
        "rag_primer.txt",
        SegmentParams::FixedSize {
            chunk_size: 120,
            overlap: 20,
        },
    )
    .await?;
    println!("indexed {} fixed-size chunks", fixed.inserted());

    let sentence = index_document(
        store.as_ref(),
        DOCUMENT,
        "rag_primer.txt",
        SegmentParams::Sentence { max_chars: 120 },
    )
    .await?;
    println!("indexed {} sentence chunks", sentence.inserted());

    let coordinator = BackfillCoordinator::new(store.clone(), provider.clone());
    let report = coordinator.run(100).await?;
    println!(
        "backfilled {} embeddings ({} skipped)",
        report.updated, report.skipped
    );

    let engine = SearchEngine::new(store, provider);
    let query = "How are chunks ranked against a question?";
    let ranking = engine.search(query, 3).await?;

    println!("\ntop {} results for {query:?}:\n", ranking.len());
    for hit in ranking.hits() {
        println!(
            "id={} score={:.4} strategy={} {}",
            hit.chunk.id,
            hit.score,
            hit.chunk.strategy,
            preview(&hit.chunk.text, 80)
        );
    }
    if ranking.skipped() > 0 {
        println!("(skipped {} chunks with unusable embeddings)", ranking.skipped());
    }

    Ok(())
}
