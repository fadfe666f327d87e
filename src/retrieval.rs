//! Cosine ranking over embedded chunks.

use tracing::debug;

use crate::types::{Chunk, ChunksmithError, ScoredChunk};
use crate::vector;

/// Outcome of ranking a candidate set: the top hits plus how many
/// candidates were excluded for carrying no usable embedding.
#[derive(Clone, Debug, Default)]
pub struct Ranking {
    hits: Vec<ScoredChunk>,
    skipped: usize,
}

impl Ranking {
    /// Ranked hits, best first.
    #[must_use]
    pub fn hits(&self) -> &[ScoredChunk] {
        &self.hits
    }

    /// Consumes the ranking and yields the hits.
    #[must_use]
    pub fn into_hits(self) -> Vec<ScoredChunk> {
        self.hits
    }

    /// Candidates excluded because their embedding was absent, empty, or
    /// not all-finite.
    #[must_use]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.hits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}

/// Scores `candidates` against `query` by cosine similarity and returns the
/// `top_k` best.
///
/// Candidates without a usable embedding are skipped, never an error — one
/// corrupt row must not block a whole query. A candidate whose embedding is
/// valid but dimension-mismatched against `query` scores
/// `f32::NEG_INFINITY` and sorts last. Ties keep input order (the sort is
/// stable). `top_k` must be positive.
///
/// This is an exhaustive O(n·d) scan, fine for corpora up to a few thousand
/// chunks; beyond that an approximate nearest-neighbor index belongs behind
/// this same contract.
pub fn rank(
    query: &[f32],
    candidates: Vec<Chunk>,
    top_k: usize,
) -> Result<Ranking, ChunksmithError> {
    if top_k == 0 {
        return Err(ChunksmithError::InvalidArgument(
            "top_k must be greater than zero".into(),
        ));
    }

    let mut hits = Vec::with_capacity(candidates.len());
    let mut skipped = 0usize;

    for chunk in candidates {
        let score = match chunk.embedding.as_deref() {
            Some(embedding) if vector::is_valid_embedding(embedding) => {
                vector::cosine_similarity(query, embedding)
            }
            _ => {
                skipped += 1;
                continue;
            }
        };
        hits.push(ScoredChunk { chunk, score });
    }

    hits.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    hits.truncate(top_k);

    debug!(returned = hits.len(), skipped, "ranked candidates");
    Ok(Ranking { hits, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SplitStrategy;

    fn chunk(id: i64, embedding: Option<Vec<f32>>) -> Chunk {
        Chunk {
            id,
            text: format!("chunk {id}"),
            source_filename: "doc.pdf".into(),
            strategy: SplitStrategy::FixedSize,
            embedding,
        }
    }

    #[test]
    fn ranks_by_descending_similarity() {
        let candidates = vec![
            chunk(1, Some(vec![1.0, 0.0])),
            chunk(2, Some(vec![0.0, 1.0])),
            chunk(3, Some(vec![-1.0, 0.0])),
        ];
        let ranking = rank(&[1.0, 0.0], candidates, 2).unwrap();

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.hits()[0].chunk.id, 1);
        assert!((ranking.hits()[0].score - 1.0).abs() < 1e-6);
        assert_eq!(ranking.hits()[1].chunk.id, 2);
        assert!(ranking.hits()[1].score.abs() < 1e-6);
    }

    #[test]
    fn unusable_embeddings_are_skipped_not_fatal() {
        let candidates = vec![
            chunk(1, None),
            chunk(2, Some(vec![])),
            chunk(3, Some(vec![0.5, f32::NAN])),
            chunk(4, Some(vec![1.0, 0.0])),
        ];
        let ranking = rank(&[1.0, 0.0], candidates, 10).unwrap();

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.hits()[0].chunk.id, 4);
        assert_eq!(ranking.skipped(), 3);
    }

    #[test]
    fn dimension_mismatch_scores_last_but_stays() {
        let candidates = vec![
            chunk(1, Some(vec![1.0, 0.0, 0.0])),
            chunk(2, Some(vec![0.9, 0.1])),
        ];
        let ranking = rank(&[1.0, 0.0], candidates, 10).unwrap();

        assert_eq!(ranking.len(), 2);
        assert_eq!(ranking.hits()[0].chunk.id, 2);
        assert_eq!(ranking.hits()[1].chunk.id, 1);
        assert_eq!(ranking.hits()[1].score, f32::NEG_INFINITY);
        assert_eq!(ranking.skipped(), 0);
    }

    #[test]
    fn ties_keep_input_order() {
        let shared = vec![0.6, 0.8];
        let candidates = vec![
            chunk(7, Some(shared.clone())),
            chunk(3, Some(shared.clone())),
            chunk(9, Some(shared)),
        ];
        let ranking = rank(&[0.6, 0.8], candidates, 3).unwrap();
        let ids: Vec<i64> = ranking.hits().iter().map(|hit| hit.chunk.id).collect();
        assert_eq!(ids, vec![7, 3, 9]);
    }

    #[test]
    fn returns_at_most_top_k_and_at_most_valid_count() {
        let candidates: Vec<Chunk> = (0..5)
            .map(|i| chunk(i, Some(vec![i as f32 + 1.0, 1.0])))
            .collect();
        assert_eq!(rank(&[1.0, 0.0], candidates.clone(), 3).unwrap().len(), 3);
        assert_eq!(rank(&[1.0, 0.0], candidates, 100).unwrap().len(), 5);
    }

    #[test]
    fn zero_top_k_is_rejected() {
        assert!(matches!(
            rank(&[1.0], Vec::new(), 0),
            Err(ChunksmithError::InvalidArgument(_))
        ));
    }

    #[test]
    fn empty_candidate_set_is_fine() {
        let ranking = rank(&[1.0, 0.0], Vec::new(), 5).unwrap();
        assert!(ranking.is_empty());
        assert_eq!(ranking.skipped(), 0);
    }
}
