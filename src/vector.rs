//! Shared vector helpers for similarity scoring and embedding validation.

use crate::types::ChunksmithError;

/// Cosine similarity between two vectors.
///
/// Returns `f32::NEG_INFINITY` when either vector is empty, the dimensions
/// differ, or either norm is zero, so such pairs always sort last instead of
/// failing a whole query.
#[must_use]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return f32::NEG_INFINITY;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|y| y * y).sum::<f32>().sqrt();

    let denom = norm_a * norm_b;
    if denom == 0.0 {
        return f32::NEG_INFINITY;
    }
    dot / denom
}

/// Checks an embedding received from a provider or the store: non-empty,
/// every component finite. Anything else is an [`ChunksmithError::Embedding`]
/// rather than a silently coerced zero.
pub fn validate_embedding(values: &[f32]) -> Result<(), ChunksmithError> {
    if values.is_empty() {
        return Err(ChunksmithError::Embedding(
            "embedding vector is empty".into(),
        ));
    }
    if let Some(position) = values.iter().position(|v| !v.is_finite()) {
        return Err(ChunksmithError::Embedding(format!(
            "embedding component {position} is not a finite number"
        )));
    }
    Ok(())
}

/// `true` when [`validate_embedding`] would accept `values`.
#[must_use]
pub fn is_valid_embedding(values: &[f32]) -> bool {
    validate_embedding(values).is_ok()
}
