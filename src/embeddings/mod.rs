//! The embedding provider seam.
//!
//! Providers map text to fixed-dimension float vectors. The dimension is
//! whatever the model returns — the core never hard-codes it — but every
//! vector compared during retrieval must come from the same model.
//! [`embed_validated`] applies the response contract (non-empty,
//! all-finite) regardless of which provider produced the vector.

mod gemini;
mod mock;

pub use gemini::GeminiEmbeddingProvider;
pub use mock::MockEmbeddingProvider;

use async_trait::async_trait;

use crate::types::ChunksmithError;
use crate::vector;

/// Maps a text string to an embedding vector. May fail.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed a single text. Implementations map transport errors and
    /// malformed responses to [`ChunksmithError::Embedding`].
    async fn embed(&self, text: &str) -> Result<Vec<f32>, ChunksmithError>;

    /// Identifier of the underlying model, for logs and diagnostics.
    fn model_name(&self) -> &str;
}

/// Embeds `text` and validates the response on the caller's side of the
/// seam: a non-empty, all-finite vector or an
/// [`ChunksmithError::Embedding`] error, independent of what the provider
/// implementation checks internally.
pub async fn embed_validated(
    provider: &dyn EmbeddingProvider,
    text: &str,
) -> Result<Vec<f32>, ChunksmithError> {
    let values = provider.embed(text).await?;
    vector::validate_embedding(&values)?;
    Ok(values)
}
