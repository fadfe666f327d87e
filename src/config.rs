//! Explicit configuration for the external collaborators.
//!
//! Nothing in the crate reads the environment behind the caller's back: the
//! `from_env` constructors here are the only place `.env` / process
//! environment resolution happens, and everything downstream receives these
//! structs by value.

use crate::types::ChunksmithError;

/// Model used when `EMBED_MODEL` is not set.
pub const DEFAULT_EMBED_MODEL: &str = "gemini-embedding-001";
/// Public Gemini API base.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Connection settings for the embedding provider.
///
/// Indexing and querying must run with the same model — vectors from
/// different models are not comparable.
#[derive(Clone, Debug)]
pub struct EmbeddingConfig {
    pub model: String,
    pub api_key: String,
    pub base_url: String,
}

impl EmbeddingConfig {
    pub fn new(model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Overrides the API base URL (self-hosted proxies, tests).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Resolves provider settings from the environment: `GEMINI_API_KEY`
    /// (required) and `EMBED_MODEL` (optional), loading `.env` first.
    pub fn from_env() -> Result<Self, ChunksmithError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| {
            ChunksmithError::InvalidArgument("GEMINI_API_KEY is not set".into())
        })?;
        let model =
            std::env::var("EMBED_MODEL").unwrap_or_else(|_| DEFAULT_EMBED_MODEL.to_string());
        Ok(Self::new(model, api_key))
    }
}

/// Location of the chunk database.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub db_path: String,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }

    /// Resolves the database path from `CHUNKS_DB_PATH`, defaulting to
    /// `chunksmith.db` in the working directory.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self {
            db_path: std::env::var("CHUNKS_DB_PATH")
                .unwrap_or_else(|_| "chunksmith.db".to_string()),
        }
    }
}
