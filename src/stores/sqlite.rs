//! SQLite chunk store.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use super::ChunkStore;
use crate::types::{Chunk, ChunksmithError, NewChunk, PendingChunk, SplitStrategy};

/// Missing-embedding predicate. NULL is the state this crate writes;
/// `'[]'`/`'{}'` cover rows older tooling left behind with an empty JSON
/// payload instead.
const MISSING: &str = "embedding IS NULL OR embedding = '[]' OR embedding = '{}'";
const PRESENT: &str = "embedding IS NOT NULL AND embedding <> '[]' AND embedding <> '{}'";

/// Chunk store backed by a single SQLite database file.
///
/// Embeddings are persisted as JSON arrays in a TEXT column — plain CRUD,
/// no vector extension, because similarity ranking happens core-side over
/// [`embedded_chunks`](ChunkStore::embedded_chunks).
#[derive(Clone)]
pub struct SqliteChunkStore {
    conn: Connection,
}

impl SqliteChunkStore {
    /// Opens (and if necessary creates) the database at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, ChunksmithError> {
        let conn = Connection::open(path).await?;
        Self::with_connection(conn).await
    }

    /// Opens a private in-memory database. Handy for tests.
    pub async fn open_in_memory() -> Result<Self, ChunksmithError> {
        let conn = Connection::open_in_memory().await?;
        Self::with_connection(conn).await
    }

    async fn with_connection(conn: Connection) -> Result<Self, ChunksmithError> {
        conn.call(|conn| {
            conn.execute(
                "CREATE TABLE IF NOT EXISTS document_chunks (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    chunk_text TEXT NOT NULL,
                    filename TEXT NOT NULL,
                    split_strategy TEXT NOT NULL,
                    embedding TEXT
                )",
                [],
            )?;
            Ok(())
        })
        .await?;
        Ok(Self { conn })
    }
}

#[async_trait]
impl ChunkStore for SqliteChunkStore {
    async fn insert_chunks(&self, chunks: Vec<NewChunk>) -> Result<Vec<i64>, ChunksmithError> {
        if chunks.is_empty() {
            return Ok(Vec::new());
        }
        let ids = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let mut ids = Vec::with_capacity(chunks.len());
                {
                    let mut stmt = tx.prepare(
                        "INSERT INTO document_chunks (chunk_text, filename, split_strategy)
                         VALUES (?1, ?2, ?3)",
                    )?;
                    for chunk in &chunks {
                        stmt.execute((
                            &chunk.text,
                            &chunk.source_filename,
                            chunk.strategy.encode(),
                        ))?;
                        ids.push(tx.last_insert_rowid());
                    }
                }
                tx.commit()?;
                Ok(ids)
            })
            .await?;
        Ok(ids)
    }

    async fn pending_embeddings(
        &self,
        limit: usize,
    ) -> Result<Vec<PendingChunk>, ChunksmithError> {
        let pending = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT id, chunk_text FROM document_chunks
                     WHERE {MISSING}
                     ORDER BY id
                     LIMIT ?1"
                ))?;
                let rows = stmt.query_map([limit as i64], |row| {
                    Ok(PendingChunk {
                        id: row.get(0)?,
                        text: row.get(1)?,
                    })
                })?;
                let mut pending = Vec::new();
                for row in rows {
                    pending.push(row?);
                }
                Ok(pending)
            })
            .await?;
        Ok(pending)
    }

    async fn set_embedding(&self, id: i64, embedding: &[f32]) -> Result<(), ChunksmithError> {
        let payload = serde_json::to_string(embedding)
            .map_err(|err| ChunksmithError::Store(err.to_string()))?;
        let updated = self
            .conn
            .call(move |conn| {
                let updated = conn.execute(
                    "UPDATE document_chunks SET embedding = ?1 WHERE id = ?2",
                    (payload, id),
                )?;
                Ok(updated)
            })
            .await?;
        if updated == 0 {
            return Err(ChunksmithError::Store(format!("no chunk with id {id}")));
        }
        Ok(())
    }

    async fn embedded_chunks(&self) -> Result<Vec<Chunk>, ChunksmithError> {
        let rows = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(&format!(
                    "SELECT id, chunk_text, filename, split_strategy, embedding
                     FROM document_chunks
                     WHERE {PRESENT}
                     ORDER BY id"
                ))?;
                let rows = stmt.query_map([], |row| {
                    Ok((
                        row.get::<_, i64>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, String>(3)?,
                        row.get::<_, String>(4)?,
                    ))
                })?;
                let mut collected = Vec::new();
                for row in rows {
                    collected.push(row?);
                }
                Ok(collected)
            })
            .await?;

        // Domain decoding happens outside the connection closure so corrupt
        // rows surface with their chunk id attached.
        let mut chunks = Vec::with_capacity(rows.len());
        for (id, text, filename, strategy_tag, embedding_json) in rows {
            let strategy = SplitStrategy::decode(&strategy_tag).ok_or_else(|| {
                ChunksmithError::Store(format!(
                    "chunk {id} has unknown split strategy '{strategy_tag}'"
                ))
            })?;
            let embedding: Vec<f32> = serde_json::from_str(&embedding_json).map_err(|err| {
                ChunksmithError::Store(format!("chunk {id} has a malformed embedding: {err}"))
            })?;
            chunks.push(Chunk {
                id,
                text,
                source_filename: filename,
                strategy,
                embedding: Some(embedding),
            });
        }
        Ok(chunks)
    }

    async fn count(&self) -> Result<usize, ChunksmithError> {
        let count = self
            .conn
            .call(|conn| {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM document_chunks", [], |row| row.get(0))?;
                Ok(count)
            })
            .await?;
        Ok(count as usize)
    }
}
