//! SQLite vector index.
//!
//! A file-based index stored as `index.sqlite3` under the persist
//! directory. Good for:
//! - Local single-user analysis
//! - Re-attaching to an index built by an earlier run
//! - Testing with persistent data
//!
//! SQLite has no native vector type, so embeddings are stored as
//! little-endian `f32` BLOBs and similarity is computed in Rust.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{AnalystError, Result};
use crate::traits::index::{check_dimensions, cosine_similarity, rank_top_k, VectorIndex};
use crate::types::chunk::{ChunkMetadata, ScoredChunk, TranscriptChunk};

/// File name of the index database inside the persist directory.
pub const INDEX_FILE: &str = "index.sqlite3";

/// SQLite-backed chunk index scoped to one named collection.
pub struct SqliteIndex {
    pool: SqlitePool,
    collection: String,
}

impl SqliteIndex {
    /// Open (creating if needed) the index under `persist_dir`.
    ///
    /// Re-opening the same directory re-attaches to existing data.
    pub async fn open(persist_dir: impl AsRef<Path>, collection: impl Into<String>) -> Result<Self> {
        let persist_dir = persist_dir.as_ref();
        tokio::fs::create_dir_all(persist_dir).await?;

        let options = SqliteConnectOptions::new()
            .filename(index_path(persist_dir))
            .create_if_missing(true);

        Self::connect(options, 5, collection.into()).await
    }

    /// Open the index only if a previous run created it.
    ///
    /// Returns `None` when nothing was ever ingested under `persist_dir`.
    pub async fn open_existing(
        persist_dir: impl AsRef<Path>,
        collection: impl Into<String>,
    ) -> Result<Option<Self>> {
        let path = index_path(persist_dir.as_ref());
        if !tokio::fs::try_exists(&path).await? {
            debug!(path = %path.display(), "No index file yet");
            return Ok(None);
        }

        let options = SqliteConnectOptions::new().filename(path);
        Ok(Some(Self::connect(options, 5, collection.into()).await?))
    }

    /// Create an in-memory SQLite index (for testing).
    pub async fn in_memory(collection: impl Into<String>) -> Result<Self> {
        let options = SqliteConnectOptions::new().in_memory(true);
        // Every connection to :memory: is a separate database
        Self::connect(options, 1, collection.into()).await
    }

    async fn connect(
        options: SqliteConnectOptions,
        max_connections: u32,
        collection: String,
    ) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(AnalystError::storage)?;

        let index = Self { pool, collection };
        index.run_migrations().await?;
        Ok(index)
    }

    /// Run database migrations.
    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chunks (
                collection TEXT NOT NULL,
                position INTEGER NOT NULL,
                chunk_id TEXT NOT NULL,
                lead_name TEXT NOT NULL,
                source_pdf TEXT NOT NULL,
                text TEXT NOT NULL,
                embedding BLOB NOT NULL,
                indexed_at TEXT NOT NULL,
                PRIMARY KEY (collection, position)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(AnalystError::storage)?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS idx_chunks_lead_name ON chunks(collection, lead_name)",
        )
        .execute(&self.pool)
        .await
        .map_err(AnalystError::storage)?;

        Ok(())
    }

    /// Name of the collection this handle reads and writes.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Location of the index database for a persist directory.
pub fn index_path(persist_dir: &Path) -> PathBuf {
    persist_dir.join(INDEX_FILE)
}

// Row types for sqlx queries
#[derive(Debug, FromRow)]
struct ChunkRow {
    chunk_id: String,
    lead_name: String,
    source_pdf: String,
    text: String,
    embedding: Vec<u8>,
}

impl ChunkRow {
    fn into_parts(self) -> Result<(TranscriptChunk, Vec<f32>)> {
        let embedding = decode_embedding(&self.embedding)?;
        let chunk = TranscriptChunk {
            text: self.text,
            lead_name: self.lead_name,
            source_pdf: self.source_pdf,
            chunk_id: self.chunk_id,
        };
        Ok((chunk, embedding))
    }
}

fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    embedding.iter().flat_map(|f| f.to_le_bytes()).collect()
}

fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(AnalystError::Storage(
            format!("Invalid embedding blob of {} bytes", bytes.len()).into(),
        ));
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect())
}

#[async_trait]
impl VectorIndex for SqliteIndex {
    async fn replace_all(&self, chunks: &[TranscriptChunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(AnalystError::Embedding(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let indexed_at = Utc::now().to_rfc3339();
        let mut tx = self.pool.begin().await.map_err(AnalystError::storage)?;

        let deleted = sqlx::query("DELETE FROM chunks WHERE collection = ?")
            .bind(&self.collection)
            .execute(&mut *tx)
            .await
            .map_err(AnalystError::storage)?
            .rows_affected();

        for (position, (chunk, embedding)) in chunks.iter().zip(embeddings).enumerate() {
            sqlx::query(
                r#"
                INSERT INTO chunks
                    (collection, position, chunk_id, lead_name, source_pdf, text, embedding, indexed_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&self.collection)
            .bind(position as i64)
            .bind(&chunk.chunk_id)
            .bind(&chunk.lead_name)
            .bind(&chunk.source_pdf)
            .bind(&chunk.text)
            .bind(encode_embedding(embedding))
            .bind(&indexed_at)
            .execute(&mut *tx)
            .await
            .map_err(AnalystError::storage)?;
        }

        tx.commit().await.map_err(AnalystError::storage)?;

        debug!(
            collection = %self.collection,
            deleted,
            inserted = chunks.len(),
            "Replaced collection"
        );
        Ok(())
    }

    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let rows: Vec<ChunkRow> = sqlx::query_as(
            r#"
            SELECT chunk_id, lead_name, source_pdf, text, embedding
            FROM chunks
            WHERE collection = ?
            ORDER BY position
            "#,
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AnalystError::Retrieval(e.to_string()))?;

        let mut scored = Vec::with_capacity(rows.len());
        for row in rows {
            let (chunk, stored) = row.into_parts()?;
            check_dimensions(embedding, &stored)?;
            scored.push(ScoredChunk {
                score: cosine_similarity(embedding, &stored),
                chunk,
            });
        }

        Ok(rank_top_k(scored, k))
    }

    async fn count(&self) -> Result<usize> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chunks WHERE collection = ?")
            .bind(&self.collection)
            .fetch_one(&self.pool)
            .await
            .map_err(AnalystError::storage)?;

        Ok(count as usize)
    }

    async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>> {
        let rows: Vec<(String, String, String)> = sqlx::query_as(
            r#"
            SELECT lead_name, source_pdf, chunk_id
            FROM chunks
            WHERE collection = ?
            ORDER BY position
            "#,
        )
        .bind(&self.collection)
        .fetch_all(&self.pool)
        .await
        .map_err(AnalystError::storage)?;

        Ok(rows
            .into_iter()
            .map(|(lead_name, source_pdf, chunk_id)| ChunkMetadata {
                lead_name,
                source_pdf,
                chunk_id,
            })
            .collect())
    }

    async fn last_indexed_at(&self) -> Result<Option<DateTime<Utc>>> {
        let (latest,): (Option<String>,) =
            sqlx::query_as("SELECT MAX(indexed_at) FROM chunks WHERE collection = ?")
                .bind(&self.collection)
                .fetch_one(&self.pool)
                .await
                .map_err(AnalystError::storage)?;

        latest
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| AnalystError::Storage(format!("Invalid date: {}", e).into()))
            })
            .transpose()
    }
}
