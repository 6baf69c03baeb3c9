//! Vector index contract.
//!
//! A `VectorIndex` stores one named collection of transcript chunks with
//! their embeddings. Writes always replace the whole collection so repeated
//! ingestion of the same corpus never accumulates duplicate or stale chunks.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::{AnalystError, Result};
use crate::types::chunk::{ChunkMetadata, ScoredChunk, TranscriptChunk};

/// Storage for embedded transcript chunks.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Drop every chunk in the collection, then insert `chunks`.
    ///
    /// `embeddings[i]` belongs to `chunks[i]`.
    async fn replace_all(&self, chunks: &[TranscriptChunk], embeddings: &[Vec<f32>]) -> Result<()>;

    /// Chunks sorted by similarity to `embedding` (highest first).
    ///
    /// Never mutates the collection.
    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>>;

    /// Number of chunks in the collection. Zero when nothing was ingested.
    async fn count(&self) -> Result<usize>;

    /// Metadata for every chunk, in ingestion order.
    async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>>;

    /// When the collection was last replaced, if ever.
    async fn last_indexed_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

/// Cosine similarity between two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Fail when a stored vector was produced by a different embedding model.
pub(crate) fn check_dimensions(query: &[f32], stored: &[f32]) -> Result<()> {
    if query.len() != stored.len() {
        return Err(AnalystError::Retrieval(format!(
            "embedding dimension mismatch: index has {}, query has {}",
            stored.len(),
            query.len()
        )));
    }
    Ok(())
}

/// Sort scored chunks by descending similarity and keep the top `k`.
pub(crate) fn rank_top_k(mut scored: Vec<ScoredChunk>, k: usize) -> Vec<ScoredChunk> {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(k);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        let a = vec![1.0, 0.0, 0.0];
        let b = vec![1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 0.001);

        let c = vec![0.0, 1.0, 0.0];
        assert!(cosine_similarity(&a, &c).abs() < 0.001);

        let d = vec![-1.0, 0.0, 0.0];
        assert!((cosine_similarity(&a, &d) + 1.0).abs() < 0.001);
    }

    #[test]
    fn test_cosine_similarity_mismatched_dims() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[], &[]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_check_dimensions() {
        assert!(check_dimensions(&[1.0, 2.0], &[0.5, 0.5]).is_ok());
        let err = check_dimensions(&[1.0, 2.0, 3.0], &[0.5, 0.5]).unwrap_err();
        assert!(matches!(err, AnalystError::Retrieval(m) if m.contains("index has 2, query has 3")));
    }

    #[test]
    fn test_rank_top_k_orders_descending() {
        let scored = [0.2, 0.9, 0.5]
            .iter()
            .enumerate()
            .map(|(i, s)| ScoredChunk {
                chunk: TranscriptChunk::new("text", "Lead", "doc.txt", i),
                score: *s,
            })
            .collect();

        let top = rank_top_k(scored, 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].chunk.chunk_id, "doc_1");
        assert_eq!(top[1].chunk.chunk_id, "doc_2");
    }
}
