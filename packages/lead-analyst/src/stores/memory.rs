//! In-memory vector index for testing and development.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::error::{AnalystError, Result};
use crate::traits::index::{check_dimensions, cosine_similarity, rank_top_k, VectorIndex};
use crate::types::chunk::{ChunkMetadata, ScoredChunk, TranscriptChunk};

#[derive(Default)]
struct Collection {
    entries: Vec<(TranscriptChunk, Vec<f32>)>,
    indexed_at: Option<DateTime<Utc>>,
}

/// In-memory chunk index.
///
/// Not suitable for production as data is lost on restart.
#[derive(Default)]
pub struct MemoryIndex {
    collection: RwLock<Collection>,
}

impl MemoryIndex {
    /// Create a new empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every stored chunk.
    pub async fn clear(&self) {
        *self.collection.write().await = Collection::default();
    }
}

#[async_trait]
impl VectorIndex for MemoryIndex {
    async fn replace_all(&self, chunks: &[TranscriptChunk], embeddings: &[Vec<f32>]) -> Result<()> {
        if chunks.len() != embeddings.len() {
            return Err(AnalystError::Embedding(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let entries = chunks
            .iter()
            .cloned()
            .zip(embeddings.iter().cloned())
            .collect();

        let mut collection = self.collection.write().await;
        collection.entries = entries;
        collection.indexed_at = Some(Utc::now());
        Ok(())
    }

    async fn search(&self, embedding: &[f32], k: usize) -> Result<Vec<ScoredChunk>> {
        let collection = self.collection.read().await;
        let mut scored = Vec::with_capacity(collection.entries.len());
        for (chunk, stored) in &collection.entries {
            check_dimensions(embedding, stored)?;
            scored.push(ScoredChunk {
                chunk: chunk.clone(),
                score: cosine_similarity(embedding, stored),
            });
        }

        Ok(rank_top_k(scored, k))
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.collection.read().await.entries.len())
    }

    async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>> {
        Ok(self
            .collection
            .read()
            .await
            .entries
            .iter()
            .map(|(chunk, _)| chunk.metadata())
            .collect())
    }

    async fn last_indexed_at(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(self.collection.read().await.indexed_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(i: usize, lead: &str) -> TranscriptChunk {
        TranscriptChunk::new(format!("chunk {}", i), lead, "call.txt", i)
    }

    #[tokio::test]
    async fn test_replace_all_drops_previous_chunks() {
        let index = MemoryIndex::new();
        assert_eq!(index.count().await.unwrap(), 0);
        assert!(index.last_indexed_at().await.unwrap().is_none());

        let first = vec![chunk(0, "Ada Lovelace"), chunk(1, "Ada Lovelace")];
        index
            .replace_all(&first, &[vec![1.0, 0.0], vec![0.0, 1.0]])
            .await
            .unwrap();
        assert_eq!(index.count().await.unwrap(), 2);

        let second = vec![chunk(0, "Alan Turing")];
        index.replace_all(&second, &[vec![1.0, 0.0]]).await.unwrap();

        let meta = index.list_metadata().await.unwrap();
        assert_eq!(meta.len(), 1);
        assert_eq!(meta[0].lead_name, "Alan Turing");
        assert!(index.last_indexed_at().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_mismatched_embeddings_rejected() {
        let index = MemoryIndex::new();
        let result = index.replace_all(&[chunk(0, "Ada Lovelace")], &[]).await;
        assert!(matches!(result, Err(AnalystError::Embedding(_))));
    }

    #[tokio::test]
    async fn test_search_ranks_by_similarity() {
        let index = MemoryIndex::new();
        let chunks: Vec<_> = (0..4).map(|i| chunk(i, "Ada Lovelace")).collect();
        let embeddings: Vec<_> = (0..4).map(|i| vec![i as f32 * 0.1, 0.5, 0.5]).collect();
        index.replace_all(&chunks, &embeddings).await.unwrap();

        let results = index.search(&[0.3, 0.5, 0.5], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].chunk.chunk_id, "call_3");

        // Searching never mutates
        assert_eq!(index.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_search_with_other_dimension_fails() {
        let index = MemoryIndex::new();
        index
            .replace_all(&[chunk(0, "Ada Lovelace")], &[vec![1.0, 0.0]])
            .await
            .unwrap();

        let result = index.search(&[1.0, 0.0, 0.0], 5).await;
        assert!(matches!(result, Err(AnalystError::Retrieval(_))));
    }
}
