//! Text-level access to a vector index.

use chrono::{DateTime, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::traits::embedder::Embedder;
use crate::traits::index::VectorIndex;
use crate::types::chunk::{ChunkMetadata, ScoredChunk, TranscriptChunk, UNKNOWN_LEAD};

/// Pairs a [`VectorIndex`] with the [`Embedder`] that produced its vectors.
///
/// Callers deal in text; embedding happens here.
pub struct SemanticIndex<I, E> {
    index: I,
    embedder: E,
}

impl<I: VectorIndex, E: Embedder> SemanticIndex<I, E> {
    pub fn new(index: I, embedder: E) -> Self {
        Self { index, embedder }
    }

    /// Embed `chunks` and replace the collection with them.
    ///
    /// Embedding happens before anything is deleted, so a failed embedding
    /// call leaves the previous snapshot intact.
    pub async fn upsert(&self, chunks: &[TranscriptChunk]) -> Result<usize> {
        let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        self.index.replace_all(chunks, &embeddings).await?;
        info!(chunks = chunks.len(), "Index replaced");
        Ok(chunks.len())
    }

    /// Top `k` chunks for a free-text query.
    pub async fn query(&self, text: &str, k: usize) -> Result<Vec<ScoredChunk>> {
        let embedding = self.embedder.embed(text).await?;
        let results = self.index.search(&embedding, k).await?;
        debug!(query = %text, k, hits = results.len(), "Index queried");
        Ok(results)
    }

    pub async fn count(&self) -> Result<usize> {
        self.index.count().await
    }

    pub async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>> {
        self.index.list_metadata().await
    }

    /// Distinct lead names in the index, sorted, without the unknown sentinel.
    pub async fn lead_names(&self) -> Result<BTreeSet<String>> {
        distinct_lead_names(&self.index).await
    }

    pub async fn is_populated(&self) -> Result<bool> {
        Ok(self.index.count().await? > 0)
    }

    /// The wrapped index.
    pub fn inner(&self) -> &I {
        &self.index
    }

    /// The wrapped embedder.
    pub fn embedder(&self) -> &E {
        &self.embedder
    }
}

/// Distinct lead names in `index`, sorted, without the unknown sentinel.
pub async fn distinct_lead_names<I: VectorIndex + ?Sized>(index: &I) -> Result<BTreeSet<String>> {
    Ok(index
        .list_metadata()
        .await?
        .into_iter()
        .map(|meta| meta.lead_name)
        .filter(|name| name != UNKNOWN_LEAD)
        .collect())
}

/// What an index currently holds, for status reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndexSummary {
    pub chunks: usize,
    pub lead_names: BTreeSet<String>,
    pub last_indexed_at: Option<DateTime<Utc>>,
}

impl IndexSummary {
    pub fn is_populated(&self) -> bool {
        self.chunks > 0
    }
}

/// Read an [`IndexSummary`]. Read errors are logged and count as empty.
pub async fn summarize<I: VectorIndex + ?Sized>(index: &I) -> IndexSummary {
    let chunks = index.count().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not count indexed chunks; treating as empty");
        0
    });
    let lead_names = distinct_lead_names(index).await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not list lead names");
        BTreeSet::new()
    });
    let last_indexed_at = index.last_indexed_at().await.unwrap_or_else(|e| {
        warn!(error = %e, "Could not read index timestamp");
        None
    });

    IndexSummary {
        chunks,
        lead_names,
        last_indexed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemoryIndex;
    use crate::testing::{FailingIndex, MockEmbedder};

    fn chunk(text: &str, lead: &str, i: usize) -> TranscriptChunk {
        TranscriptChunk::new(text, lead, "call.txt", i)
    }

    #[tokio::test]
    async fn test_upsert_then_query() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        let chunks = vec![
            chunk("We already have the budget approved.", "Sarah Johnson", 0),
            chunk("No rush on our side.", "Carlos Mendez", 1),
        ];

        assert_eq!(index.upsert(&chunks).await.unwrap(), 2);
        assert!(index.is_populated().await.unwrap());

        // MockEmbedder is exact-match deterministic
        let results = index.query("No rush on our side.", 1).await.unwrap();
        assert_eq!(results[0].chunk.lead_name, "Carlos Mendez");
    }

    #[tokio::test]
    async fn test_lead_names_sorted_without_unknown() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        let chunks = vec![
            chunk("a", "Nina Patel", 0),
            chunk("b", UNKNOWN_LEAD, 1),
            chunk("c", "Emma Wilson", 2),
            chunk("d", "Nina Patel", 3),
        ];
        index.upsert(&chunks).await.unwrap();

        let names: Vec<_> = index.lead_names().await.unwrap().into_iter().collect();
        assert_eq!(names, vec!["Emma Wilson", "Nina Patel"]);
    }

    #[tokio::test]
    async fn test_failed_embedding_keeps_previous_snapshot() {
        let embedder = MockEmbedder::new();
        let index = SemanticIndex::new(MemoryIndex::new(), embedder.clone());
        index.upsert(&[chunk("a", "Nina Patel", 0)]).await.unwrap();

        embedder.fail_next("embedding service down");
        assert!(index.upsert(&[chunk("b", "Emma Wilson", 0)]).await.is_err());

        let names: Vec<_> = index.lead_names().await.unwrap().into_iter().collect();
        assert_eq!(names, vec!["Nina Patel"]);
    }

    #[tokio::test]
    async fn test_summarize_reports_contents() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        assert_eq!(summarize(index.inner()).await, IndexSummary::default());

        index
            .upsert(&[chunk("a", "Nina Patel", 0), chunk("b", UNKNOWN_LEAD, 1)])
            .await
            .unwrap();

        let summary = summarize(index.inner()).await;
        assert!(summary.is_populated());
        assert_eq!(summary.chunks, 2);
        assert_eq!(summary.lead_names.into_iter().collect::<Vec<_>>(), vec!["Nina Patel"]);
        assert!(summary.last_indexed_at.is_some());
    }

    #[tokio::test]
    async fn test_summarize_degrades_on_read_errors() {
        let summary = summarize(&FailingIndex).await;
        assert!(!summary.is_populated());
        assert!(summary.lead_names.is_empty());
        assert!(summary.last_indexed_at.is_none());
    }
}
