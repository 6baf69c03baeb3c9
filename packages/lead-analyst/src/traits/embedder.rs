//! Embedding capability.

use async_trait::async_trait;

use crate::error::Result;

/// Turns text into a fixed-dimensionality vector.
///
/// Implementations must return vectors of the same length for every input
/// so they can be compared with cosine similarity.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate embedding for text.
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for multiple texts (batch operation).
    ///
    /// Output order matches input order.
    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        // Default implementation calls embed sequentially
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.embed(text).await?);
        }
        Ok(results)
    }
}
