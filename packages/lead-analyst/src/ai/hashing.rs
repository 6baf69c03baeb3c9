//! Offline embedder based on feature hashing.
//!
//! Each lowercase word (and each adjacent word pair) is hashed into one of
//! `dim` buckets with a sign taken from the same digest. The bag-of-words
//! vector is L2-normalized, so cosine similarity rewards shared vocabulary.
//! Good enough to rank transcripts without network access; not a semantic
//! model.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::traits::embedder::Embedder;

pub const DEFAULT_HASHING_DIM: usize = 512;

/// Deterministic bag-of-words embedder.
#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dim: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self {
            dim: DEFAULT_HASHING_DIM,
        }
    }
}

impl HashingEmbedder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the vector dimension (minimum 1).
    pub fn with_dim(mut self, dim: usize) -> Self {
        self.dim = dim.max(1);
        self
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Embed synchronously.
    pub fn vectorize(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dim];
        let words = tokenize(text);

        for word in &words {
            self.add_feature(&mut vector, word, 1.0);
        }
        for pair in words.windows(2) {
            self.add_feature(&mut vector, &format!("{} {}", pair[0], pair[1]), 0.5);
        }

        let norm = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|x| *x /= norm);
        }
        vector
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let mut hasher = Sha256::new();
        hasher.update(feature.as_bytes());
        let hash = hasher.finalize();

        let mut bucket_bytes = [0u8; 8];
        bucket_bytes.copy_from_slice(&hash[..8]);
        let bucket = (u64::from_le_bytes(bucket_bytes) % self.dim as u64) as usize;
        let sign = if hash[8] & 1 == 0 { 1.0 } else { -1.0 };

        vector[bucket] += sign * weight;
    }
}

/// Lowercase alphanumeric words; apostrophes are kept inside words.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|w| w.trim_matches('\'').to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

#[async_trait]
impl Embedder for HashingEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vectorize(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::index::cosine_similarity;

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("We're READY, budget's approved! $150k"),
            vec!["we're", "ready", "budget's", "approved", "150k"]
        );
    }

    #[test]
    fn test_vectors_are_normalized_and_deterministic() {
        let embedder = HashingEmbedder::new().with_dim(64);
        let a = embedder.vectorize("budget approved for next quarter");
        let b = embedder.vectorize("budget approved for next quarter");

        assert_eq!(a.len(), 64);
        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_shared_vocabulary_scores_higher() {
        let embedder = HashingEmbedder::new();
        let query = embedder.vectorize("budget approved contract");
        let close = embedder.vectorize("The budget is approved and the contract is ready.");
        let far = embedder.vectorize("We are just window shopping with no rush at all.");

        assert!(cosine_similarity(&query, &close) > cosine_similarity(&query, &far));
    }

    #[test]
    fn test_empty_text_is_zero_vector() {
        let embedder = HashingEmbedder::new().with_dim(0);
        assert_eq!(embedder.dim(), 1);
        assert_eq!(embedder.vectorize("  ...  "), vec![0.0]);
    }

    #[tokio::test]
    async fn test_batch_matches_single() {
        let embedder = HashingEmbedder::new();
        let batch = embedder.embed_batch(&["one", "two"]).await.unwrap();
        assert_eq!(batch[1], embedder.embed("two").await.unwrap());
    }
}
