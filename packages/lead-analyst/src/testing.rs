//! Testing utilities including mock implementations.
//!
//! These are useful for testing code that uses the lead analyst library
//! without making real embedding or model calls.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};

use crate::enrichment::lookup_profile;
use crate::error::{AnalystError, Result};
use crate::traits::{
    embedder::Embedder,
    index::VectorIndex,
    profiles::ProfileProvider,
    reasoner::{Reasoner, ReasoningRequest, ReasoningStep},
};
use crate::types::chunk::{ChunkMetadata, ScoredChunk, TranscriptChunk};
use crate::types::profile::LeadProfile;

/// A mock embedder for testing.
///
/// Embeddings are derived from a SHA-256 of the text, so identical text
/// always yields identical vectors. Clones share call counts and queued
/// failures.
#[derive(Clone)]
pub struct MockEmbedder {
    embedding_dim: usize,

    /// Number of texts embedded
    calls: Arc<RwLock<usize>>,

    /// Error returned by the next call, if set
    fail_next: Arc<RwLock<Option<String>>>,
}

impl Default for MockEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEmbedder {
    pub fn new() -> Self {
        Self {
            embedding_dim: 64,
            calls: Arc::new(RwLock::new(0)),
            fail_next: Arc::new(RwLock::new(None)),
        }
    }

    /// Set the embedding dimension.
    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    /// Make the next `embed` or `embed_batch` call fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.write().unwrap() = Some(message.into());
    }

    /// Number of texts embedded so far.
    pub fn calls(&self) -> usize {
        *self.calls.read().unwrap()
    }

    fn take_failure(&self) -> Result<()> {
        match self.fail_next.write().unwrap().take() {
            Some(message) => Err(AnalystError::Embedding(message)),
            None => Ok(()),
        }
    }

    /// Generate a deterministic embedding based on text.
    fn generate_deterministic_embedding(&self, text: &str) -> Vec<f32> {
        use sha2::{Digest, Sha256};

        *self.calls.write().unwrap() += 1;

        let mut hasher = Sha256::new();
        hasher.update(text.as_bytes());
        let hash = hasher.finalize();

        (0..self.embedding_dim)
            .map(|i| {
                let byte = hash[i % 32] as f32;
                // Normalize to [-1, 1] range
                (byte / 127.5) - 1.0
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for MockEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.take_failure()?;
        Ok(self.generate_deterministic_embedding(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        self.take_failure()?;
        Ok(texts
            .iter()
            .map(|t| self.generate_deterministic_embedding(t))
            .collect())
    }
}

/// A reasoner that plays back a fixed script of steps.
///
/// Once the script runs out it keeps returning the repeated step, the
/// configured failure, or a reasoning error.
#[derive(Clone, Default)]
pub struct ScriptedReasoner {
    script: Arc<RwLock<VecDeque<ReasoningStep>>>,
    repeat: Option<ReasoningStep>,
    failure: Option<String>,

    /// Rendered scratchpad seen on each call, for assertions
    seen: Arc<RwLock<Vec<String>>>,
}

impl ScriptedReasoner {
    /// Play `steps` in order.
    pub fn new(steps: Vec<ReasoningStep>) -> Self {
        Self {
            script: Arc::new(RwLock::new(steps.into())),
            ..Default::default()
        }
    }

    /// Return `step` on every call.
    pub fn repeating(step: ReasoningStep) -> Self {
        Self {
            repeat: Some(step),
            ..Default::default()
        }
    }

    /// Fail with `message` once the script is exhausted.
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn calls(&self) -> usize {
        self.seen.read().unwrap().len()
    }

    /// Scratchpad renderings, one per call.
    pub fn seen_scratchpads(&self) -> Vec<String> {
        self.seen.read().unwrap().clone()
    }
}

#[async_trait]
impl Reasoner for ScriptedReasoner {
    async fn next_step(&self, request: &ReasoningRequest<'_>) -> Result<ReasoningStep> {
        self.seen
            .write()
            .unwrap()
            .push(request.scratchpad.render());

        if let Some(step) = self.script.write().unwrap().pop_front() {
            return Ok(step);
        }
        if let Some(step) = &self.repeat {
            return Ok(step.clone());
        }
        Err(AnalystError::Reasoning(
            self.failure
                .clone()
                .unwrap_or_else(|| "script exhausted".to_string()),
        ))
    }
}

/// A profile provider that always fails.
#[derive(Clone)]
pub struct FailingProfiles {
    message: String,
    calls: Arc<RwLock<usize>>,
}

impl FailingProfiles {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            calls: Arc::new(RwLock::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        *self.calls.read().unwrap()
    }
}

#[async_trait]
impl ProfileProvider for FailingProfiles {
    async fn lookup(&self, _lead_name: &str) -> Result<LeadProfile> {
        *self.calls.write().unwrap() += 1;
        Err(AnalystError::Enrichment(self.message.clone()))
    }
}

/// A profile provider that records which leads were looked up.
#[derive(Clone, Default)]
pub struct RecordingProfiles {
    lookups: Arc<RwLock<Vec<String>>>,
}

impl RecordingProfiles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lookups(&self) -> Vec<String> {
        self.lookups.read().unwrap().clone()
    }
}

#[async_trait]
impl ProfileProvider for RecordingProfiles {
    async fn lookup(&self, lead_name: &str) -> Result<LeadProfile> {
        self.lookups.write().unwrap().push(lead_name.to_string());
        Ok(lookup_profile(lead_name))
    }
}

/// A vector index whose every operation fails with a storage error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingIndex;

impl FailingIndex {
    fn error() -> AnalystError {
        AnalystError::Storage("index unavailable".into())
    }
}

#[async_trait]
impl VectorIndex for FailingIndex {
    async fn replace_all(&self, _chunks: &[TranscriptChunk], _embeddings: &[Vec<f32>]) -> Result<()> {
        Err(Self::error())
    }

    async fn search(&self, _embedding: &[f32], _k: usize) -> Result<Vec<ScoredChunk>> {
        Err(Self::error())
    }

    async fn count(&self) -> Result<usize> {
        Err(Self::error())
    }

    async fn list_metadata(&self) -> Result<Vec<ChunkMetadata>> {
        Err(Self::error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_embedder_is_deterministic() {
        let embedder = MockEmbedder::new().with_embedding_dim(8);
        let a = embedder.embed("hello").await.unwrap();
        let b = embedder.embed("hello").await.unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 8);
        assert_eq!(embedder.calls(), 2);
    }

    #[tokio::test]
    async fn test_fail_next_fails_once() {
        let embedder = MockEmbedder::new();
        let shared = embedder.clone();
        shared.fail_next("down");

        assert!(matches!(embedder.embed("x").await, Err(AnalystError::Embedding(m)) if m == "down"));
        assert!(embedder.embed("x").await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_index() {
        assert!(matches!(FailingIndex.count().await, Err(AnalystError::Storage(_))));
    }
}
