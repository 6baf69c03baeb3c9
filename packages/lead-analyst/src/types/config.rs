//! Tunables for ingestion and the reasoning loop.

use serde::{Deserialize, Serialize};

/// Configuration for splitting transcripts into chunks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkingConfig {
    /// Target chunk length in characters.
    ///
    /// Default: 500.
    pub chunk_size: usize,

    /// Characters shared between neighbouring chunks.
    ///
    /// Keeps a buying-signal phrase from being cut in half at a boundary.
    /// Default: 100.
    pub chunk_overlap: usize,

    /// How far into a transcript to look for the lead's name.
    ///
    /// Default: 2000.
    pub name_scan_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            chunk_size: 500,
            chunk_overlap: 100,
            name_scan_chars: 2000,
        }
    }
}

impl ChunkingConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set chunk size.
    pub fn with_chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    /// Set chunk overlap.
    pub fn with_chunk_overlap(mut self, overlap: usize) -> Self {
        self.chunk_overlap = overlap;
        self
    }
}

/// Configuration for the tool-calling reasoning loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Think/act cycles before the loop gives up.
    ///
    /// Default: 15.
    pub max_iterations: usize,

    /// Chunks returned per retrieval tool call.
    ///
    /// Default: 10.
    pub retrieval_k: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 15,
            retrieval_k: 10,
        }
    }
}

impl AgentConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the iteration cap.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Set how many chunks each retrieval returns.
    pub fn with_retrieval_k(mut self, k: usize) -> Self {
        self.retrieval_k = k;
        self
    }
}
