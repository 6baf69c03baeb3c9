//! Typed errors for the lead analyst library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Ingestion errors propagate to the caller. Errors raised inside a single
//! agent tool call never escape the reasoning loop; they are rendered into
//! the scratchpad as observations instead.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while ingesting, indexing or analysing transcripts.
#[derive(Debug, Error)]
pub enum AnalystError {
    /// Input directory (or collection) does not exist
    #[error("not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Directory exists but holds no eligible transcript documents
    #[error("no transcript documents found in {}", path.display())]
    EmptyCorpus { path: PathBuf },

    /// Index query failed
    #[error("retrieval failed: {0}")]
    Retrieval(String),

    /// Profile enrichment failed
    #[error("enrichment failed: {0}")]
    Enrichment(String),

    /// Storage operation failed
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Embedding generation failed
    #[error("embedding error: {0}")]
    Embedding(String),

    /// Reasoning backend unavailable or failed
    #[error("reasoning error: {0}")]
    Reasoning(String),

    /// Text could not be extracted from a transcript document
    #[error("failed to extract text from {}: {reason}", path.display())]
    Extraction { path: PathBuf, reason: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(String),

    /// Filesystem error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl AnalystError {
    /// Wrap any storage backend error.
    pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Storage(Box::new(err))
    }
}

/// Result type alias for analyst operations.
pub type Result<T> = std::result::Result<T, AnalystError>;
