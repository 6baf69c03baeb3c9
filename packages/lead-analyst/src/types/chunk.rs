//! Transcript chunks - the unit of embedding and retrieval.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Lead name used when a chunk cannot be attributed to anyone.
///
/// Excluded from lead listings.
pub const UNKNOWN_LEAD: &str = "Unknown";

/// A bounded slice of a transcript, tagged with lead and source metadata.
///
/// Chunks are created at ingestion, never edited, and dropped wholesale
/// when the corpus is re-indexed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptChunk {
    /// Raw chunk text
    pub text: String,

    /// Lead the transcript is about
    pub lead_name: String,

    /// File name of the source document
    pub source_pdf: String,

    /// `<filename stem>_<ordinal>`
    pub chunk_id: String,
}

impl TranscriptChunk {
    /// Create a chunk for the `ordinal`-th slice of `source_pdf`.
    pub fn new(
        text: impl Into<String>,
        lead_name: impl Into<String>,
        source_pdf: impl Into<String>,
        ordinal: usize,
    ) -> Self {
        let source_pdf = source_pdf.into();
        let chunk_id = chunk_id(&source_pdf, ordinal);
        Self {
            text: text.into(),
            lead_name: lead_name.into(),
            source_pdf,
            chunk_id,
        }
    }

    /// Metadata triple stored alongside the embedding.
    pub fn metadata(&self) -> ChunkMetadata {
        ChunkMetadata {
            lead_name: self.lead_name.clone(),
            source_pdf: self.source_pdf.clone(),
            chunk_id: self.chunk_id.clone(),
        }
    }
}

/// Per-chunk metadata as returned by index scans.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub lead_name: String,
    pub source_pdf: String,
    pub chunk_id: String,
}

/// A chunk returned by similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredChunk {
    pub chunk: TranscriptChunk,

    /// Cosine similarity to the query (higher is closer)
    pub score: f32,
}

/// Build a chunk id from a source file name and ordinal.
pub fn chunk_id(source: &str, ordinal: usize) -> String {
    let stem = Path::new(source)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(source);
    format!("{}_{}", stem, ordinal)
}
