//! Ingestion pipeline - load transcripts, chunk, and index.
//!
//! ```text
//! directory ─▶ load_transcripts ─▶ chunk_documents ─▶ SemanticIndex::upsert
//!              (sorted by name)     (recursive split)   (full replace)
//! ```

pub mod names;
pub mod sources;
pub mod splitter;

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{AnalystError, Result};
use crate::index::SemanticIndex;
use crate::traits::{embedder::Embedder, index::VectorIndex};
use crate::types::chunk::TranscriptChunk;
use crate::types::config::ChunkingConfig;

pub use names::{extract_lead_name, name_from_filename};
pub use sources::{PlainTextSource, SourceSet};
pub use splitter::RecursiveSplitter;

#[cfg(feature = "pdf")]
pub use sources::PdfSource;

/// Full text of one transcript document with its inferred lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedTranscript {
    /// File name (not path) of the document
    pub filename: String,

    /// All pages joined with newlines
    pub text: String,

    pub lead_name: String,
}

/// Per-document outcome of an ingest run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestedDocument {
    pub filename: String,
    pub lead_name: String,
    pub chunks: usize,
}

/// Result of an ingest operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Documents in ingestion order
    pub documents: Vec<IngestedDocument>,

    /// Chunks now stored in the index
    pub chunks: usize,
}

/// Load every document in `dir` that one of `sources` accepts.
///
/// Documents are returned sorted by file name so chunk ordering is stable
/// across runs.
pub async fn load_transcripts(
    dir: &Path,
    sources: &SourceSet,
    config: &ChunkingConfig,
) -> Result<Vec<LoadedTranscript>> {
    if !tokio::fs::try_exists(dir).await? || !tokio::fs::metadata(dir).await?.is_dir() {
        return Err(AnalystError::NotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut paths: Vec<PathBuf> = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if entry.file_type().await?.is_file() && sources.accepts(&path) {
            paths.push(path);
        }
    }

    if paths.is_empty() {
        return Err(AnalystError::EmptyCorpus {
            path: dir.to_path_buf(),
        });
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    let mut loaded = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let text = sources.extract_pages(&path).await?.join("\n");
        let lead_name = extract_lead_name(&text, &filename, config.name_scan_chars);
        info!(file = %filename, lead = %lead_name, "Loaded transcript");

        loaded.push(LoadedTranscript {
            filename,
            text,
            lead_name,
        });
    }

    Ok(loaded)
}

/// Split loaded transcripts into tagged chunks.
pub fn chunk_documents(
    docs: &[LoadedTranscript],
    config: &ChunkingConfig,
) -> Result<Vec<TranscriptChunk>> {
    let splitter = RecursiveSplitter::new(config)?;

    let mut chunks = Vec::new();
    for doc in docs {
        let pieces = splitter.split(&doc.text);
        debug!(file = %doc.filename, chunks = pieces.len(), "Chunked transcript");

        chunks.extend(
            pieces
                .into_iter()
                .enumerate()
                .map(|(i, text)| TranscriptChunk::new(text, &doc.lead_name, &doc.filename, i)),
        );
    }

    Ok(chunks)
}

/// Load → chunk → embed → replace the index contents.
pub async fn ingest<I, E>(
    dir: &Path,
    sources: &SourceSet,
    config: &ChunkingConfig,
    index: &SemanticIndex<I, E>,
) -> Result<IngestReport>
where
    I: VectorIndex,
    E: Embedder,
{
    info!(dir = %dir.display(), "Starting ingestion");

    let docs = load_transcripts(dir, sources, config).await?;
    let chunks = chunk_documents(&docs, config)?;
    if chunks.is_empty() {
        warn!(dir = %dir.display(), "Transcripts contain no text; index left unchanged");
        return Err(AnalystError::EmptyCorpus {
            path: dir.to_path_buf(),
        });
    }

    let documents = docs
        .iter()
        .map(|doc| IngestedDocument {
            filename: doc.filename.clone(),
            lead_name: doc.lead_name.clone(),
            chunks: chunks.iter().filter(|c| c.source_pdf == doc.filename).count(),
        })
        .collect();

    let stored = index.upsert(&chunks).await?;

    info!(
        documents = docs.len(),
        chunks = stored,
        "Ingestion complete"
    );

    Ok(IngestReport {
        documents,
        chunks: stored,
    })
}
