//! Transcript sources: plain text and (optionally) PDF.

use async_trait::async_trait;
use std::path::Path;

use crate::error::{AnalystError, Result};
use crate::traits::source::{has_extension, TranscriptSource};

/// Reads `.txt` and `.md` transcripts as a single page.
#[derive(Debug, Clone, Default)]
pub struct PlainTextSource;

#[async_trait]
impl TranscriptSource for PlainTextSource {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, &["txt", "md"])
    }

    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AnalystError::Extraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        Ok(vec![text])
    }
}

/// Extracts text from `.pdf` transcripts with `pdf-extract`.
#[cfg(feature = "pdf")]
#[derive(Debug, Clone, Default)]
pub struct PdfSource;

#[cfg(feature = "pdf")]
#[async_trait]
impl TranscriptSource for PdfSource {
    fn accepts(&self, path: &Path) -> bool {
        has_extension(path, &["pdf"])
    }

    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        let owned = path.to_path_buf();
        // pdf-extract is CPU-bound and synchronous
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text(&owned))
            .await
            .map_err(|e| AnalystError::Extraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?
            .map_err(|e| AnalystError::Extraction {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        Ok(vec![text])
    }
}

/// Dispatches each file to the first source that accepts it.
pub struct SourceSet {
    sources: Vec<Box<dyn TranscriptSource>>,
}

impl Default for SourceSet {
    /// Every source compiled into this build.
    fn default() -> Self {
        let set = Self::empty().with_source(PlainTextSource);
        #[cfg(feature = "pdf")]
        let set = set.with_source(PdfSource);
        set
    }
}

impl SourceSet {
    pub fn empty() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a source. Earlier sources win when several accept a file.
    pub fn with_source(mut self, source: impl TranscriptSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    pub fn accepts(&self, path: &Path) -> bool {
        self.sources.iter().any(|s| s.accepts(path))
    }

    /// Extract pages with the first accepting source.
    pub async fn extract_pages(&self, path: &Path) -> Result<Vec<String>> {
        match self.sources.iter().find(|s| s.accepts(path)) {
            Some(source) => source.extract_pages(path).await,
            None => Err(AnalystError::Extraction {
                path: path.to_path_buf(),
                reason: "unsupported file type".into(),
            }),
        }
    }
}
