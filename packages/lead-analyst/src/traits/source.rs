//! Transcript document text extraction.

use async_trait::async_trait;
use std::path::Path;

use crate::error::Result;

/// Pulls page text out of a transcript document.
///
/// Extraction is a black box: implementations return one string per page
/// and the ingest pipeline joins them.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Whether this source can read `path` (usually by extension).
    fn accepts(&self, path: &Path) -> bool;

    /// Extract the text of every page, in page order.
    async fn extract_pages(&self, path: &Path) -> Result<Vec<String>>;
}

/// Case-insensitive extension check.
pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension_ignores_case() {
        assert!(has_extension(Path::new("call.PDF"), &["pdf"]));
        assert!(has_extension(Path::new("notes.txt"), &["txt", "md"]));
        assert!(!has_extension(Path::new("README"), &["txt"]));
        assert!(!has_extension(Path::new("image.png"), &["pdf"]));
    }
}
