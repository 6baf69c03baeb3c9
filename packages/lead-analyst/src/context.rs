//! Rendering retrieved chunks as reasoner context.

use crate::types::chunk::TranscriptChunk;

/// Returned instead of an empty context.
pub const NO_TRANSCRIPT_DATA: &str = "No relevant transcript data found.";

/// Group chunks under `=== Lead: <name> ===` headers.
///
/// Leads appear in order of first occurrence; chunks keep retrieval order
/// within each lead and are trimmed.
pub fn format_context<'a, I>(chunks: I) -> String
where
    I: IntoIterator<Item = &'a TranscriptChunk>,
{
    let mut groups: Vec<(&str, Vec<&str>)> = Vec::new();

    for chunk in chunks {
        let text = chunk.text.trim();
        match groups.iter_mut().find(|(lead, _)| *lead == chunk.lead_name) {
            Some((_, texts)) => texts.push(text),
            None => groups.push((chunk.lead_name.as_str(), vec![text])),
        }
    }

    if groups.is_empty() {
        return NO_TRANSCRIPT_DATA.to_string();
    }

    let mut lines = Vec::new();
    for (lead, texts) in groups {
        lines.push(format!("\n=== Lead: {} ===", lead));
        lines.extend(texts.into_iter().map(str::to_string));
    }
    lines.join("\n")
}
