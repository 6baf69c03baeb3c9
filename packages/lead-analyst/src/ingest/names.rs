//! Lead-name inference from transcript text.
//!
//! Patterns are tried in table order against the head of the transcript;
//! the first capture wins. When nothing matches, the file name stands in.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static RE_ROLE_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:Lead|Client|Customer|Prospect)\s*[:\-]\s*([A-Z][a-z]+ [A-Z][a-z]+)").unwrap()
});
static RE_CONVERSATION_WITH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:speaking with|call with|meeting with)\s+([A-Z][a-z]+ [A-Z][a-z]+)").unwrap()
});
static RE_SPEAKER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^([A-Z][a-z]+ [A-Z][a-z]+)\s*[:\-]").unwrap());

/// A labelled lead-name pattern. Capture group 1 is the name.
pub struct NamePattern {
    pub label: &'static str,
    pub regex: &'static LazyLock<Regex>,
}

/// Lead-name patterns in priority order.
pub static NAME_PATTERNS: &[NamePattern] = &[
    NamePattern {
        label: "role_label",
        regex: &RE_ROLE_LABEL,
    },
    NamePattern {
        label: "conversation_with",
        regex: &RE_CONVERSATION_WITH,
    },
    NamePattern {
        label: "speaker_line",
        regex: &RE_SPEAKER_LINE,
    },
];

/// Infer the lead's name from the first `scan_chars` characters of `text`,
/// falling back to the title-cased stem of `filename`.
pub fn extract_lead_name(text: &str, filename: &str, scan_chars: usize) -> String {
    let head = char_prefix(text, scan_chars);

    for pattern in NAME_PATTERNS {
        if let Some(name) = pattern.regex.captures(head).and_then(|c| c.get(1)) {
            tracing::trace!(pattern = pattern.label, name = name.as_str(), "Lead name matched");
            return name.as_str().trim().to_string();
        }
    }

    name_from_filename(filename)
}

/// `sarah_johnson-call.pdf` becomes `Sarah Johnson Call`.
pub fn name_from_filename(filename: &str) -> String {
    let stem = Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename);

    title_case(&stem.replace(['_', '-'], " "))
}

/// Uppercase the first letter of every alphabetic run and lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;

    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }

    out
}

/// Longest prefix of `text` with at most `max_chars` characters.
fn char_prefix(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_label_pattern() {
        let text = "Sales call notes\nClient: Sarah Johnson\nRep: Mike Torres";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "Sarah Johnson");

        let text = "Prospect - David Park, Director";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "David Park");

        let text = "Customer:Nina Patel (CEO)";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "Nina Patel");

        let text = "Lead - Emma Wilson";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "Emma Wilson");
    }

    #[test]
    fn test_pattern_order_wins_over_position() {
        // Speaker line appears first, but the role label pattern has priority
        let text = "Mike Torres: Hello!\nThanks for the call with Emma Wilson.\nLead: Nina Patel";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "Nina Patel");

        let text = "Mike Torres: Hello!\nGreat call with Emma Wilson today.";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "Emma Wilson");
    }

    #[test]
    fn test_speaker_line_requires_line_start() {
        let text = "Transcript\nCarlos Mendez: We're just exploring.";
        assert_eq!(extract_lead_name(text, "call.pdf", 2000), "Carlos Mendez");

        let text = "Notes about Carlos Mendez: nothing yet";
        assert_eq!(extract_lead_name(text, "carlos_mendez.pdf", 2000), "Carlos Mendez");
    }

    #[test]
    fn test_only_scans_head_of_transcript() {
        let text = format!("{}\nClient: Sarah Johnson", "x".repeat(50));
        assert_eq!(extract_lead_name(&text, "fallback_name.pdf", 20), "Fallback Name");
    }

    #[test]
    fn test_filename_fallback_title_cases() {
        assert_eq!(name_from_filename("sarah_johnson-call.pdf"), "Sarah Johnson Call");
        assert_eq!(name_from_filename("ACME_q3.txt"), "Acme Q3");
        assert_eq!(name_from_filename("o'brien_notes.pdf"), "O'Brien Notes");
    }

    #[test]
    fn test_char_prefix_respects_utf8() {
        assert_eq!(char_prefix("héllo", 2), "hé");
        assert_eq!(char_prefix("hi", 10), "hi");
    }
}
