//! Best-effort recovery of ranked leads from the agent's free-text answer.
//!
//! Parsing never fails: text that does not look like a ranked list yields
//! an empty vector.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::types::ranked::RankedLead;

/// `1. **Name** - Score: 85`
static RE_SCORED_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(\d+)[.)]\s*(?:\*\*)?([A-Z][^\n*]+?)(?:\*\*)?\s*[-–]\s*(?:Score|Confidence)[:\s]*(-?\d+)",
    )
    .unwrap()
});

/// `1. Name:` with no score.
static RE_NUMBERED_ENTRY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)(\d+)[.)]\s*([A-Z][A-Za-z\s]+?)[:–\-]").unwrap());

/// Score assumed for entries that carry none.
pub const DEFAULT_SCORE: u8 = 70;

const MAX_SENTENCES: usize = 4;
const MIN_SENTENCE_CHARS: usize = 20;

/// Parse ranked leads out of `text`.
pub fn parse_lead_scores(text: &str) -> Vec<RankedLead> {
    let mut matches: Vec<Captures> = RE_SCORED_ENTRY.captures_iter(text).collect();
    if matches.is_empty() {
        matches = RE_NUMBERED_ENTRY.captures_iter(text).collect();
    }

    let mut leads = Vec::with_capacity(matches.len());
    for (i, caps) in matches.iter().enumerate() {
        let (Some(whole), Some(rank), Some(name)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let score = caps
            .get(3)
            .map(|m| clamp_score(m.as_str()))
            .unwrap_or(DEFAULT_SCORE);

        let end = matches
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let block = text[whole.end()..end].trim();

        leads.push(RankedLead {
            rank: rank.as_str().parse().unwrap_or(0),
            name: strip_emphasis(name.as_str()),
            score,
            reasoning: extract_reasons(block),
            raw_text: block.to_string(),
        });
    }

    leads
}

/// Parse a possibly signed integer and clamp it into `0..=100`.
fn clamp_score(raw: &str) -> u8 {
    match raw.parse::<i64>() {
        Ok(n) => n.clamp(0, 100) as u8,
        // Only overflow can fail here
        Err(_) if raw.starts_with('-') => 0,
        Err(_) => 100,
    }
}

fn strip_emphasis(s: &str) -> String {
    s.replace("**", "").trim_matches(|c: char| c == '*' || c.is_whitespace()).to_string()
}

/// Bullet lines if there are any, otherwise the first few substantial sentences.
fn extract_reasons(block: &str) -> Vec<String> {
    let bullets: Vec<String> = block.lines().filter_map(bullet_text).collect();
    if !bullets.is_empty() {
        return bullets;
    }

    block
        .split('.')
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .take(MAX_SENTENCES)
        .map(str::to_string)
        .collect()
}

/// Text of a `-`, `•` or `*` bullet line. Bold markers are not bullets.
fn bullet_text(line: &str) -> Option<String> {
    let line = line.trim_start();
    let rest = if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        rest
    } else if line.starts_with('*') && !line.starts_with("**") {
        &line[1..]
    } else {
        return None;
    };

    let text = strip_emphasis(rest);
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANSWER: &str = "Here is my ranking:\n\n\
        1. **Sarah Johnson** - Score: 92\n\
        - Budget already approved: \"we've got $80K set aside\"\n\
        - Wants to sign this week\n\
        - VP of Sales with full authority\n\n\
        2. Emma Wilson – Score: 85\n\
        * Expansion budget allocated\n\
        * \"This is a no-brainer for us\"\n\n\
        3. Carlos Mendez - Confidence: 30\n\
        Carlos is only window shopping for now. He mentioned there is no burning need at all.";

    #[test]
    fn test_parses_ranked_triples() {
        let leads = parse_lead_scores(ANSWER);
        let triples: Vec<_> = leads
            .iter()
            .map(|l| (l.rank, l.name.as_str(), l.score))
            .collect();

        assert_eq!(
            triples,
            vec![
                (1, "Sarah Johnson", 92),
                (2, "Emma Wilson", 85),
                (3, "Carlos Mendez", 30),
            ]
        );
    }

    #[test]
    fn test_reasoning_from_bullets_then_sentences() {
        let leads = parse_lead_scores(ANSWER);

        assert_eq!(leads[0].reasoning.len(), 3);
        assert_eq!(leads[0].reasoning[1], "Wants to sign this week");
        assert_eq!(leads[1].reasoning[1], "\"This is a no-brainer for us\"");

        assert_eq!(
            leads[2].reasoning,
            vec![
                "Carlos is only window shopping for now",
                "He mentioned there is no burning need at all"
            ]
        );
        assert!(leads[2].raw_text.starts_with("Carlos is only"));
    }

    #[test]
    fn test_unstructured_text_yields_nothing() {
        assert!(parse_lead_scores("").is_empty());
        assert!(parse_lead_scores("I could not find any transcripts to analyse.").is_empty());
        assert!(parse_lead_scores("No analysis could be generated.").is_empty());
    }

    #[test]
    fn test_scores_are_clamped() {
        let leads = parse_lead_scores("1. Sarah Johnson - Score: 150\n2. David Park - Score: -5\n");
        assert_eq!(leads[0].score, 100);
        assert_eq!(leads[1].score, 0);

        let leads = parse_lead_scores("1. Nina Patel - Score: 99999999999999999999999");
        assert_eq!(leads[0].score, 100);
    }

    #[test]
    fn test_fallback_without_scores_defaults_to_70() {
        let text = "1. Nina Patel: strong intent, signing Friday.\n2. David Park - needs committee approval.";
        let leads = parse_lead_scores(text);

        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Nina Patel");
        assert_eq!(leads[0].score, DEFAULT_SCORE);
        assert_eq!(leads[1].name, "David Park");
        assert_eq!(leads[1].rank, 2);
    }

    #[test]
    fn test_bold_header_is_not_a_bullet() {
        assert_eq!(bullet_text("**Why:** because"), None);
        assert_eq!(bullet_text("  * **Budget** approved"), Some("Budget approved".into()));
        assert_eq!(bullet_text("-"), None);
    }
}
