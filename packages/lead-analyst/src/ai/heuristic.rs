//! Deterministic offline reasoner.
//!
//! `RuleBasedReasoner` drives the same tool loop a language model would:
//! it runs a fixed set of transcript searches, enriches every lead it saw,
//! then scores each lead from buying-signal phrases in the retrieved text.
//! It exists so the full pipeline can run without network access and so the
//! end-to-end behaviour is reproducible in tests.

use async_trait::async_trait;
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use crate::agent::tools::ToolKind;
use crate::error::Result;
use crate::traits::reasoner::{Reasoner, ReasoningRequest, ReasoningStep};
use crate::types::chunk::UNKNOWN_LEAD;

static RE_LEAD_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^=== Lead: (.+?) ===$").unwrap());

/// Queries sent to the transcript search, in order.
pub const SEARCH_QUERIES: &[&str] = &[
    "budget approved, ready to sign a contract, timeline this month",
    "objections, no budget, not urgent, evaluating later",
    "decision maker authority and approval process",
];

/// Leads enriched before answering.
pub const MAX_ENRICHED_LEADS: usize = 8;

const BASE_SCORE: i32 = 50;
const PROFILE_BONUS: i32 = 5;
const MAX_QUOTE_CHARS: usize = 160;

/// A phrase that moves a lead's score when it appears in their transcript.
pub struct Signal {
    pub phrase: &'static str,
    pub weight: i32,
    pub label: &'static str,
}

const fn signal(phrase: &'static str, weight: i32, label: &'static str) -> Signal {
    Signal {
        phrase,
        weight,
        label,
    }
}

/// Buying and stalling signals. Matched case-insensitively, once per lead.
pub static SIGNALS: &[Signal] = &[
    signal("approved", 8, "Budget or purchase already approved"),
    signal("allocated", 8, "Funds allocated for this purchase"),
    signal("$", 8, "Discussed concrete dollar amounts"),
    signal("full authority", 8, "Has full signing authority"),
    signal("move fast", 8, "Explicitly wants to move fast"),
    signal("no-brainer", 8, "Called the purchase a no-brainer"),
    signal("set aside", 8, "Budget set aside for tooling"),
    signal("ready to sign", 8, "Ready to sign"),
    signal("contract", 8, "Contract terms already on the table"),
    signal("this week", 8, "Next step scheduled this week"),
    signal("not in a position", -8, "Says they are not in a position to buy"),
    signal("frozen", -8, "Budget is frozen"),
    signal("no rush", -8, "No urgency on their side"),
    signal("window shopping", -8, "Only window shopping"),
    signal("rfp", -8, "Formal RFP process required"),
    signal("months", -8, "Timeline measured in months"),
    signal("no burning need", -8, "No burning need"),
    signal("committee", -8, "Decision involves a committee"),
    signal("no point rushing", -8, "Sees no point rushing"),
];

/// Offline stand-in for a language model.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedReasoner;

impl RuleBasedReasoner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Reasoner for RuleBasedReasoner {
    async fn next_step(&self, request: &ReasoningRequest<'_>) -> Result<ReasoningStep> {
        let pad = request.scratchpad;
        let can_search = request.tools.contains(&ToolKind::VectorSearch);
        let can_enrich = request.tools.contains(&ToolKind::LinkedInSearch);

        let searches = pad.inputs_for(ToolKind::VectorSearch.name()).count();
        if can_search && searches < SEARCH_QUERIES.len() {
            return Ok(ReasoningStep::Action {
                thought: Some("I need more transcript evidence before ranking.".into()),
                tool: ToolKind::VectorSearch.name().into(),
                input: SEARCH_QUERIES[searches].into(),
            });
        }

        let transcripts = collect_lead_text(pad.observations_for(ToolKind::VectorSearch.name()));

        if can_enrich {
            let enriched: Vec<&str> = pad.inputs_for(ToolKind::LinkedInSearch.name()).collect();
            let pending = transcripts
                .iter()
                .take(MAX_ENRICHED_LEADS)
                .find(|(name, _)| !enriched.contains(&name.as_str()));

            if let Some((name, _)) = pending {
                return Ok(ReasoningStep::Action {
                    thought: Some(format!("I should check {}'s professional background.", name)),
                    tool: ToolKind::LinkedInSearch.name().into(),
                    input: name.clone(),
                });
            }
        }

        let profiles: HashMap<&str, &str> = pad
            .steps()
            .iter()
            .filter(|s| s.tool.as_deref() == Some(ToolKind::LinkedInSearch.name()))
            .filter_map(|s| s.input.as_deref().map(|i| (i, s.observation.as_str())))
            .collect();

        Ok(ReasoningStep::final_answer(rank_leads(&transcripts, &profiles)))
    }
}

/// Transcript text per lead, leads in order of first appearance.
///
/// Repeated lines (the same chunk retrieved by several searches) are kept once.
fn collect_lead_text<'a>(observations: impl Iterator<Item = &'a str>) -> Vec<(String, String)> {
    let mut leads: Vec<(String, Vec<&'a str>)> = Vec::new();

    for observation in observations {
        let mut current: Option<usize> = None;
        for line in observation.lines() {
            if let Some(caps) = RE_LEAD_HEADER.captures(line.trim()) {
                let name = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();
                current = match leads.iter().position(|(n, _)| n == name) {
                    Some(i) => Some(i),
                    None => {
                        leads.push((name.to_string(), Vec::new()));
                        Some(leads.len() - 1)
                    }
                };
                continue;
            }

            if let Some(i) = current {
                let lines = &mut leads[i].1;
                if !line.trim().is_empty() && !lines.contains(&line) {
                    lines.push(line);
                }
            }
        }
    }

    leads
        .into_iter()
        .filter(|(name, _)| !name.is_empty() && name != UNKNOWN_LEAD)
        .map(|(name, lines)| (name, lines.join("\n")))
        .collect()
}

struct Assessment<'a> {
    name: &'a str,
    score: u8,
    reasons: Vec<String>,
}

fn rank_leads(transcripts: &[(String, String)], profiles: &HashMap<&str, &str>) -> String {
    if transcripts.is_empty() {
        return "No leads could be identified in the indexed transcripts.".to_string();
    }

    let mut assessments: Vec<Assessment> = transcripts
        .iter()
        .map(|(name, text)| assess(name, text, profiles.get(name.as_str()).copied()))
        .collect();
    // Stable: ties keep first-appearance order
    assessments.sort_by(|a, b| b.score.cmp(&a.score));

    assessments
        .iter()
        .enumerate()
        .map(|(i, a)| {
            let mut entry = format!("{}. {} - Score: {}", i + 1, a.name, a.score);
            for reason in &a.reasons {
                entry.push_str("\n- ");
                entry.push_str(reason);
            }
            entry
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn assess<'a>(name: &'a str, text: &str, profile: Option<&str>) -> Assessment<'a> {
    let lower = text.to_lowercase();
    let matched: Vec<&Signal> = SIGNALS.iter().filter(|s| lower.contains(s.phrase)).collect();

    let mut score = BASE_SCORE + matched.iter().map(|s| s.weight).sum::<i32>();
    let decision_maker = profile.and_then(profile_field_decision_maker);
    score += match decision_maker {
        Some(true) => PROFILE_BONUS,
        Some(false) => -PROFILE_BONUS,
        None => 0,
    };
    let score = score.clamp(0, 100) as u8;

    // Lead with the signals that agree with the verdict
    let buying = score >= 50;
    let mut ordered: Vec<&Signal> = matched
        .iter()
        .copied()
        .filter(|s| (s.weight > 0) == buying)
        .collect();
    ordered.extend(matched.iter().copied().filter(|s| (s.weight > 0) != buying));

    let mut reasons: Vec<String> = ordered.iter().take(2).map(|s| s.label.to_string()).collect();
    if reasons.is_empty() {
        reasons.push("No clear buying or stalling signals in the transcript".into());
    }
    if let Some(quote) = ordered.first().and_then(|s| quote_for(text, s.phrase)) {
        reasons.push(format!("Quote: \"{}\"", quote));
    }
    reasons.push(match profile.and_then(profile_field_title) {
        Some(title) => format!(
            "LinkedIn: {}{}",
            title,
            match decision_maker {
                Some(true) => ", decision-maker",
                Some(false) => ", not a decision-maker",
                None => "",
            }
        ),
        None => "LinkedIn: no profile available".into(),
    });
    reasons.push(
        if score >= 75 {
            "Strong signals point to a purchase within the month"
        } else if score >= 50 {
            "Some interest, but the timing is uncertain"
        } else {
            "Unlikely to buy in the next month"
        }
        .into(),
    );

    Assessment {
        name,
        score,
        reasons,
    }
}

/// First sentence of `text` containing `phrase` (case-insensitive).
fn quote_for(text: &str, phrase: &str) -> Option<String> {
    text.split(['.', '!', '?', '\n'])
        .map(str::trim)
        .find(|sentence| sentence.to_lowercase().contains(phrase))
        .map(|sentence| match sentence.char_indices().nth(MAX_QUOTE_CHARS) {
            Some((idx, _)) => format!("{}...", &sentence[..idx]),
            None => sentence.to_string(),
        })
}

fn profile_field<'a>(profile: &'a str, label: &str) -> Option<&'a str> {
    profile
        .lines()
        .find_map(|line| line.trim().strip_prefix(label))
        .map(str::trim)
}

fn profile_field_title(profile: &str) -> Option<&str> {
    profile_field(profile, "Job Title:")
}

fn profile_field_decision_maker(profile: &str) -> Option<bool> {
    match profile_field(profile, "Decision Maker:")? {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::scratchpad::Scratchpad;
    use crate::output::parse_lead_scores;

    fn request<'a>(pad: &'a Scratchpad) -> ReasoningRequest<'a> {
        ReasoningRequest {
            instructions: "",
            question: "Who will buy?",
            tools: ToolKind::ALL,
            scratchpad: pad,
        }
    }

    const CONTEXT: &str = "\n=== Lead: Sarah Johnson ===\n\
        Our CFO approved a budget. We have $80,000 allocated.\n\
        I want to move fast and sign the contract this week.\n\
        === Lead: David Park ===\n\
        We're not in a position to buy. Budgets are frozen. No rush at all.";

    #[tokio::test]
    async fn test_searches_before_enriching() {
        let reasoner = RuleBasedReasoner::new();
        let mut pad = Scratchpad::new();

        for query in SEARCH_QUERIES {
            let step = reasoner.next_step(&request(&pad)).await.unwrap();
            let ReasoningStep::Action { tool, input, .. } = step else {
                panic!("expected a search action");
            };
            assert_eq!(tool, "VectorSearchTool");
            assert_eq!(input, *query);
            pad.record(None, &tool, &input, CONTEXT);
        }

        let step = reasoner.next_step(&request(&pad)).await.unwrap();
        assert_eq!(step, ReasoningStep::Action {
            thought: Some("I should check Sarah Johnson's professional background.".into()),
            tool: "LinkedInSearchTool".into(),
            input: "Sarah Johnson".into(),
        });
    }

    #[tokio::test]
    async fn test_final_answer_ranks_by_signals() {
        let reasoner = RuleBasedReasoner::new();
        let mut pad = Scratchpad::new();
        for query in SEARCH_QUERIES {
            pad.record(None, "VectorSearchTool", query, CONTEXT);
        }
        pad.record(None, "LinkedInSearchTool", "Sarah Johnson", "  Job Title: CEO\n  Decision Maker: Yes\n");
        pad.record(None, "LinkedInSearchTool", "David Park", "  Job Title: Analyst\n  Decision Maker: No\n");

        let ReasoningStep::Final { answer } = reasoner.next_step(&request(&pad)).await.unwrap() else {
            panic!("expected a final answer");
        };

        let leads = parse_lead_scores(&answer);
        assert_eq!(leads.len(), 2);
        assert_eq!(leads[0].name, "Sarah Johnson");
        assert_eq!(leads[0].score, 100);
        assert_eq!(leads[1].name, "David Park");
        assert!(leads[1].score < 50);
        assert!(leads[0].reasoning.iter().any(|r| r.starts_with("Quote: \"")));
        assert!(leads[0].reasoning.iter().any(|r| r == "LinkedIn: CEO, decision-maker"));
        assert!(leads[1].reasoning.len() >= 3);
    }

    #[tokio::test]
    async fn test_empty_index_answers_immediately_after_searching() {
        let reasoner = RuleBasedReasoner::new();
        let mut pad = Scratchpad::new();
        for query in SEARCH_QUERIES {
            pad.record(None, "VectorSearchTool", query, "No relevant transcript data found.");
        }

        let step = reasoner.next_step(&request(&pad)).await.unwrap();
        assert!(matches!(step, ReasoningStep::Final { ref answer } if answer.starts_with("No leads")));
    }

    #[test]
    fn test_collect_lead_text_dedupes_and_skips_unknown() {
        let first = "\n=== Lead: Nina Patel ===\nset aside $50,000\n=== Lead: Unknown ===\nhello";
        let second = "\n=== Lead: Nina Patel ===\nset aside $50,000\nmove fast";
        let leads = collect_lead_text([first, second].into_iter());

        assert_eq!(
            leads,
            vec![("Nina Patel".to_string(), "set aside $50,000\nmove fast".to_string())]
        );
    }

    #[test]
    fn test_quote_for_finds_sentence() {
        let text = "Thanks for the time. Our budgets are frozen until July! Call me later.";
        assert_eq!(quote_for(text, "frozen").as_deref(), Some("Our budgets are frozen until July"));
        assert_eq!(quote_for(text, "contract"), None);
    }
}
