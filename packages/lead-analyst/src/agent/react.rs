//! Parser for the `Thought / Action / Action Input / Final Answer` text
//! protocol used by reasoners without native tool calling.

use regex::Regex;
use std::sync::LazyLock;

use crate::traits::reasoner::ReasoningStep;

const FINAL_ANSWER: &str = "Final Answer:";

static RE_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Action\s*\d*\s*:\s*(.*?)\s*Action\s*\d*\s*Input\s*\d*\s*:\s*(.*)").unwrap()
});
static RE_ACTION_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)Action\s*\d*\s*:\s*(.*?)").unwrap());
static RE_ACTION_INPUT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\s*Action\s*\d*\s*Input\s*\d*\s*:\s*(.*)").unwrap());

pub const MISSING_ACTION: &str = "Invalid Format: Missing 'Action:' after 'Thought:'";
pub const MISSING_ACTION_INPUT: &str = "Invalid Format: Missing 'Action Input:' after 'Action:'";
pub const BOTH_ACTION_AND_ANSWER: &str =
    "Invalid Format: Output contains both a final answer and a parse-able action";

/// Parse one reasoner completion.
pub fn parse_react_output(text: &str) -> ReasoningStep {
    let includes_answer = text.contains(FINAL_ANSWER);

    if let Some(caps) = RE_ACTION.captures(text) {
        if includes_answer {
            return malformed(text, BOTH_ACTION_AND_ANSWER);
        }

        let (Some(whole), Some(tool), Some(input)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            return malformed(text, MISSING_ACTION);
        };

        let thought = text[..whole.start()]
            .trim()
            .trim_start_matches("Thought:")
            .trim();

        // Anything the model hallucinated past the input is dropped
        let input = input.as_str().split("\nObservation").next().unwrap_or("");

        return ReasoningStep::Action {
            thought: (!thought.is_empty()).then(|| thought.to_string()),
            tool: tool.as_str().trim().to_string(),
            input: input.trim().trim_matches('"').to_string(),
        };
    }

    if includes_answer {
        let answer = text.rsplit(FINAL_ANSWER).next().unwrap_or("").trim();
        return ReasoningStep::final_answer(answer);
    }

    if !RE_ACTION_ONLY.is_match(text) {
        malformed(text, MISSING_ACTION)
    } else if !RE_ACTION_INPUT.is_match(text) {
        malformed(text, MISSING_ACTION_INPUT)
    } else {
        malformed(text, "Invalid Format: Could not parse LLM output")
    }
}

fn malformed(raw: &str, error: &str) -> ReasoningStep {
    ReasoningStep::Malformed {
        raw: raw.to_string(),
        error: error.to_string(),
    }
}
