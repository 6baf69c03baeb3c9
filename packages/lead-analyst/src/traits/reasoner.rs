//! Reasoning capability driving the agent loop.
//!
//! A `Reasoner` sees the fixed instructions, the manager's question, the
//! tool registry and everything observed so far, and decides the next move.

use async_trait::async_trait;

use crate::agent::scratchpad::Scratchpad;
use crate::agent::tools::ToolKind;
use crate::error::Result;

/// Everything the reasoner sees on one think step.
#[derive(Debug, Clone, Copy)]
pub struct ReasoningRequest<'a> {
    /// Scoring rubric and output format
    pub instructions: &'a str,

    /// The manager's question
    pub question: &'a str,

    /// Tools the reasoner may call
    pub tools: &'a [ToolKind],

    /// Prior thoughts, actions and observations
    pub scratchpad: &'a Scratchpad,
}

/// The reasoner's decision for one think step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasoningStep {
    /// Call a tool with a single text input.
    Action {
        thought: Option<String>,
        tool: String,
        input: String,
    },

    /// Stop and answer.
    Final { answer: String },

    /// Output could not be read as an action or an answer.
    ///
    /// Fed back to the reasoner as an observation; the loop continues.
    Malformed { raw: String, error: String },
}

impl ReasoningStep {
    /// Convenience constructor for an action without a thought.
    pub fn action(tool: impl Into<String>, input: impl Into<String>) -> Self {
        Self::Action {
            thought: None,
            tool: tool.into(),
            input: input.into(),
        }
    }

    /// Convenience constructor for a final answer.
    pub fn final_answer(answer: impl Into<String>) -> Self {
        Self::Final {
            answer: answer.into(),
        }
    }
}

/// A language model (or stand-in) that chooses tool calls and answers.
///
/// An `Err` means the backend itself is unavailable; the loop stops and
/// returns whatever it gathered. Unparseable output should be reported as
/// [`ReasoningStep::Malformed`] instead.
#[async_trait]
pub trait Reasoner: Send + Sync {
    async fn next_step(&self, request: &ReasoningRequest<'_>) -> Result<ReasoningStep>;
}
