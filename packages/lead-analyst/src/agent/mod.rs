//! Tool-augmented reasoning loop.
//!
//! The loop alternates between asking the [`Reasoner`] for its next move and
//! executing the tool it picked:
//!
//! ```text
//! Think ─▶ Act ─▶ Observe ─▶ Think ─▶ ... ─▶ Done
//!   │                                          ▲
//!   └── cap reached / cancelled / reasoner down ─▶ Failed (best partial answer)
//! ```
//!
//! Nothing that happens inside the loop is returned as an error. Tool
//! failures, unknown tools and unparseable output are all fed back to the
//! reasoner as observations; the iteration cap bounds the whole run.

pub mod prompts;
pub mod react;
pub mod scratchpad;
pub mod tools;

use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::traits::{
    embedder::Embedder,
    index::VectorIndex,
    profiles::ProfileProvider,
    reasoner::{Reasoner, ReasoningRequest, ReasoningStep},
};
use crate::types::config::AgentConfig;

use self::prompts::{INCOMPLETE_PREFIX, NO_ANALYSIS};
use self::scratchpad::Scratchpad;
use self::tools::{is_useful_context, unknown_tool_message, ToolKind, Toolbox};

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoopOutcome {
    /// The reasoner produced a final answer
    Completed,

    /// The iteration cap was reached first
    Exhausted,

    /// The cancellation token fired
    Cancelled,

    /// The reasoning backend returned an error
    ReasonerFailed,
}

/// Result of one run of the loop.
#[derive(Debug, Clone, Serialize)]
pub struct LoopReport {
    /// Final answer, or the best partial answer when the run failed
    pub answer: String,

    pub outcome: LoopOutcome,

    /// Think steps taken (reasoner calls)
    pub iterations: usize,

    /// Names of the tools called, in order
    pub tool_calls: Vec<String>,
}

enum State {
    Think,
    Act {
        thought: Option<String>,
        tool: String,
        input: String,
    },
    Observe {
        thought: Option<String>,
        tool: String,
        input: String,
        observation: String,
    },
    Done {
        answer: String,
    },
    Failed {
        outcome: LoopOutcome,
    },
}

/// Drives a [`Reasoner`] against a [`Toolbox`].
pub struct ReasoningLoop<'a, R, I, E, P> {
    reasoner: &'a R,
    toolbox: Toolbox<'a, I, E, P>,
    instructions: &'a str,
    max_iterations: usize,
    cancel: Option<CancellationToken>,
}

impl<'a, R, I, E, P> ReasoningLoop<'a, R, I, E, P>
where
    R: Reasoner,
    I: VectorIndex,
    E: Embedder,
    P: ProfileProvider,
{
    pub fn new(
        reasoner: &'a R,
        toolbox: Toolbox<'a, I, E, P>,
        instructions: &'a str,
        config: &AgentConfig,
    ) -> Self {
        Self {
            reasoner,
            toolbox,
            instructions,
            max_iterations: config.max_iterations,
            cancel: None,
        }
    }

    /// Stop between iterations once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Answer `question`. Never fails; see [`LoopOutcome`] for how it ended.
    pub async fn run(&self, question: &str) -> LoopReport {
        let mut scratchpad = Scratchpad::new();
        let mut iterations = 0;
        let mut tool_calls: Vec<String> = Vec::new();
        let mut last_context: Option<String> = None;
        let mut state = State::Think;

        loop {
            state = match state {
                State::Think => {
                    if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
                        info!(iterations, "Agent cancelled");
                        State::Failed {
                            outcome: LoopOutcome::Cancelled,
                        }
                    } else if iterations >= self.max_iterations {
                        warn!(
                            max_iterations = self.max_iterations,
                            "Agent reached max iterations"
                        );
                        State::Failed {
                            outcome: LoopOutcome::Exhausted,
                        }
                    } else {
                        iterations += 1;
                        info!(
                            iteration = iterations,
                            steps = scratchpad.len(),
                            "Agent iteration starting"
                        );
                        self.think(question, &mut scratchpad).await
                    }
                }

                State::Act {
                    thought,
                    tool,
                    input,
                } => {
                    info!(tool = %tool, input = %input, "Executing tool call");
                    tool_calls.push(tool.clone());

                    let observation = match ToolKind::from_name(&tool) {
                        Some(kind) => {
                            let output = self.toolbox.invoke(kind, &input).await;
                            if output.succeeded
                                && kind == ToolKind::VectorSearch
                                && is_useful_context(&output.observation)
                            {
                                last_context = Some(output.observation.clone());
                            }
                            output.observation
                        }
                        None => {
                            warn!(tool = %tool, "Unknown tool requested");
                            unknown_tool_message(&tool)
                        }
                    };

                    State::Observe {
                        thought,
                        tool,
                        input,
                        observation,
                    }
                }

                State::Observe {
                    thought,
                    tool,
                    input,
                    observation,
                } => {
                    info!(
                        tool = %tool,
                        result_len = observation.len(),
                        result_preview = %truncate_for_log(&observation, 200),
                        "Tool execution complete"
                    );
                    scratchpad.record(thought, &tool, &input, observation);
                    State::Think
                }

                State::Done { answer } => {
                    info!(
                        iterations,
                        tool_calls_total = tool_calls.len(),
                        response_len = answer.len(),
                        "Agent finished - final answer received"
                    );
                    let answer = if answer.trim().is_empty() {
                        NO_ANALYSIS.to_string()
                    } else {
                        answer
                    };
                    return LoopReport {
                        answer,
                        outcome: LoopOutcome::Completed,
                        iterations,
                        tool_calls,
                    };
                }

                State::Failed { outcome } => {
                    return LoopReport {
                        answer: partial_answer(last_context.as_deref()),
                        outcome,
                        iterations,
                        tool_calls,
                    };
                }
            };
        }
    }

    async fn think(&self, question: &str, scratchpad: &mut Scratchpad) -> State {
        let request = ReasoningRequest {
            instructions: self.instructions,
            question,
            tools: ToolKind::ALL,
            scratchpad: &*scratchpad,
        };

        match self.reasoner.next_step(&request).await {
            Ok(ReasoningStep::Action {
                thought,
                tool,
                input,
            }) => State::Act {
                thought,
                tool,
                input,
            },
            Ok(ReasoningStep::Final { answer }) => State::Done { answer },
            Ok(ReasoningStep::Malformed { raw, error }) => {
                warn!(error = %error, raw = %truncate_for_log(&raw, 200), "Unparseable reasoner output");
                scratchpad.record_malformed(&raw, error);
                State::Think
            }
            Err(e) => {
                warn!(error = %e, "Reasoner failed");
                State::Failed {
                    outcome: LoopOutcome::ReasonerFailed,
                }
            }
        }
    }
}

/// Best answer available when the loop stops without a final answer.
fn partial_answer(last_context: Option<&str>) -> String {
    match last_context {
        Some(context) => {
            debug!(context_len = context.len(), "Returning partial context");
            format!(
                "{}\n\nLast retrieved transcript context:\n{}",
                INCOMPLETE_PREFIX, context
            )
        }
        None => NO_ANALYSIS.to_string(),
    }
}

/// Truncate a string for logging purposes.
pub(crate) fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((idx, _)) => format!(
            "{}...[truncated {} chars]",
            &s[..idx],
            s[idx..].chars().count()
        ),
    }
}
