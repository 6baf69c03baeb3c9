//! Running log of the agent's actions and observations.

use serde::Serialize;

/// One completed think/act/observe cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    /// Reasoner output as it would appear in the text protocol
    pub log: String,

    /// Tool called, if the output parsed as an action
    pub tool: Option<String>,

    /// Tool input, if the output parsed as an action
    pub input: Option<String>,

    pub observation: String,
}

/// Ordered record of everything the agent has done so far.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scratchpad {
    steps: Vec<Step>,
}

impl Scratchpad {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tool call and its observation.
    pub fn record(
        &mut self,
        thought: Option<String>,
        tool: &str,
        input: &str,
        observation: impl Into<String>,
    ) {
        let action = format!("Action: {}\nAction Input: {}", tool, input);
        let log = match thought {
            Some(t) => format!("{}\n{}", t.trim(), action),
            None => action,
        };
        self.steps.push(Step {
            log,
            tool: Some(tool.to_string()),
            input: Some(input.to_string()),
            observation: observation.into(),
        });
    }

    /// Record output that could not be parsed, with the error fed back.
    pub fn record_malformed(&mut self, raw: &str, observation: impl Into<String>) {
        self.steps.push(Step {
            log: raw.trim().to_string(),
            tool: None,
            input: None,
            observation: observation.into(),
        });
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Inputs already sent to `tool`, oldest first.
    pub fn inputs_for<'a>(&'a self, tool: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.steps
            .iter()
            .filter(move |s| s.tool.as_deref() == Some(tool))
            .filter_map(|s| s.input.as_deref())
    }

    /// Observations returned by `tool`, oldest first.
    pub fn observations_for<'a>(&'a self, tool: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.steps
            .iter()
            .filter(move |s| s.tool.as_deref() == Some(tool))
            .map(|s| s.observation.as_str())
    }

    /// Text-protocol rendering: each step's log, its observation, then a
    /// fresh `Thought: ` prompt.
    pub fn render(&self) -> String {
        self.steps
            .iter()
            .map(|s| format!("{}\nObservation: {}\nThought: ", s.log, s.observation))
            .collect()
    }
}
