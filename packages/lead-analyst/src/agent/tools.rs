//! The agent's two tools: transcript retrieval and profile enrichment.

use serde::Serialize;
use tracing::warn;

use crate::context::{format_context, NO_TRANSCRIPT_DATA};
use crate::enrichment::format_profile;
use crate::error::{AnalystError, Result};
use crate::index::SemanticIndex;
use crate::traits::{embedder::Embedder, index::VectorIndex, profiles::ProfileProvider};

/// Returned by the enrichment tool for blank input.
pub const EMPTY_LEAD_NAME: &str = "Please provide a lead name to search.";

/// Tools the agent can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ToolKind {
    /// Similarity search over indexed transcript chunks
    VectorSearch,

    /// Simulated professional-profile lookup
    LinkedInSearch,
}

impl ToolKind {
    /// Every tool, in registry order.
    pub const ALL: &'static [ToolKind] = &[ToolKind::VectorSearch, ToolKind::LinkedInSearch];

    /// Name the reasoner uses to call this tool.
    pub fn name(&self) -> &'static str {
        match self {
            Self::VectorSearch => "VectorSearchTool",
            Self::LinkedInSearch => "LinkedInSearchTool",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::VectorSearch => {
                "Search sales call transcripts stored in the vector index. \
                 Use this to find buying signals, objections, budget mentions, timelines, \
                 and decision-maker indicators from actual sales conversations. \
                 Input: a natural language query about leads or buying intent."
            }
            Self::LinkedInSearch => {
                "Look up a lead's LinkedIn profile to get their job title, seniority, \
                 company size, industry, and whether they are a decision-maker. \
                 Input: the full name of the lead (e.g. 'Sarah Johnson'). \
                 Use this AFTER identifying lead names from transcript search."
            }
        }
    }

    /// Resolve a tool by the name the reasoner wrote.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// Observation for a tool name that is not registered.
pub fn unknown_tool_message(name: &str) -> String {
    let valid = ToolKind::ALL
        .iter()
        .map(|t| t.name())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} is not a valid tool, try one of [{}].", name.trim(), valid)
}

/// Strip surrounding whitespace and quotes.
fn clean_lead_name(input: &str) -> &str {
    input
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
}

/// Observation produced by one tool call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub observation: String,

    /// False when the observation describes a failure
    pub succeeded: bool,
}

/// Executes tool calls against the index and profile provider.
pub struct Toolbox<'a, I, E, P> {
    index: &'a SemanticIndex<I, E>,
    profiles: &'a P,
    retrieval_k: usize,
}

impl<'a, I, E, P> Toolbox<'a, I, E, P>
where
    I: VectorIndex,
    E: Embedder,
    P: ProfileProvider,
{
    pub fn new(index: &'a SemanticIndex<I, E>, profiles: &'a P, retrieval_k: usize) -> Self {
        Self {
            index,
            profiles,
            retrieval_k,
        }
    }

    /// Run a tool, surfacing failures as errors.
    pub async fn call(&self, tool: ToolKind, input: &str) -> Result<String> {
        match tool {
            ToolKind::VectorSearch => {
                let hits = self
                    .index
                    .query(input, self.retrieval_k)
                    .await
                    .map_err(|e| AnalystError::Retrieval(e.to_string()))?;
                Ok(format_context(hits.iter().map(|h| &h.chunk)))
            }
            ToolKind::LinkedInSearch => {
                let name = clean_lead_name(input);
                if name.is_empty() {
                    return Ok(EMPTY_LEAD_NAME.to_string());
                }
                let profile = self.profiles.lookup(name).await?;
                Ok(format_profile(&profile))
            }
        }
    }

    /// Run a tool; failures become a `"<Tool> failed: <message>"` observation.
    pub async fn invoke(&self, tool: ToolKind, input: &str) -> ToolOutput {
        match self.call(tool, input).await {
            Ok(observation) => ToolOutput {
                observation,
                succeeded: true,
            },
            Err(e) => ToolOutput {
                observation: failure_observation(tool, &e),
                succeeded: false,
            },
        }
    }
}

/// Observation recorded when a tool call fails.
pub fn failure_observation(tool: ToolKind, err: &AnalystError) -> String {
    warn!(tool = tool.name(), error = %err, "Tool execution failed");
    format!("{} failed: {}", tool.name(), err)
}

/// Whether a retrieval observation carries transcript text.
pub fn is_useful_context(observation: &str) -> bool {
    !observation.trim().is_empty() && observation != NO_TRANSCRIPT_DATA
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::SimulatedProfiles;
    use crate::stores::MemoryIndex;
    use crate::testing::{FailingProfiles, MockEmbedder};
    use crate::types::chunk::TranscriptChunk;

    #[test]
    fn test_tool_names_round_trip() {
        for tool in ToolKind::ALL {
            assert_eq!(ToolKind::from_name(tool.name()), Some(*tool));
        }
        assert_eq!(ToolKind::from_name("  LinkedInSearchTool "), Some(ToolKind::LinkedInSearch));
        assert_eq!(ToolKind::from_name("WebSearch"), None);
        assert_eq!(
            unknown_tool_message("WebSearch"),
            "WebSearch is not a valid tool, try one of [VectorSearchTool, LinkedInSearchTool]."
        );
    }

    #[test]
    fn test_clean_lead_name() {
        assert_eq!(clean_lead_name("  \"Sarah Johnson\" "), "Sarah Johnson");
        assert_eq!(clean_lead_name("'Nina Patel'"), "Nina Patel");
        assert_eq!(clean_lead_name(" '' "), "");
        assert_eq!(clean_lead_name("\"' Sarah Johnson '\""), "Sarah Johnson");
    }

    #[tokio::test]
    async fn test_enrichment_blank_input_skips_provider() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        // Provider would fail if called
        let profiles = FailingProfiles::new("should not be called");
        let toolbox = Toolbox::new(&index, &profiles, 10);

        let output = toolbox.invoke(ToolKind::LinkedInSearch, "  \"\" ").await;
        assert_eq!(output.observation, EMPTY_LEAD_NAME);
        assert!(output.succeeded);
        assert_eq!(profiles.calls(), 0);
    }

    #[tokio::test]
    async fn test_enrichment_formats_profile() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        let toolbox = Toolbox::new(&index, &SimulatedProfiles, 10);

        let observation = toolbox
            .invoke(ToolKind::LinkedInSearch, "'Emma Wilson'")
            .await
            .observation;
        assert!(observation.starts_with("LinkedIn Profile for Emma Wilson:\n"));
    }

    #[tokio::test]
    async fn test_failures_become_observations() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        let profiles = FailingProfiles::new("provider offline");
        let toolbox = Toolbox::new(&index, &profiles, 10);

        let output = toolbox.invoke(ToolKind::LinkedInSearch, "Emma Wilson").await;
        assert!(!output.succeeded);
        assert!(output.observation.starts_with("LinkedInSearchTool failed: "));
        assert!(output.observation.contains("provider offline"));
    }

    #[tokio::test]
    async fn test_retrieval_on_empty_index_returns_sentinel() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        let toolbox = Toolbox::new(&index, &SimulatedProfiles, 10);

        let observation = toolbox.invoke(ToolKind::VectorSearch, "budget").await.observation;
        assert_eq!(observation, NO_TRANSCRIPT_DATA);
        assert!(!is_useful_context(&observation));
    }

    #[tokio::test]
    async fn test_retrieval_groups_context() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        index
            .upsert(&[TranscriptChunk::new(" Budget approved. ", "Sarah Johnson", "s.txt", 0)])
            .await
            .unwrap();
        let toolbox = Toolbox::new(&index, &SimulatedProfiles, 10);

        let observation = toolbox.invoke(ToolKind::VectorSearch, "budget").await.observation;
        assert_eq!(observation, "\n=== Lead: Sarah Johnson ===\nBudget approved.");
        assert!(is_useful_context(&observation));
    }

    #[tokio::test]
    async fn test_padded_quoted_name_matches_plain_lookup() {
        let index = SemanticIndex::new(MemoryIndex::new(), MockEmbedder::new());
        let toolbox = Toolbox::new(&index, &SimulatedProfiles, 10);

        let padded = toolbox
            .invoke(ToolKind::LinkedInSearch, "\"' Sarah Johnson '\"")
            .await;
        let plain = toolbox.invoke(ToolKind::LinkedInSearch, "Sarah Johnson").await;
        assert_eq!(padded, plain);
    }
}
