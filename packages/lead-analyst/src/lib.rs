//! Sales Lead Analyst
//!
//! Ranks sales leads by their likelihood of buying within the next month,
//! using the evidence in recorded sales-call transcripts.
//!
//! Transcripts are split into overlapping chunks, tagged with the lead they
//! belong to, embedded and stored in a vector index. A tool-using reasoning
//! loop then searches that index, looks up each lead's (simulated)
//! professional profile, and writes a ranked answer, which the output parser
//! turns back into structured [`RankedLead`]s.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lead_analyst::{LeadAnalyst, SqliteIndex};
//! use lead_analyst::ai::OpenAI;
//!
//! let ai = OpenAI::from_env()?;
//! let index = SqliteIndex::open("./chroma_db", "sales_leads").await?;
//! let analyst = LeadAnalyst::new(index, ai.clone(), ai);
//!
//! analyst.ingest("./data/pdfs".as_ref()).await?;
//! let answer = analyst.analyze(None).await;
//! for lead in lead_analyst::parse_lead_scores(&answer) {
//!     println!("{}. {} ({})", lead.rank, lead.name, lead.score);
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Collaborator abstractions (Embedder, VectorIndex, Reasoner, ...)
//! - [`types`] - Chunks, profiles, ranked leads and tunables
//! - [`ingest`] - Loading, lead-name inference and chunking
//! - [`stores`] - Vector index implementations (MemoryIndex, SqliteIndex)
//! - [`enrichment`] - Deterministic profile simulator
//! - [`agent`] - The reasoning loop and its tools
//! - [`output`] - Ranked-answer parser
//! - [`ai`] - OpenAI and offline backends
//! - [`testing`] - Mock implementations for testing

pub mod agent;
pub mod ai;
pub mod analyst;
pub mod config;
pub mod context;
pub mod enrichment;
pub mod error;
pub mod index;
pub mod ingest;
pub mod output;
pub mod sample;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use agent::{
    prompts::{DEFAULT_QUESTION, NO_ANALYSIS},
    tools::ToolKind,
    LoopOutcome, LoopReport, ReasoningLoop,
};
pub use analyst::LeadAnalyst;
pub use config::AnalystConfig;
pub use context::format_context;
pub use enrichment::{format_profile, lookup_profile, SimulatedProfiles};
pub use error::{AnalystError, Result};
pub use index::{distinct_lead_names, summarize, IndexSummary, SemanticIndex};
pub use ingest::{IngestReport, SourceSet};
pub use output::parse_lead_scores;
pub use stores::{MemoryIndex, SqliteIndex};
pub use traits::{
    embedder::Embedder,
    index::VectorIndex,
    profiles::ProfileProvider,
    reasoner::{Reasoner, ReasoningRequest, ReasoningStep},
    source::TranscriptSource,
};
pub use types::{
    chunk::{ChunkMetadata, ScoredChunk, TranscriptChunk, UNKNOWN_LEAD},
    config::{AgentConfig, ChunkingConfig},
    profile::{LeadProfile, Seniority},
    ranked::{RankedLead, ScoreBand},
};
