//! The lead analyst facade.
//!
//! `LeadAnalyst` owns every collaborator (index, embedder, reasoner,
//! profile provider) and exposes the two user-facing operations:
//!
//! ```text
//! ingest(dir)        directory ─▶ chunks ─▶ embeddings ─▶ index (replaced)
//! analyze(question)  question ─▶ reasoning loop ─▶ ranked free text
//! ```

use std::collections::BTreeSet;
use std::path::Path;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::agent::prompts::{DEFAULT_QUESTION, SYSTEM_PROMPT};
use crate::agent::tools::Toolbox;
use crate::agent::{LoopReport, ReasoningLoop};
use crate::enrichment::SimulatedProfiles;
use crate::error::Result;
use crate::index::SemanticIndex;
use crate::ingest::{ingest, IngestReport, SourceSet};
use crate::output::parse_lead_scores;
use crate::traits::{
    embedder::Embedder, index::VectorIndex, profiles::ProfileProvider, reasoner::Reasoner,
};
use crate::types::config::{AgentConfig, ChunkingConfig};
use crate::types::ranked::RankedLead;

/// Ingests transcripts and ranks the leads in them.
///
/// # Example
///
/// ```rust,ignore
/// use lead_analyst::{LeadAnalyst, MemoryIndex};
/// use lead_analyst::ai::{HashingEmbedder, RuleBasedReasoner};
///
/// let analyst = LeadAnalyst::new(MemoryIndex::new(), HashingEmbedder::new(), RuleBasedReasoner);
/// analyst.ingest("./data/pdfs".as_ref()).await?;
/// println!("{}", analyst.analyze(None).await);
/// ```
pub struct LeadAnalyst<I, E, R, P = SimulatedProfiles> {
    index: SemanticIndex<I, E>,
    reasoner: R,
    profiles: P,
    sources: SourceSet,
    chunking: ChunkingConfig,
    agent: AgentConfig,
    cancel: Option<CancellationToken>,

    /// Held for the duration of an ingest run
    processing: Mutex<()>,
}

impl<I, E, R> LeadAnalyst<I, E, R, SimulatedProfiles>
where
    I: VectorIndex,
    E: Embedder,
    R: Reasoner,
{
    /// Create an analyst with simulated profile enrichment and default tunables.
    pub fn new(index: I, embedder: E, reasoner: R) -> Self {
        Self {
            index: SemanticIndex::new(index, embedder),
            reasoner,
            profiles: SimulatedProfiles,
            sources: SourceSet::default(),
            chunking: ChunkingConfig::default(),
            agent: AgentConfig::default(),
            cancel: None,
            processing: Mutex::new(()),
        }
    }
}

impl<I, E, R, P> LeadAnalyst<I, E, R, P>
where
    I: VectorIndex,
    E: Embedder,
    R: Reasoner,
    P: ProfileProvider,
{
    /// Replace the profile provider.
    pub fn with_profiles<Q: ProfileProvider>(self, profiles: Q) -> LeadAnalyst<I, E, R, Q> {
        LeadAnalyst {
            index: self.index,
            reasoner: self.reasoner,
            profiles,
            sources: self.sources,
            chunking: self.chunking,
            agent: self.agent,
            cancel: self.cancel,
            processing: self.processing,
        }
    }

    /// Set the document sources used by [`ingest`](Self::ingest).
    pub fn with_sources(mut self, sources: SourceSet) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_agent_config(mut self, agent: AgentConfig) -> Self {
        self.agent = agent;
        self
    }

    /// Stop analysis runs between iterations once `token` is cancelled.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Ingest every transcript in `dir`, replacing the index contents.
    ///
    /// Returns the number of chunks stored.
    pub async fn ingest(&self, dir: &Path) -> Result<usize> {
        Ok(self.ingest_with_report(dir).await?.chunks)
    }

    /// Like [`ingest`](Self::ingest), with per-document detail.
    pub async fn ingest_with_report(&self, dir: &Path) -> Result<IngestReport> {
        let _guard = self.processing.lock().await;
        ingest(dir, &self.sources, &self.chunking, &self.index).await
    }

    /// Answer `question` (or the default ranking question).
    ///
    /// Never fails: loop-internal problems surface as a partial answer or
    /// the no-analysis sentinel.
    pub async fn analyze(&self, question: Option<&str>) -> String {
        self.analyze_with_report(question).await.answer
    }

    /// Like [`analyze`](Self::analyze), with iteration and tool-call detail.
    pub async fn analyze_with_report(&self, question: Option<&str>) -> LoopReport {
        let question = question
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .unwrap_or(DEFAULT_QUESTION);

        let toolbox = Toolbox::new(&self.index, &self.profiles, self.agent.retrieval_k);
        let mut agent = ReasoningLoop::new(&self.reasoner, toolbox, SYSTEM_PROMPT, &self.agent);
        if let Some(token) = &self.cancel {
            agent = agent.with_cancellation(token.clone());
        }

        info!(question = %question, "Analysis starting");
        let report = agent.run(question).await;
        info!(
            outcome = ?report.outcome,
            iterations = report.iterations,
            "Analysis finished"
        );
        report
    }

    /// Analyze and parse the answer into ranked leads.
    pub async fn rank_leads(&self, question: Option<&str>) -> (LoopReport, Vec<RankedLead>) {
        let report = self.analyze_with_report(question).await;
        let leads = parse_lead_scores(&report.answer);
        (report, leads)
    }

    /// Whether anything has been ingested. Index errors count as "no".
    pub async fn is_index_populated(&self) -> bool {
        match self.index.is_populated().await {
            Ok(populated) => populated,
            Err(e) => {
                warn!(error = %e, "Could not read index; treating as empty");
                false
            }
        }
    }

    /// Sorted lead names in the index. Index errors yield an empty set.
    pub async fn list_indexed_lead_names(&self) -> BTreeSet<String> {
        match self.index.lead_names().await {
            Ok(names) => names,
            Err(e) => {
                warn!(error = %e, "Could not list lead names");
                BTreeSet::new()
            }
        }
    }

    /// The semantic index (for status reporting).
    pub fn index(&self) -> &SemanticIndex<I, E> {
        &self.index
    }
}
