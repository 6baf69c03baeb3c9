//! Full pipeline runs against the built-in sample corpus, fully offline.

use lead_analyst::ai::{HashingEmbedder, RuleBasedReasoner};
use lead_analyst::agent::prompts::INCOMPLETE_PREFIX;
use lead_analyst::sample::write_sample_corpus;
use lead_analyst::testing::ScriptedReasoner;
use lead_analyst::{
    AgentConfig, LeadAnalyst, LoopOutcome, MemoryIndex, ReasoningStep, SqliteIndex,
};

fn offline_config() -> AgentConfig {
    // Large enough to retrieve every chunk of the sample corpus
    AgentConfig::default().with_retrieval_k(100)
}

#[tokio::test]
async fn test_sample_corpus_ranks_ready_buyers_first() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path()).await.unwrap();

    let analyst = LeadAnalyst::new(MemoryIndex::new(), HashingEmbedder::new(), RuleBasedReasoner)
        .with_agent_config(offline_config());

    let chunks = analyst.ingest(dir.path()).await.unwrap();
    assert!(chunks >= 5);

    let names: Vec<_> = analyst.list_indexed_lead_names().await.into_iter().collect();
    assert_eq!(
        names,
        vec!["Carlos Mendez", "David Park", "Emma Wilson", "Nina Patel", "Sarah Johnson"]
    );

    let (report, leads) = analyst.rank_leads(None).await;
    assert_eq!(report.outcome, LoopOutcome::Completed);
    assert!(report.iterations <= 15);
    assert_eq!(
        report
            .tool_calls
            .iter()
            .filter(|t| t.as_str() == "LinkedInSearchTool")
            .count(),
        5
    );

    assert_eq!(leads.len(), 5);
    let position = |name: &str| {
        leads
            .iter()
            .position(|l| l.name == name)
            .unwrap_or_else(|| panic!("{} missing from ranking", name))
    };

    for buyer in ["Sarah Johnson", "Emma Wilson", "Nina Patel"] {
        for stalled in ["David Park", "Carlos Mendez"] {
            assert!(
                position(buyer) < position(stalled),
                "{} should outrank {}",
                buyer,
                stalled
            );
        }
    }

    for lead in &leads {
        assert!(lead.score <= 100);
        assert!(lead.reasoning.len() >= 3, "{} has too few reasons", lead.name);
    }
    assert!(leads[..3].iter().all(|l| l.score >= 75));
    assert!(leads[3..].iter().all(|l| l.score < 50));
}

#[tokio::test]
async fn test_reingest_is_idempotent() {
    let corpus = tempfile::tempdir().unwrap();
    let persist = tempfile::tempdir().unwrap();
    write_sample_corpus(corpus.path()).await.unwrap();

    let index = SqliteIndex::open(persist.path(), "sales_leads").await.unwrap();
    let analyst = LeadAnalyst::new(index, HashingEmbedder::new(), RuleBasedReasoner);

    let first = analyst.ingest(corpus.path()).await.unwrap();
    let before = analyst.index().list_metadata().await.unwrap();

    let second = analyst.ingest(corpus.path()).await.unwrap();
    let after = analyst.index().list_metadata().await.unwrap();

    assert_eq!(first, second);
    assert_eq!(before, after);
    assert_eq!(analyst.index().count().await.unwrap(), first);

    // A fresh process re-attaches to the same data
    let reopened = SqliteIndex::open(persist.path(), "sales_leads").await.unwrap();
    let analyst = LeadAnalyst::new(reopened, HashingEmbedder::new(), RuleBasedReasoner);
    assert!(analyst.is_index_populated().await);
    assert_eq!(analyst.list_indexed_lead_names().await.len(), 5);
}

#[tokio::test]
async fn test_loop_stops_after_fifteen_iterations() {
    let dir = tempfile::tempdir().unwrap();
    write_sample_corpus(dir.path()).await.unwrap();

    let reasoner = ScriptedReasoner::repeating(ReasoningStep::action(
        "VectorSearchTool",
        "budget approved",
    ));
    let analyst = LeadAnalyst::new(MemoryIndex::new(), HashingEmbedder::new(), reasoner.clone());
    analyst.ingest(dir.path()).await.unwrap();

    let report = analyst.analyze_with_report(None).await;

    assert_eq!(report.outcome, LoopOutcome::Exhausted);
    assert_eq!(report.iterations, 15);
    assert_eq!(reasoner.calls(), 15);
    assert_eq!(report.tool_calls.len(), 15);
    assert!(report.answer.starts_with(INCOMPLETE_PREFIX));
    assert!(report.answer.contains("=== Lead: "));
}

#[tokio::test]
async fn test_analyze_on_empty_index_still_answers() {
    let analyst = LeadAnalyst::new(MemoryIndex::new(), HashingEmbedder::new(), RuleBasedReasoner);

    assert!(!analyst.is_index_populated().await);
    let answer = analyst.analyze(None).await;
    assert!(answer.starts_with("No leads"));
}
