//! Command-line front end for the sales lead analyst.
//!
//! ```text
//! lead-analyst sample               # write the demo transcripts
//! lead-analyst ingest               # index ./data/pdfs
//! lead-analyst analyze              # rank leads
//! lead-analyst --offline analyze    # same, without network access
//! ```
//!
//! Embeddings from `--offline` runs and OpenAI runs are not comparable;
//! re-ingest after switching modes.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use lead_analyst::ai::{HashingEmbedder, OpenAI, RuleBasedReasoner};
use lead_analyst::sample::write_sample_corpus;
use lead_analyst::{
    format_profile, lookup_profile, summarize, AnalystConfig, Embedder, LeadAnalyst,
    LoopOutcome, RankedLead, Reasoner, ScoreBand, SqliteIndex,
};

#[derive(Parser)]
#[command(name = "lead-analyst")]
#[command(about = "Rank sales leads from call transcripts")]
struct Cli {
    /// Use the offline embedder and rule-based reasoner instead of OpenAI
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index every transcript in a directory (replaces the index)
    Ingest {
        /// Defaults to ANALYST_PDF_DIR or ./data/pdfs
        dir: Option<PathBuf>,
    },

    /// Ask the agent to rank the indexed leads
    Analyze {
        /// Question for the agent (defaults to the monthly ranking question)
        question: Option<String>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show what is in the index
    Status,

    /// List indexed lead names
    Leads,

    /// Show the simulated LinkedIn profile for a lead
    Profile { name: String },

    /// Write the five demo transcripts as .txt files
    Sample {
        /// Defaults to ANALYST_PDF_DIR or ./data/pdfs
        out: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct AnalyzeOutput<'a> {
    question: Option<&'a str>,
    outcome: LoopOutcome,
    iterations: usize,
    tool_calls: &'a [String],
    leads: &'a [RankedLead],
    answer: &'a str,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,lead_analyst=debug".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_line_number(true)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let config = AnalystConfig::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Sample { out } => cmd_sample(out.unwrap_or_else(|| config.pdf_dir.clone())).await,
        Commands::Profile { name } => cmd_profile(&name),
        Commands::Status => cmd_status(&config).await,
        Commands::Leads => cmd_leads(&config).await,
        command => {
            let index = SqliteIndex::open(&config.persist_dir, config.collection.as_str())
                .await
                .with_context(|| {
                    format!("Failed to open index under {}", config.persist_dir.display())
                })?;

            if cli.offline {
                let analyst = build(index, HashingEmbedder::new(), RuleBasedReasoner, &config);
                run(command, &analyst, &config).await
            } else {
                let ai = OpenAI::from_config(&config)
                    .context("OpenAI backend unavailable (use --offline to run without it)")?;
                let analyst = build(index, ai.clone(), ai, &config);
                run(command, &analyst, &config).await
            }
        }
    }
}

fn build<E: Embedder, R: Reasoner>(
    index: SqliteIndex,
    embedder: E,
    reasoner: R,
    config: &AnalystConfig,
) -> LeadAnalyst<SqliteIndex, E, R> {
    // Ctrl-C stops the agent between iterations
    let token = CancellationToken::new();
    let on_signal = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    LeadAnalyst::new(index, embedder, reasoner)
        .with_chunking(config.chunking.clone())
        .with_agent_config(config.agent.clone())
        .with_cancellation(token)
}

async fn run<E: Embedder, R: Reasoner>(
    command: Commands,
    analyst: &LeadAnalyst<SqliteIndex, E, R>,
    config: &AnalystConfig,
) -> Result<()> {
    match command {
        Commands::Ingest { dir } => {
            let dir = dir.unwrap_or_else(|| config.pdf_dir.clone());
            let report = analyst
                .ingest_with_report(&dir)
                .await
                .with_context(|| format!("Failed to ingest {}", dir.display()))?;

            for doc in &report.documents {
                println!(
                    "  {} {} ({} chunks)",
                    "✓".green(),
                    doc.lead_name.bold(),
                    doc.chunks
                );
            }
            println!(
                "{}",
                format!(
                    "Indexed {} chunks from {} transcripts",
                    report.chunks,
                    report.documents.len()
                )
                .bright_green()
            );
            Ok(())
        }
        Commands::Analyze { question, json } => {
            if !analyst.is_index_populated().await {
                bail!("No transcripts indexed yet. Run `lead-analyst ingest` first.");
            }

            let (report, leads) = analyst.rank_leads(question.as_deref()).await;

            if json {
                let output = AnalyzeOutput {
                    question: question.as_deref(),
                    outcome: report.outcome,
                    iterations: report.iterations,
                    tool_calls: &report.tool_calls,
                    leads: &leads,
                    answer: &report.answer,
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
                return Ok(());
            }

            if report.outcome != LoopOutcome::Completed {
                eprintln!(
                    "{}",
                    format!(
                        "Agent stopped early ({:?} after {} iterations)",
                        report.outcome, report.iterations
                    )
                    .yellow()
                );
            }

            if leads.is_empty() {
                println!("{}", report.answer);
            } else {
                print_leads(&leads);
            }
            Ok(())
        }
        // Handled before a backend is built
        Commands::Status | Commands::Leads | Commands::Profile { .. } | Commands::Sample { .. } => {
            Ok(())
        }
    }
}

fn paint(text: String, band: ScoreBand) -> ColoredString {
    match band {
        ScoreBand::High => text.green(),
        ScoreBand::Medium => text.yellow(),
        ScoreBand::Low => text.red(),
    }
}

fn print_leads(leads: &[RankedLead]) {
    for lead in leads {
        let band = lead.band();
        println!(
            "{}. {}  {} {}",
            lead.rank,
            lead.name.bold(),
            paint(format!("{}/100", lead.score), band).bold(),
            format!("({})", band.label()).dimmed()
        );
        for reason in &lead.reasoning {
            println!("   - {}", reason);
        }
        println!();
    }
}

async fn cmd_sample(out: PathBuf) -> Result<()> {
    let written = write_sample_corpus(&out)
        .await
        .with_context(|| format!("Failed to write samples to {}", out.display()))?;

    for path in &written {
        println!("  {} {}", "✓".green(), path.display());
    }
    println!(
        "{}",
        format!("{} sample transcripts written to {}", written.len(), out.display()).bright_green()
    );
    Ok(())
}

fn cmd_profile(name: &str) -> Result<()> {
    let name = name.trim();
    if name.is_empty() {
        bail!("Please provide a lead name.");
    }
    print!("{}", format_profile(&lookup_profile(name)));
    Ok(())
}

async fn open_existing(config: &AnalystConfig) -> Result<Option<SqliteIndex>> {
    SqliteIndex::open_existing(&config.persist_dir, config.collection.as_str())
        .await
        .context("Failed to open index")
}

async fn cmd_status(config: &AnalystConfig) -> Result<()> {
    println!("Index:      {}", config.persist_dir.display());
    println!("Collection: {}", config.collection);

    let Some(index) = open_existing(config).await? else {
        println!("Status:     {}", "empty (nothing ingested yet)".yellow());
        return Ok(());
    };

    let summary = summarize(&index).await;
    let status = if summary.is_populated() {
        "ready".green()
    } else {
        "empty".yellow()
    };

    println!("Status:     {}", status);
    println!("Chunks:     {}", summary.chunks);
    println!("Leads:      {}", summary.lead_names.len());
    if let Some(at) = summary.last_indexed_at {
        println!("Indexed at: {}", at.to_rfc3339());
    }
    Ok(())
}

async fn cmd_leads(config: &AnalystConfig) -> Result<()> {
    let leads = match open_existing(config).await? {
        Some(index) => summarize(&index).await.lead_names,
        None => Default::default(),
    };

    if leads.is_empty() {
        println!("{}", "No leads indexed yet.".yellow());
    }
    for lead in leads {
        println!("{}", lead);
    }
    Ok(())
}
