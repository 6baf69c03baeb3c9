//! Environment-driven configuration.

use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

use crate::error::{AnalystError, Result};
use crate::types::config::{AgentConfig, ChunkingConfig};

pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";
pub const DEFAULT_PDF_DIR: &str = "./data/pdfs";
pub const DEFAULT_PERSIST_DIR: &str = "./chroma_db";
pub const DEFAULT_COLLECTION: &str = "sales_leads";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct AnalystConfig {
    /// Only required by the OpenAI backends
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub chat_model: String,
    pub embedding_model: String,

    /// Where transcripts are read from by default
    pub pdf_dir: PathBuf,

    /// Directory holding the index database
    pub persist_dir: PathBuf,
    pub collection: String,

    pub chunking: ChunkingConfig,
    pub agent: AgentConfig,
}

impl Default for AnalystConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_base_url: None,
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            pdf_dir: PathBuf::from(DEFAULT_PDF_DIR),
            persist_dir: PathBuf::from(DEFAULT_PERSIST_DIR),
            collection: DEFAULT_COLLECTION.to_string(),
            chunking: ChunkingConfig::default(),
            agent: AgentConfig::default(),
        }
    }
}

impl AnalystConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup (the environment, a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            openai_api_key: non_empty("OPENAI_API_KEY"),
            openai_base_url: non_empty("OPENAI_BASE_URL"),
            chat_model: non_empty("ANALYST_CHAT_MODEL").unwrap_or(defaults.chat_model),
            embedding_model: non_empty("ANALYST_EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            pdf_dir: non_empty("ANALYST_PDF_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.pdf_dir),
            persist_dir: non_empty("ANALYST_PERSIST_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.persist_dir),
            collection: non_empty("ANALYST_COLLECTION").unwrap_or(defaults.collection),
            chunking: defaults.chunking,
            agent: AgentConfig {
                max_iterations: parse_or("ANALYST_MAX_ITERATIONS", non_empty("ANALYST_MAX_ITERATIONS"), defaults.agent.max_iterations)?,
                retrieval_k: parse_or("ANALYST_RETRIEVAL_K", non_empty("ANALYST_RETRIEVAL_K"), defaults.agent.retrieval_k)?,
            },
        })
    }

    /// The API key, or a config error naming the variable to set.
    pub fn require_api_key(&self) -> Result<&str> {
        self.openai_api_key.as_deref().ok_or_else(|| {
            AnalystError::Config("OPENAI_API_KEY not found. Please set it in your .env file.".into())
        })
    }
}

fn parse_or(key: &str, value: Option<String>, default: usize) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(v) => v
            .trim()
            .parse()
            .map_err(|_| AnalystError::Config(format!("{} must be a positive integer, got {:?}", key, v))),
    }
}
