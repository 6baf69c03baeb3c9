//! OpenAI implementation of the embedding and reasoning traits.
//!
//! Uses gpt-4o-mini for the agent and text-embedding-3-small for the index.
//!
//! # Example
//!
//! ```rust,ignore
//! use lead_analyst::ai::OpenAI;
//!
//! let ai = OpenAI::new("sk-...").with_model("gpt-4o");
//! let analyst = LeadAnalyst::new(store, ai.clone(), ai);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agent::prompts::render_react_prompt;
use crate::agent::react::parse_react_output;
use crate::config::{AnalystConfig, DEFAULT_CHAT_MODEL, DEFAULT_EMBEDDING_MODEL};
use crate::error::{AnalystError, Result};
use crate::traits::embedder::Embedder;
use crate::traits::reasoner::{Reasoner, ReasoningRequest, ReasoningStep};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Inputs sent per `/embeddings` request.
const EMBEDDING_BATCH_SIZE: usize = 100;

/// Where the text protocol expects the tool result to be inserted.
const STOP_SEQUENCE: &str = "\nObservation:";

/// OpenAI-based embedder and reasoner.
#[derive(Clone)]
pub struct OpenAI {
    client: Client,
    api_key: String,
    model: String,
    embedding_model: String,
    base_url: String,
}

impl OpenAI {
    /// Create a new OpenAI client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_CHAT_MODEL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| AnalystError::Config("OPENAI_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Create from loaded configuration (key, models, optional base URL).
    pub fn from_config(config: &AnalystConfig) -> Result<Self> {
        let ai = Self::new(config.require_api_key()?)
            .with_model(&config.chat_model)
            .with_embedding_model(&config.embedding_model);
        Ok(match &config.openai_base_url {
            Some(url) => ai.with_base_url(url),
            None => ai,
        })
    }

    /// Set the chat model (default: gpt-4o-mini).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the embedding model (default: text-embedding-3-small).
    pub fn with_embedding_model(mut self, model: impl Into<String>) -> Self {
        self.embedding_model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Get the current model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Single-message completion that stops before a hallucinated observation.
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: Some(0.0),
            max_tokens: Some(4096),
            stop: vec![STOP_SEQUENCE.to_string()],
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalystError::Reasoning(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnalystError::Reasoning(format!(
                "OpenAI API error: {}",
                error_text
            )));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| AnalystError::Reasoning(e.to_string()))?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.unwrap_or_default())
            .ok_or_else(|| AnalystError::Reasoning("No response from OpenAI".into()))
    }

    /// Embed one batch; output order matches input order.
    async fn embed_chunk(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let request = EmbeddingRequest {
            model: self.embedding_model.clone(),
            input: texts.iter().map(|t| t.to_string()).collect(),
        };

        let response = self
            .client
            .post(format!("{}/embeddings", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AnalystError::Embedding(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AnalystError::Embedding(format!(
                "OpenAI embedding error: {}",
                error_text
            )));
        }

        let embed_response: EmbeddingResponse = response
            .json()
            .await
            .map_err(|e| AnalystError::Embedding(e.to_string()))?;

        order_embeddings(embed_response.data, texts.len())
    }
}

/// Sort response rows by `index` and check that every input got one.
fn order_embeddings(mut data: Vec<EmbeddingData>, expected: usize) -> Result<Vec<Vec<f32>>> {
    if data.len() != expected {
        return Err(AnalystError::Embedding(format!(
            "expected {} embeddings from OpenAI, got {}",
            expected,
            data.len()
        )));
    }
    data.sort_by_key(|d| d.index);
    Ok(data.into_iter().map(|d| d.embedding).collect())
}

#[async_trait]
impl Embedder for OpenAI {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_chunk(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| AnalystError::Embedding("No embedding from OpenAI".into()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>> {
        let mut results = Vec::with_capacity(texts.len());
        for batch in texts.chunks(EMBEDDING_BATCH_SIZE) {
            debug!(batch_size = batch.len(), "Requesting embeddings");
            results.extend(self.embed_chunk(batch).await?);
        }
        Ok(results)
    }
}

#[async_trait]
impl Reasoner for OpenAI {
    async fn next_step(&self, request: &ReasoningRequest<'_>) -> Result<ReasoningStep> {
        let prompt = render_react_prompt(request);
        let completion = self.complete(&prompt).await?;
        Ok(parse_react_output(&completion))
    }
}

// Request/Response types

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    stop: Vec<String>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Serialize)]
struct EmbeddingRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    #[serde(default)]
    index: usize,
    embedding: Vec<f32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openai_builder() {
        let ai = OpenAI::new("sk-test")
            .with_model("gpt-4o")
            .with_embedding_model("text-embedding-3-large")
            .with_base_url("https://custom.api.com/");

        assert_eq!(ai.model, "gpt-4o");
        assert_eq!(ai.embedding_model, "text-embedding-3-large");
        assert_eq!(ai.base_url, "https://custom.api.com");
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = AnalystConfig::default();
        assert!(matches!(OpenAI::from_config(&config), Err(AnalystError::Config(_))));

        let config = AnalystConfig {
            openai_api_key: Some("sk-test".into()),
            openai_base_url: Some("http://localhost:8080/v1".into()),
            ..AnalystConfig::default()
        };
        let ai = OpenAI::from_config(&config).unwrap();
        assert_eq!(ai.model(), DEFAULT_CHAT_MODEL);
        assert_eq!(ai.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_embedding_response_is_reordered() {
        let json = r#"{"data": [
            {"index": 1, "embedding": [0.0, 1.0]},
            {"index": 0, "embedding": [1.0, 0.0]}
        ]}"#;
        let response: EmbeddingResponse = serde_json::from_str(json).unwrap();
        let ordered = order_embeddings(response.data, 2).unwrap();
        assert_eq!(ordered, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_embedding_count_mismatch_is_error() {
        let json = r#"{"data": [{"index": 0, "embedding": [1.0]}]}"#;
        let response: EmbeddingResponse = serde_json::from_str(json).unwrap();
        assert!(matches!(
            order_embeddings(response.data, 2),
            Err(AnalystError::Embedding(_))
        ));
    }

    #[test]
    fn test_null_content_deserializes() {
        let json = r#"{"choices": [{"message": {"content": null}}]}"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
