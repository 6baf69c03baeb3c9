//! Embedding and reasoning backends.
//!
//! - [`OpenAI`]: hosted chat and embedding models (feature `openai`)
//! - [`HashingEmbedder`]: offline bag-of-words embeddings
//! - [`RuleBasedReasoner`]: offline phrase-scoring reasoner

pub mod hashing;
pub mod heuristic;
#[cfg(feature = "openai")]
pub mod openai;

pub use hashing::HashingEmbedder;
pub use heuristic::RuleBasedReasoner;
#[cfg(feature = "openai")]
pub use openai::OpenAI;
