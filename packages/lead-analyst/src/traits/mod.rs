//! Core trait abstractions.
//!
//! Every external collaborator is a trait so the pipeline can run against
//! real providers, local stand-ins, or test doubles:
//! - `Embedder`: text to fixed-dimensionality vectors
//! - `VectorIndex`: persistent chunk + embedding storage
//! - `Reasoner`: the tool-calling language model
//! - `TranscriptSource`: document text extraction
//! - `ProfileProvider`: lead enrichment

pub mod embedder;
pub mod index;
pub mod profiles;
pub mod reasoner;
pub mod source;
