//! Domain types shared across the ingestion and analysis pipelines.

pub mod chunk;
pub mod config;
pub mod profile;
pub mod ranked;
