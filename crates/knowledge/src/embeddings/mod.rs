//! Query embedding.
//!
//! Turns question text into vectors comparable with the stored chunks. The
//! model must match the one used at ingestion time.

pub mod config;
pub mod provider;
pub mod providers;

pub use config::EmbeddingConfig;
pub use provider::{create_provider, EmbeddingProvider};
