//! Embedding configuration.

use pdfsearch_core::AppConfig;
use serde::{Deserialize, Serialize};

/// Which embedding endpoint and model to use.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingConfig {
    /// Provider name: "openai"
    pub provider: String,

    /// Model identifier (provider-specific)
    pub model: String,

    /// Optional endpoint override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: pdfsearch_core::config::DEFAULT_EMBEDDING_MODEL.to_string(),
            base_url: None,
        }
    }
}

impl EmbeddingConfig {
    /// Embedding settings for answering questions.
    pub fn for_questions(config: &AppConfig) -> Self {
        Self {
            provider: "openai".to_string(),
            model: config.embedding_model.clone(),
            base_url: Some(config.base_url.clone()),
        }
    }

    /// Embedding settings for the retrieval probe.
    pub fn for_probe(config: &AppConfig) -> Self {
        Self {
            model: config.probe_embedding_model.clone(),
            ..Self::for_questions(config)
        }
    }
}
