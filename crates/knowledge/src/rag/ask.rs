//! RAG answering orchestration.
//!
//! Retrieves the closest chunks and asks the chat model to answer from them.

use crate::embeddings::{create_provider, EmbeddingConfig};
use crate::pgvector_index::PgVectorIndex;
use crate::types::Document;
use crate::vector_index::{Retriever, SimilaritySearch};
use pdfsearch_core::{AppConfig, AppError, AppResult};
use pdfsearch_llm::{create_client, LlmClient, LlmRequest};
use pdfsearch_prompt::{load_prompt, SearchPrompt};
use std::sync::Arc;

/// Number of documents retrieved per question.
pub const DEFAULT_TOP_K: usize = 3;

/// Answer given when retrieval finds nothing. The model is not called.
pub const NO_INFORMATION_ANSWER: &str =
    "Não tenho informações necessárias para responder sua pergunta.";

/// Separator placed between document texts in the prompt context.
pub const CONTEXT_SEPARATOR: &str = "\n\n";

/// Long-lived handles needed to answer questions.
pub struct RagPipeline {
    retriever: Arc<dyn Retriever>,
    llm: Arc<dyn LlmClient>,
    prompt: SearchPrompt,
    model: String,
    temperature: f32,
    top_k: usize,
}

impl RagPipeline {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        llm: Arc<dyn LlmClient>,
        prompt: SearchPrompt,
        model: impl Into<String>,
    ) -> Self {
        Self {
            retriever,
            llm,
            prompt,
            model: model.into(),
            temperature: 0.0,
            top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the retrieval depth.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Build every client from configuration.
    ///
    /// No network traffic happens here; the database pool connects lazily.
    pub fn from_config(config: &AppConfig) -> AppResult<Self> {
        let embeddings = create_provider(
            &EmbeddingConfig::for_questions(config),
            Some(config.api_key.as_str()),
        )?;
        let index = PgVectorIndex::connect_lazy(&config.database_url(), &config.collection)?;
        let retriever = SimilaritySearch::new(embeddings, Arc::new(index));

        let llm = create_client("openai", Some(config.base_url.as_str()), Some(config.api_key.as_str()))
            .map_err(AppError::Config)?;

        let prompt = match config.prompt_file {
            Some(ref path) => SearchPrompt::new(&load_prompt(path)?)?,
            None => SearchPrompt::builtin()?,
        };

        tracing::debug!(
            "RAG pipeline ready: collection={}, prompt={}, chat model={}",
            config.collection,
            prompt.id(),
            config.chat_model
        );

        Ok(Self::new(Arc::new(retriever), llm, prompt, &config.chat_model)
            .with_temperature(config.temperature))
    }

    /// Retrieve context for `query` and generate an answer.
    ///
    /// Returns [`NO_INFORMATION_ANSWER`] without calling the model when the
    /// search comes back empty. Retrieval and model errors propagate.
    pub async fn search_and_answer(&self, query: &str) -> AppResult<String> {
        tracing::info!("Answering question ({} chars)", query.chars().count());

        let documents = self.retriever.similarity_search(query, self.top_k).await?;

        if documents.is_empty() {
            tracing::info!("No documents retrieved, returning fallback answer");
            return Ok(NO_INFORMATION_ANSWER.to_string());
        }

        let context = build_context(&documents);
        let prompt = self.prompt.render(&context, query)?;

        let request = LlmRequest::new(prompt, &self.model).with_temperature(self.temperature);
        let response = self.llm.complete(&request).await?;

        tracing::debug!(
            "Answer generated by {} ({} chars)",
            response.model,
            response.content.chars().count()
        );

        Ok(response.content)
    }
}

/// Join document texts in retrieval order, separated by a blank line.
pub fn build_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.page_content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}
