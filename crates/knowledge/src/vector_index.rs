//! Vector search abstractions.
//!
//! `VectorIndex` is the raw store (vector in, documents out). `Retriever`
//! is what the answering pipeline talks to (text in, documents out);
//! `SimilaritySearch` joins an embedding provider to an index to provide it.

use crate::embeddings::EmbeddingProvider;
use crate::types::Document;
use pdfsearch_core::AppResult;
use std::sync::Arc;

/// Trait for vector store backends.
#[async_trait::async_trait]
pub trait VectorIndex: Send + Sync {
    /// Search for the top-k documents closest to the query embedding.
    ///
    /// Returns documents ordered by ascending distance, at most `top_k`.
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<Document>>;
}

/// Text-level similarity search.
#[async_trait::async_trait]
pub trait Retriever: Send + Sync {
    /// Return up to `top_k` documents most similar to `query`, best first.
    async fn similarity_search(&self, query: &str, top_k: usize) -> AppResult<Vec<Document>>;
}

/// Embeds the query, then searches the index with the vector.
pub struct SimilaritySearch {
    embeddings: Arc<dyn EmbeddingProvider>,
    index: Arc<dyn VectorIndex>,
}

impl SimilaritySearch {
    pub fn new(embeddings: Arc<dyn EmbeddingProvider>, index: Arc<dyn VectorIndex>) -> Self {
        Self { embeddings, index }
    }
}

#[async_trait::async_trait]
impl Retriever for SimilaritySearch {
    async fn similarity_search(&self, query: &str, top_k: usize) -> AppResult<Vec<Document>> {
        tracing::debug!(
            "Embedding query with {} ({})",
            self.embeddings.provider_name(),
            self.embeddings.model_name()
        );

        let query_embedding = self.embeddings.embed(query).await?;
        let mut documents = self.index.search(&query_embedding, top_k).await?;

        // Guard against backends that ignore the limit
        documents.truncate(top_k);

        tracing::info!("Similarity search returned {} documents", documents.len());
        for (i, doc) in documents.iter().enumerate() {
            tracing::debug!(
                "  #{} distance={:?} chars={}",
                i + 1,
                doc.distance,
                doc.page_content.chars().count()
            );
        }

        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdfsearch_core::AppError;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct FixedEmbeddings;

    #[async_trait::async_trait]
    impl EmbeddingProvider for FixedEmbeddings {
        fn provider_name(&self) -> &str {
            "fixed"
        }

        fn model_name(&self) -> &str {
            "fixed-v1"
        }

        async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
            Ok(texts.iter().map(|t| vec![t.len() as f32, 1.0]).collect())
        }
    }

    #[derive(Default)]
    struct RecordingIndex {
        documents: Vec<Document>,
        seen: Mutex<Vec<(Vec<f32>, usize)>>,
    }

    #[async_trait::async_trait]
    impl VectorIndex for RecordingIndex {
        async fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<Document>> {
            self.seen
                .lock()
                .unwrap()
                .push((query_embedding.to_vec(), top_k));
            Ok(self.documents.clone())
        }
    }

    #[derive(Debug)]
    struct FailingEmbeddings;

    #[async_trait::async_trait]
    impl EmbeddingProvider for FailingEmbeddings {
        fn provider_name(&self) -> &str {
            "failing"
        }

        fn model_name(&self) -> &str {
            "none"
        }

        async fn embed_batch(&self, _texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
            Err(AppError::Embedding("network down".to_string()))
        }
    }

    #[tokio::test]
    async fn test_query_is_embedded_and_passed_to_index() {
        let index = Arc::new(RecordingIndex {
            documents: vec![Document::new("um"), Document::new("dois")],
            ..Default::default()
        });
        let search = SimilaritySearch::new(Arc::new(FixedEmbeddings), index.clone());

        let docs = search.similarity_search("copa", 3).await.unwrap();

        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].page_content, "um");
        let seen = index.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), &[(vec![4.0, 1.0], 3)]);
    }

    #[tokio::test]
    async fn test_results_capped_at_top_k() {
        let index = Arc::new(RecordingIndex {
            documents: (0..5).map(|i| Document::new(format!("doc {}", i))).collect(),
            ..Default::default()
        });
        let search = SimilaritySearch::new(Arc::new(FixedEmbeddings), index);

        let docs = search.similarity_search("copa do mundo", 3).await.unwrap();
        assert_eq!(docs.len(), 3);
        assert_eq!(docs[2].page_content, "doc 2");
    }

    #[tokio::test]
    async fn test_embedding_failure_propagates() {
        let index = Arc::new(RecordingIndex::default());
        let search = SimilaritySearch::new(Arc::new(FailingEmbeddings), index.clone());

        let err = search.similarity_search("copa", 3).await.unwrap_err();
        assert!(matches!(err, AppError::Embedding(_)));
        assert!(index.seen.lock().unwrap().is_empty());
    }
}
