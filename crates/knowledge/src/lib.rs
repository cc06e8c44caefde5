//! Knowledge retrieval for the PDF search CLI.
//!
//! Embeds questions, searches the pgvector collection populated by
//! ingestion and answers from the retrieved chunks.

pub mod embeddings;
pub mod pgvector_index;
pub mod rag;
pub mod types;
pub mod vector_index;

// Re-export commonly used types
pub use embeddings::{create_provider, EmbeddingConfig, EmbeddingProvider};
pub use pgvector_index::PgVectorIndex;
pub use rag::{build_context, RagPipeline, DEFAULT_TOP_K, NO_INFORMATION_ANSWER};
pub use types::Document;
pub use vector_index::{Retriever, SimilaritySearch, VectorIndex};
