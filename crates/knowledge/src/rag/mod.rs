//! RAG (Retrieval-Augmented Generation) answering.
//!
//! Retrieves the closest chunks for a question and asks the chat model to
//! answer from them.

pub mod ask;

pub use ask::{build_context, RagPipeline, CONTEXT_SEPARATOR, DEFAULT_TOP_K, NO_INFORMATION_ANSWER};
