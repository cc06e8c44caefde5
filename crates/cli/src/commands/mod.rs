//! Question-answering modes of the PDF search CLI.

pub mod ask;
pub mod interactive;

pub use ask::run_single;
pub use interactive::{interrupted, run_interactive, spawn_stdin_lines};

use pdfsearch_core::AppResult;
use pdfsearch_knowledge::RagPipeline;

/// Something that turns a question into an answer.
#[async_trait::async_trait]
pub trait Answerer: Send + Sync {
    async fn answer(&self, question: &str) -> AppResult<String>;
}

#[async_trait::async_trait]
impl Answerer for RagPipeline {
    async fn answer(&self, question: &str) -> AppResult<String> {
        self.search_and_answer(question).await
    }
}
