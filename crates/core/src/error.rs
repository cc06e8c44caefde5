//! Error types for the PDF search CLI.
//!
//! This module defines a unified error enum that covers all error categories
//! in the application: configuration, I/O, the chat model, the embedding
//! API, the vector store and prompt rendering.

use thiserror::Error;

/// Unified error type for the PDF search CLI.
///
/// All library functions return `Result<T, AppError>`; the CLI decides which
/// errors are fatal and which are printed and survived.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required environment variable is absent or empty
    #[error("Environment variable {0} is not set")]
    MissingEnv(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Chat model errors
    #[error("LLM error: {0}")]
    Llm(String),

    /// Embedding API errors
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector store errors
    #[error("Vector store error: {0}")]
    Store(String),

    /// Prompt template errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
