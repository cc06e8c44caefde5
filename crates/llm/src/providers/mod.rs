//! Chat model provider implementations.

pub mod openai;

pub use openai::OpenAiClient;
