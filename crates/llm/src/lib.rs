//! Chat model integration crate for the PDF search CLI.
//!
//! Provides a provider-agnostic `LlmClient` trait and the OpenAI chat
//! completions implementation used to answer questions.
//!
//! # Example
//! ```no_run
//! use pdfsearch_llm::{LlmClient, LlmRequest, OpenAiClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAiClient::new("sk-...");
//! let request = LlmRequest::new("Olá!", "gpt-5-mini");
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod factory;
pub mod providers;

// Re-export main types
pub use client::{LlmClient, LlmRequest, LlmResponse, LlmUsage};
pub use factory::create_client;
pub use providers::OpenAiClient;
