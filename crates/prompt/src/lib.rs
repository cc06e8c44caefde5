//! Prompt system for the PDF search CLI.
//!
//! This crate provides:
//! - The built-in search prompt (`context` + `question` placeholders)
//! - YAML prompt definitions overriding it
//! - Handlebars template rendering

pub mod builder;
pub mod loader;
pub mod types;

// Re-export main types
pub use builder::{build_prompt, SearchPrompt};
pub use loader::{load_prompt, template_variables, validate_prompt};
pub use types::{PromptDefinition, CONTEXT_VAR, QUESTION_VAR, SEARCH_PROMPT_ID, SEARCH_PROMPT_TEMPLATE};
