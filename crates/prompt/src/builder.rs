//! Prompt rendering.

use crate::loader::validate_prompt;
use crate::types::{PromptDefinition, CONTEXT_VAR, QUESTION_VAR};
use handlebars::Handlebars;
use pdfsearch_core::{AppError, AppResult};
use std::collections::HashMap;

const TEMPLATE_NAME: &str = "prompt";

/// A validated prompt template, compiled once and rendered per question.
pub struct SearchPrompt {
    id: String,
    registry: Handlebars<'static>,
}

impl SearchPrompt {
    /// Validate and compile a prompt definition.
    pub fn new(definition: &PromptDefinition) -> AppResult<Self> {
        validate_prompt(definition)?;

        let mut registry = Handlebars::new();

        // Plain text, not HTML
        registry.register_escape_fn(handlebars::no_escape);
        registry.set_strict_mode(true);

        registry
            .register_template_string(TEMPLATE_NAME, &definition.template)
            .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

        Ok(Self {
            id: definition.id.clone(),
            registry,
        })
    }

    /// The built-in search prompt.
    pub fn builtin() -> AppResult<Self> {
        Self::new(&PromptDefinition::search())
    }

    /// Identifier of the underlying definition.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Substitute the context and question into the template.
    pub fn render(&self, context: &str, question: &str) -> AppResult<String> {
        let mut variables = HashMap::with_capacity(2);
        variables.insert(CONTEXT_VAR, context);
        variables.insert(QUESTION_VAR, question);

        self.registry
            .render(TEMPLATE_NAME, &variables)
            .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
    }
}

/// Render a prompt definition in one step.
///
/// # Example
/// ```
/// use pdfsearch_prompt::{build_prompt, PromptDefinition};
///
/// let prompt = build_prompt(&PromptDefinition::search(), "Texto", "Pergunta?").unwrap();
/// assert!(prompt.contains("Pergunta?"));
/// ```
pub fn build_prompt(definition: &PromptDefinition, context: &str, question: &str) -> AppResult<String> {
    tracing::debug!("Building prompt: {}", definition.id);
    SearchPrompt::new(definition)?.render(context, question)
}
