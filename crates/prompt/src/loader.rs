//! Prompt loader and template validation.

use crate::types::{PromptDefinition, CONTEXT_VAR, QUESTION_VAR};
use pdfsearch_core::{AppError, AppResult};
use std::path::Path;

/// Load a prompt definition from a YAML file.
///
/// The file holds `id`, `title` and `template`; the template must use exactly
/// the `context` and `question` variables.
///
/// # Example
/// ```no_run
/// use pdfsearch_prompt::load_prompt;
/// use std::path::Path;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let prompt = load_prompt(Path::new("prompts/search.yml"))?;
/// println!("Loaded prompt: {}", prompt.title);
/// # Ok(())
/// # }
/// ```
pub fn load_prompt(path: &Path) -> AppResult<PromptDefinition> {
    tracing::debug!("Loading prompt from: {:?}", path);

    if !path.exists() {
        return Err(AppError::Prompt(format!("Prompt file not found: {:?}", path)));
    }

    let contents = std::fs::read_to_string(path).map_err(|e| {
        AppError::Prompt(format!("Failed to read prompt file {:?}: {}", path, e))
    })?;

    let definition: PromptDefinition = serde_yaml::from_str(&contents).map_err(|e| {
        AppError::Prompt(format!("Failed to parse prompt YAML {:?}: {}", path, e))
    })?;

    validate_prompt(&definition)?;

    tracing::info!("Loaded prompt: {} ({})", definition.id, definition.title);

    Ok(definition)
}

/// Validate a prompt definition.
pub fn validate_prompt(def: &PromptDefinition) -> AppResult<()> {
    if def.id.trim().is_empty() {
        return Err(AppError::Prompt("Prompt ID cannot be empty".to_string()));
    }

    if def.title.trim().is_empty() {
        return Err(AppError::Prompt("Prompt title cannot be empty".to_string()));
    }

    if def.template.trim().is_empty() {
        return Err(AppError::Prompt(
            "Prompt template cannot be empty".to_string(),
        ));
    }

    let variables = template_variables(&def.template);

    if let Some(unknown) = variables
        .iter()
        .find(|name| name.as_str() != CONTEXT_VAR && name.as_str() != QUESTION_VAR)
    {
        return Err(AppError::Prompt(format!(
            "Prompt '{}' uses unsupported variable '{}'. Only '{}' and '{}' are available",
            def.id, unknown, CONTEXT_VAR, QUESTION_VAR
        )));
    }

    for required in [CONTEXT_VAR, QUESTION_VAR] {
        if !variables.iter().any(|name| name == required) {
            return Err(AppError::Prompt(format!(
                "Prompt '{}' is missing the '{{{{{}}}}}' placeholder",
                def.id, required
            )));
        }
    }

    Ok(())
}

/// Names referenced by `{{name}}` expressions, in order of appearance.
///
/// Comments (`{{! ... }}`) are skipped; triple-stash and `&` forms are
/// reported by their bare name.
pub fn template_variables(template: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        let after_open = &rest[start + 2..];
        let Some(end) = after_open.find("}}") else {
            break;
        };

        let expr = after_open[..end]
            .trim_start_matches('{')
            .trim_start_matches('~')
            .trim_end_matches('~')
            .trim()
            .trim_start_matches('&')
            .trim();

        if !expr.is_empty() && !expr.starts_with('!') {
            names.push(expr.to_string());
        }

        rest = after_open[end + 2..].trim_start_matches('}');
    }

    names
}
