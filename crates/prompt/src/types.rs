//! Prompt types for the PDF search CLI.

use serde::{Deserialize, Serialize};

/// Template variable receiving the retrieved document text.
pub const CONTEXT_VAR: &str = "context";

/// Template variable receiving the user's question.
pub const QUESTION_VAR: &str = "question";

/// Identifier of the built-in search prompt.
pub const SEARCH_PROMPT_ID: &str = "search.default";

/// Built-in search prompt.
///
/// The answer must come only from the context; the fallback sentence matches
/// the answer given when retrieval finds nothing.
pub const SEARCH_PROMPT_TEMPLATE: &str = r#"CONTEXTO:
{{context}}

REGRAS:
- Responda somente com base no CONTEXTO.
- Se a informação não estiver explicitamente no CONTEXTO, responda:
  "Não tenho informações necessárias para responder sua pergunta."
- Nunca invente ou use conhecimento externo.
- Nunca produza opiniões ou interpretações além do que está escrito.

EXEMPLOS DE PERGUNTAS FORA DO CONTEXTO:
Pergunta: "Qual é a capital da França?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

Pergunta: "Quantos clientes temos em 2024?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

Pergunta: "Você acha isso bom ou ruim?"
Resposta: "Não tenho informações necessárias para responder sua pergunta."

PERGUNTA DO USUÁRIO:
{{question}}

RESPONDA A "PERGUNTA DO USUÁRIO""#;

/// A prompt definition, either built in or loaded from YAML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

impl PromptDefinition {
    /// The built-in search prompt.
    pub fn search() -> Self {
        Self {
            id: SEARCH_PROMPT_ID.to_string(),
            title: "Busca semântica em documentos".to_string(),
            template: SEARCH_PROMPT_TEMPLATE.to_string(),
        }
    }
}

impl Default for PromptDefinition {
    fn default() -> Self {
        Self::search()
    }
}
