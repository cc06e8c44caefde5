//! LLM provider factory.
//!
//! Builds a chat client from the provider name and the resolved endpoint and
//! API key.

use crate::client::LlmClient;
use crate::providers::OpenAiClient;
use std::sync::Arc;

/// Create an LLM client based on the provider name.
///
/// # Arguments
/// * `provider` - Provider identifier ("openai")
/// * `endpoint` - Optional custom endpoint URL
/// * `api_key` - API key, required by hosted providers
///
/// # Errors
/// Returns error if the provider is unknown or its API key is missing.
pub fn create_client(
    provider: &str,
    endpoint: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<dyn LlmClient>, String> {
    match provider.to_lowercase().as_str() {
        "openai" => {
            let api_key = api_key
                .filter(|key| !key.is_empty())
                .ok_or_else(|| "OpenAI provider requires API key".to_string())?;
            let client = match endpoint {
                Some(base_url) => OpenAiClient::with_base_url(base_url, api_key),
                None => OpenAiClient::new(api_key),
            };
            Ok(Arc::new(client))
        }
        _ => Err(format!("Unknown provider: {}", provider)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_openai_client() {
        let client = create_client("openai", None, Some("sk-test")).unwrap();
        assert_eq!(client.provider_name(), "openai");
    }

    #[test]
    fn test_create_openai_with_custom_endpoint() {
        let client = create_client("OpenAI", Some("http://localhost:8080/v1"), Some("sk-test"));
        assert!(client.is_ok());
    }

    #[test]
    fn test_openai_requires_api_key() {
        for key in [None, Some("")] {
            match create_client("openai", None, key) {
                Err(err) => assert!(err.contains("OpenAI provider requires API key")),
                Ok(_) => panic!("Expected error for OpenAI without API key"),
            }
        }
    }

    #[test]
    fn test_unknown_provider() {
        match create_client("unknown", None, Some("sk-test")) {
            Err(err) => assert!(err.contains("Unknown provider")),
            Ok(_) => panic!("Expected error for unknown provider"),
        }
    }
}
