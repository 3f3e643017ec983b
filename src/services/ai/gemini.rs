//! Gemini Provider
//!
//! Implementation of the CompletionProvider trait for Google's
//! generateContent API. The API key travels as a query parameter.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, CompletionProvider};
use super::types::{AiError, AiResult, ProviderSettings};

/// Base URL for the Gemini API
const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1/models";

/// Gemini provider
pub struct GeminiProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given settings
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    fn endpoint(&self, api_key: &str) -> String {
        format!(
            "{}/{}:generateContent?key={}",
            GEMINI_API_BASE, self.settings.model, api_key
        )
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "contents": [
                {"parts": [{"text": prompt}]}
            ],
            "generationConfig": {
                "temperature": self.settings.temperature,
                "maxOutputTokens": self.settings.max_tokens,
            },
        })
    }
}

#[async_trait]
impl CompletionProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, prompt: &str) -> AiResult<String> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;

        let response = self
            .client
            .post(self.endpoint(api_key))
            .header("Content-Type", "application/json")
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| AiError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| AiError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "gemini"));
        }

        let parsed: GeminiResponse =
            serde_json::from_str(&body_text).map_err(|e| AiError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| AiError::ParseError {
                message: "Response contained no candidates".to_string(),
            })
    }

    async fn health_check(&self) -> AiResult<()> {
        self.settings
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("gemini"))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Vec<GeminiCandidate>,
}

#[derive(Debug, Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ai::types::ProviderKind;

    fn test_settings() -> ProviderSettings {
        ProviderSettings {
            provider: ProviderKind::Gemini,
            api_key: Some("AIza-test".to_string()),
            base_url: None,
            model: "gemini-1.5-flash".to_string(),
            max_tokens: 256,
            temperature: 0.2,
        }
    }

    #[test]
    fn test_endpoint_includes_model_and_key() {
        let provider = GeminiProvider::new(test_settings());
        let url = provider.endpoint("AIza-test");
        assert!(url.contains("/gemini-1.5-flash:generateContent?key=AIza-test"));
    }

    #[test]
    fn test_response_parsing() {
        let raw = r#"{"candidates": [{"content": {"parts": [{"text": "answer"}]}}]}"#;
        let parsed: GeminiResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.candidates[0].content.parts[0].text, "answer");
    }

    #[tokio::test]
    async fn test_missing_key_fails_fast() {
        let mut settings = test_settings();
        settings.api_key = None;
        let provider = GeminiProvider::new(settings);
        let err = provider.complete("hi").await.unwrap_err();
        assert!(matches!(err, AiError::AuthenticationFailed { .. }));
    }
}
