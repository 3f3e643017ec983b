//! Local Provider
//!
//! Implementation of the CompletionProvider trait for OpenAI-compatible
//! local servers such as LM Studio and Ollama. No authentication.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{parse_http_error, CompletionProvider};
use super::types::{AiError, AiResult, ProviderSettings};

/// Default local server base URL (LM Studio's default port)
const DEFAULT_LOCAL_BASE: &str = "http://localhost:1234/v1";

/// Local OpenAI-compatible provider
pub struct LocalProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl LocalProvider {
    /// Create a new local provider with the given settings
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
    }

    fn base_url(&self) -> &str {
        self.settings
            .base_url
            .as_deref()
            .unwrap_or(DEFAULT_LOCAL_BASE)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url().trim_end_matches('/'))
    }

    fn build_request_body(&self, prompt: &str) -> serde_json::Value {
        serde_json::json!({
            "model": self.settings.model,
            "max_tokens": self.settings.max_tokens,
            "temperature": self.settings.temperature,
            "messages": [
                {"role": "user", "content": prompt}
            ],
        })
    }
}

#[async_trait]
impl CompletionProvider for LocalProvider {
    fn name(&self) -> &'static str {
        "local"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, prompt: &str) -> AiResult<String> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Content-Type", "application/json")
            .json(&self.build_request_body(prompt))
            .send()
            .await
            .map_err(|e| AiError::NetworkError {
                message: format!("local server unreachable: {}", e),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| AiError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "local"));
        }

        let parsed: LocalResponse =
            serde_json::from_str(&body_text).map_err(|e| AiError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AiError::ParseError {
                message: "Response contained no choices".to_string(),
            })
    }

    async fn health_check(&self) -> AiResult<()> {
        let url = format!("{}/models", self.base_url().trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AiError::NetworkError {
                message: format!("local server unreachable: {}", e),
            })?;

        let status = response.status().as_u16();
        if status == 200 {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(parse_http_error(status, &body, "local"))
        }
    }
}

#[derive(Debug, Deserialize)]
struct LocalResponse {
    choices: Vec<LocalChoice>,
}

#[derive(Debug, Deserialize)]
struct LocalChoice {
    message: LocalMessage,
}

#[derive(Debug, Deserialize)]
struct LocalMessage {
    content: String,
}
