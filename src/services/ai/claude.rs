//! Claude Provider
//!
//! Implementation of the CompletionProvider trait for Anthropic's
//! messages API.

use async_trait::async_trait;
use serde::Deserialize;

use super::provider::{missing_api_key_error, parse_http_error, CompletionProvider};
use super::types::{AiError, AiResult, ProviderSettings};

/// Default Anthropic API endpoint
const CLAUDE_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Claude provider
pub struct ClaudeProvider {
    settings: ProviderSettings,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Create a new Claude provider with the given settings
    pub fn new(settings: ProviderSettings) -> Self {
        Self {
            settings,
            client: reqwest::Client::new(),
        }
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
impl CompletionProvider for ClaudeProvider {
    fn name(&self) -> &'static str {
        "claude"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }

    async fn complete(&self, prompt: &str) -> AiResult<String> {
        let api_key = self
            .settings
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("claude"))?;

        let response = self
            .client
            .post(CLAUDE_API_URL)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
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
            return Err(parse_http_error(status, &body_text, "claude"));
        }

        let parsed: ClaudeResponse =
            serde_json::from_str(&body_text).map_err(|e| AiError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let text: String = parsed
            .content
            .into_iter()
            .filter_map(|block| match block.block_type.as_str() {
                "text" => block.text,
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("\n");

        if text.is_empty() {
            return Err(AiError::ParseError {
                message: "Response contained no text blocks".to_string(),
            });
        }
        Ok(text)
    }

    async fn health_check(&self) -> AiResult<()> {
        self.settings
            .api_key
            .as_ref()
            .ok_or_else(|| missing_api_key_error("claude"))?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ClaudeContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ClaudeContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}
