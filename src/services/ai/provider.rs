//! Completion Provider Trait
//!
//! Defines the common interface for all completion providers, plus the
//! retry wrapper used for transient failures.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use super::claude::ClaudeProvider;
use super::gemini::GeminiProvider;
use super::local::LocalProvider;
use super::openai::OpenAiProvider;
use super::types::{AiError, AiResult, ProviderKind, ProviderSettings};

/// Trait that all completion providers must implement.
///
/// Providers take a single prompt and return the model's text response.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Send a prompt and get the complete text response.
    async fn complete(&self, prompt: &str) -> AiResult<String>;

    /// Check if the provider is reachable and configured.
    ///
    /// For API providers this validates the API key is present; for local
    /// servers it checks the server is running.
    async fn health_check(&self) -> AiResult<()>;
}

/// Build the provider selected by the settings
pub fn build_provider(settings: ProviderSettings) -> Box<dyn CompletionProvider> {
    match settings.provider {
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(settings)),
        ProviderKind::Claude => Box::new(ClaudeProvider::new(settings)),
        ProviderKind::Gemini => Box::new(GeminiProvider::new(settings)),
        ProviderKind::Local => Box::new(LocalProvider::new(settings)),
    }
}

/// Complete a prompt, retrying transient failures with exponential backoff.
///
/// Waits 1s, 2s, 4s, ... between attempts, capped at 64s so arbitrarily
/// large retry counts stay sane. Non-transient errors (auth, bad request,
/// parse) fail immediately.
pub async fn complete_with_retry(
    provider: &dyn CompletionProvider,
    prompt: &str,
    max_retries: u32,
) -> AiResult<String> {
    let mut attempt = 0;
    loop {
        match provider.complete(prompt).await {
            Ok(response) => return Ok(response),
            Err(err) if err.is_transient() && attempt < max_retries => {
                let backoff = Duration::from_secs(1u64 << attempt.min(6));
                warn!(
                    provider = provider.name(),
                    attempt = attempt + 1,
                    error = %err,
                    "Transient completion failure, retrying after {:?}",
                    backoff
                );
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Helper function to create an error for a missing API key
pub fn missing_api_key_error(provider: &str) -> AiError {
    AiError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> AiError {
    match status {
        401 => AiError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => AiError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => AiError::ModelNotFound {
            model: body.to_string(),
        },
        429 => AiError::RateLimited {
            message: body.to_string(),
        },
        400 => AiError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => AiError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => AiError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
