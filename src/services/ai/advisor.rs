//! Code Advisor
//!
//! Advisory façade over the completion providers. Each operation fills a
//! prompt template, consults the response cache, and delegates to the
//! configured provider with retry. Provider failures surface as a single
//! AI-service error carrying the upstream message.

use similar::TextDiff;
use tracing::debug;

use super::cache::ResponseCache;
use super::provider::{build_provider, complete_with_retry, CompletionProvider};
use super::types::{AiResult, ProviderSettings};
use crate::models::AppConfig;
use crate::utils::error::{AppError, AppResult};

/// Advisory façade for AI code review
pub struct CodeAdvisor {
    provider: Box<dyn CompletionProvider>,
    cache: ResponseCache,
    temperature: f32,
    max_retries: u32,
}

impl CodeAdvisor {
    /// Build an advisor from the application config
    pub fn from_config(config: &AppConfig) -> AiResult<Self> {
        let settings = ProviderSettings::from_config(config)?;
        let temperature = settings.temperature;
        Ok(Self {
            provider: build_provider(settings),
            cache: ResponseCache::new(config.cache_ttl_secs),
            temperature,
            max_retries: config.max_retries,
        })
    }

    /// Build an advisor around an explicit provider (used in tests)
    pub fn with_provider(
        provider: Box<dyn CompletionProvider>,
        cache_ttl_secs: u64,
        temperature: f32,
        max_retries: u32,
    ) -> Self {
        Self {
            provider,
            cache: ResponseCache::new(cache_ttl_secs),
            temperature,
            max_retries,
        }
    }

    /// Name of the active provider
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Check the active provider is reachable and configured
    pub async fn health_check(&self) -> AppResult<()> {
        self.provider
            .health_check()
            .await
            .map_err(|e| AppError::ai_service(e.to_string()))
    }

    async fn ask(&self, prompt: String) -> AppResult<String> {
        let key = ResponseCache::key(&prompt, self.provider.model(), self.temperature);
        if let Some(cached) = self.cache.get(&key) {
            debug!(provider = self.provider.name(), "AI response served from cache");
            return Ok(cached);
        }

        let response = complete_with_retry(self.provider.as_ref(), &prompt, self.max_retries)
            .await
            .map_err(|e| AppError::ai_service(e.to_string()))?;

        self.cache.put(key, response.clone());
        Ok(response)
    }

    /// Assess overall code quality with concrete improvement suggestions
    pub async fn analyze_quality(&self, code: &str, language: &str) -> AppResult<String> {
        let prompt = format!(
            "You are a senior software engineer reviewing {language} code.\n\
             Assess the overall quality of the following code: readability,\n\
             structure, naming, and maintainability. Give a short verdict\n\
             followed by concrete improvement suggestions.\n\n\
             ```{language}\n{code}\n```"
        );
        self.ask(prompt).await
    }

    /// Find bugs, edge cases, and potential runtime errors
    pub async fn find_issues(&self, code: &str, language: &str) -> AppResult<String> {
        let prompt = format!(
            "Review the following {language} code for bugs, unhandled edge\n\
             cases, and potential runtime errors. List each issue with the\n\
             line it occurs on and a suggested fix. If the code looks\n\
             correct, say so.\n\n\
             ```{language}\n{code}\n```"
        );
        self.ask(prompt).await
    }

    /// Generate a documentation comment for a function or type
    pub async fn generate_docstring(&self, code: &str, language: &str) -> AppResult<String> {
        let prompt = format!(
            "Write an idiomatic {language} documentation comment for the\n\
             following code. Describe what it does, its parameters, and its\n\
             return value. Return only the documentation comment.\n\n\
             ```{language}\n{code}\n```"
        );
        self.ask(prompt).await
    }

    /// Suggest a refactoring of the code
    pub async fn suggest_refactor(&self, code: &str, language: &str) -> AppResult<String> {
        let prompt = format!(
            "Suggest a refactoring of the following {language} code to\n\
             improve clarity and structure without changing behavior. Show\n\
             the refactored code and briefly explain each change.\n\n\
             ```{language}\n{code}\n```"
        );
        self.ask(prompt).await
    }

    /// Explain what the code does in plain language
    pub async fn explain_code(&self, code: &str, language: &str) -> AppResult<String> {
        let prompt = format!(
            "Explain what the following {language} code does in plain\n\
             language, suitable for a developer unfamiliar with this\n\
             codebase. Cover the overall purpose first, then any non-obvious\n\
             details.\n\n\
             ```{language}\n{code}\n```"
        );
        self.ask(prompt).await
    }

    /// Review the changes between two versions of a file
    pub async fn review_changes(
        &self,
        path: &str,
        old_content: &str,
        new_content: &str,
    ) -> AppResult<String> {
        let diff = TextDiff::from_lines(old_content, new_content)
            .unified_diff()
            .context_radius(3)
            .header(&format!("a/{}", path), &format!("b/{}", path))
            .to_string();
        let prompt = format!(
            "Review the following change to {path}. Point out bugs or\n\
             regressions the change may introduce, and note anything that\n\
             should be cleaned up before merging.\n\n\
             ```diff\n{diff}\n```"
        );
        self.ask(prompt).await
    }

    /// Generate a one-line commit message for a diff
    pub async fn generate_commit_message(&self, diff: &str) -> AppResult<String> {
        let prompt = format!(
            "Write a concise one-line commit message in the imperative mood\n\
             for the following diff. Return only the message.\n\n\
             ```diff\n{diff}\n```"
        );
        self.ask(prompt).await
    }
}
