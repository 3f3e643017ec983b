//! AI Types
//!
//! Core types for completion-provider interactions.

use serde::{Deserialize, Serialize};

use crate::models::AppConfig;

/// Supported completion provider kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenAi,
    Claude,
    Gemini,
    Local,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::OpenAi => write!(f, "openai"),
            ProviderKind::Claude => write!(f, "claude"),
            ProviderKind::Gemini => write!(f, "gemini"),
            ProviderKind::Local => write!(f, "local"),
        }
    }
}

impl ProviderKind {
    pub fn parse(s: &str) -> Option<ProviderKind> {
        match s {
            "openai" => Some(ProviderKind::OpenAi),
            "claude" => Some(ProviderKind::Claude),
            "gemini" => Some(ProviderKind::Gemini),
            "local" => Some(ProviderKind::Local),
            _ => None,
        }
    }
}

/// Connection settings for a completion provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// The provider kind
    pub provider: ProviderKind,
    /// API key (not needed for local servers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Base URL override (used by local servers)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Model name to use
    pub model: String,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Temperature (0.0 - 2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Local,
            api_key: None,
            base_url: None,
            model: "qwen2.5-coder-3b-instruct".to_string(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

impl ProviderSettings {
    /// Derive provider settings from the application config
    pub fn from_config(config: &AppConfig) -> AiResult<Self> {
        let provider = ProviderKind::parse(&config.ai_provider).ok_or_else(|| {
            AiError::InvalidRequest {
                message: format!("unknown provider: {}", config.ai_provider),
            }
        })?;
        let api_key = match config.active_api_key() {
            "" => None,
            key => Some(key.to_string()),
        };
        Ok(Self {
            provider,
            api_key,
            base_url: match provider {
                ProviderKind::Local => Some(config.local_endpoint.clone()),
                _ => None,
            },
            model: config.ai_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

/// Errors from completion providers.
///
/// Serializable so failures can cross the worker/main-thread boundary intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AiError {
    /// Authentication failed (invalid or missing API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Model not found or not available
    ModelNotFound { model: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// Other error
    Other { message: String },
}

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AiError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            AiError::RateLimited { message } => {
                write!(f, "Rate limited: {}", message)
            }
            AiError::ModelNotFound { model } => {
                write!(f, "Model not found: {}", model)
            }
            AiError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            AiError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            AiError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            AiError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            AiError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for AiError {}

impl AiError {
    /// Whether a retry could plausibly succeed
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AiError::NetworkError { .. } | AiError::ServerError { .. } | AiError::RateLimited { .. }
        )
    }
}

/// Result type for AI operations
pub type AiResult<T> = Result<T, AiError>;
