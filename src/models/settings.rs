//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// AI provider: "openai", "claude", "gemini", or "local"
    pub ai_provider: String,
    /// Model name for the selected provider
    pub ai_model: String,
    /// OpenAI API key
    pub openai_api_key: String,
    /// Anthropic Claude API key
    pub claude_api_key: String,
    /// Google Gemini API key
    pub gemini_api_key: String,
    /// Base URL for a local OpenAI-compatible server (LM Studio, Ollama)
    pub local_endpoint: String,
    /// Sampling temperature passed to completion requests
    pub temperature: f32,
    /// Maximum completion tokens
    pub max_tokens: u32,
    /// Enable AI review features
    pub ai_enabled: bool,
    /// AI response cache TTL in seconds
    pub cache_ttl_secs: u64,
    /// Maximum retry attempts for transient AI failures
    pub max_retries: u32,
    /// Automatically snapshot files on save events
    pub auto_snapshot: bool,
    /// Enable the filesystem watcher
    pub watcher_enabled: bool,
    /// File extensions the watcher reacts to
    pub watch_extensions: Vec<String>,
    /// Watcher debounce window in milliseconds
    pub watcher_debounce_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            ai_provider: "local".to_string(),
            ai_model: "qwen2.5-coder-3b-instruct".to_string(),
            openai_api_key: String::new(),
            claude_api_key: String::new(),
            gemini_api_key: String::new(),
            local_endpoint: "http://localhost:1234/v1".to_string(),
            temperature: 0.7,
            max_tokens: 2048,
            ai_enabled: true,
            cache_ttl_secs: 3600,
            max_retries: 3,
            auto_snapshot: true,
            watcher_enabled: false,
            watch_extensions: vec![
                "rs".to_string(),
                "py".to_string(),
                "js".to_string(),
                "ts".to_string(),
            ],
            watcher_debounce_ms: 500,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub ai_provider: Option<String>,
    pub ai_model: Option<String>,
    pub openai_api_key: Option<String>,
    pub claude_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub local_endpoint: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    pub ai_enabled: Option<bool>,
    pub cache_ttl_secs: Option<u64>,
    pub max_retries: Option<u32>,
    pub auto_snapshot: Option<bool>,
    pub watcher_enabled: Option<bool>,
    pub watch_extensions: Option<Vec<String>>,
    pub watcher_debounce_ms: Option<u64>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(provider) = update.ai_provider {
            self.ai_provider = provider;
        }
        if let Some(model) = update.ai_model {
            self.ai_model = model;
        }
        if let Some(key) = update.openai_api_key {
            self.openai_api_key = key;
        }
        if let Some(key) = update.claude_api_key {
            self.claude_api_key = key;
        }
        if let Some(key) = update.gemini_api_key {
            self.gemini_api_key = key;
        }
        if let Some(endpoint) = update.local_endpoint {
            self.local_endpoint = endpoint;
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(enabled) = update.ai_enabled {
            self.ai_enabled = enabled;
        }
        if let Some(ttl) = update.cache_ttl_secs {
            self.cache_ttl_secs = ttl;
        }
        if let Some(retries) = update.max_retries {
            self.max_retries = retries;
        }
        if let Some(auto) = update.auto_snapshot {
            self.auto_snapshot = auto;
        }
        if let Some(enabled) = update.watcher_enabled {
            self.watcher_enabled = enabled;
        }
        if let Some(exts) = update.watch_extensions {
            self.watch_extensions = exts;
        }
        if let Some(debounce) = update.watcher_debounce_ms {
            self.watcher_debounce_ms = debounce;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if !["openai", "claude", "gemini", "local"].contains(&self.ai_provider.as_str()) {
            return Err(format!(
                "Invalid ai_provider: {}. Must be 'openai', 'claude', 'gemini', or 'local'",
                self.ai_provider
            ));
        }

        if self.ai_model.is_empty() {
            return Err("ai_model cannot be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err("temperature must be between 0.0 and 2.0".to_string());
        }

        if self.max_tokens == 0 {
            return Err("max_tokens must be at least 1".to_string());
        }

        if self.watcher_debounce_ms < 50 {
            return Err("watcher_debounce_ms must be at least 50".to_string());
        }

        Ok(())
    }

    /// API key for the currently selected provider, if it requires one
    pub fn active_api_key(&self) -> &str {
        match self.ai_provider.as_str() {
            "openai" => &self.openai_api_key,
            "claude" => &self.claude_api_key,
            "gemini" => &self.gemini_api_key,
            _ => "",
        }
    }
}
