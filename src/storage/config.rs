//! JSON Configuration Management
//!
//! Handles reading and writing the application configuration file.
//! A malformed or invalid config file falls back to defaults with a
//! logged warning rather than aborting startup.

use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{config_path, ensure_app_data_dir};

/// Configuration service for managing app settings
#[derive(Debug)]
pub struct ConfigService {
    config_path: PathBuf,
    config: AppConfig,
}

impl ConfigService {
    /// Create a new config service, loading existing config or creating defaults
    pub fn new() -> AppResult<Self> {
        // Ensure the config directory exists
        ensure_app_data_dir()?;
        Self::with_path(config_path()?)
    }

    /// Create a config service backed by an explicit file path
    pub fn with_path(config_path: PathBuf) -> AppResult<Self> {
        let config = if config_path.exists() {
            match Self::load_from_file(&config_path) {
                Ok(config) => config,
                Err(e) => {
                    warn!(
                        path = %config_path.display(),
                        error = %e,
                        "Config file unreadable or invalid, falling back to defaults"
                    );
                    AppConfig::default()
                }
            }
        } else {
            let default_config = AppConfig::default();
            Self::save_to_file(&config_path, &default_config)?;
            default_config
        };

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a file
    fn load_from_file(path: &PathBuf) -> AppResult<AppConfig> {
        let content = fs::read_to_string(path)?;
        let config: AppConfig = serde_json::from_str(&content)?;
        config.validate().map_err(AppError::validation)?;
        Ok(config)
    }

    /// Save configuration to a file with pretty formatting
    fn save_to_file(path: &PathBuf, config: &AppConfig) -> AppResult<()> {
        config.validate().map_err(AppError::validation)?;
        let content = serde_json::to_string_pretty(config)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the current configuration
    pub fn get_config(&self) -> &AppConfig {
        &self.config
    }

    /// Get a clone of the current configuration
    pub fn get_config_clone(&self) -> AppConfig {
        self.config.clone()
    }

    /// Update the configuration with a partial update
    pub fn update_config(&mut self, update: SettingsUpdate) -> AppResult<AppConfig> {
        self.config.apply_update(update);
        self.save()?;
        Ok(self.config.clone())
    }

    /// Save the current configuration to disk
    pub fn save(&self) -> AppResult<()> {
        Self::save_to_file(&self.config_path, &self.config)
    }

    /// Reload configuration from disk
    pub fn reload(&mut self) -> AppResult<()> {
        self.config = Self::load_from_file(&self.config_path)?;
        Ok(())
    }

    /// Reset configuration to defaults
    pub fn reset(&mut self) -> AppResult<()> {
        self.config = AppConfig::default();
        self.save()?;
        Ok(())
    }

    /// Check if the config service is healthy
    pub fn is_healthy(&self) -> bool {
        self.config_path.exists() && self.config.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_config_file() -> (NamedTempFile, PathBuf) {
        let mut file = NamedTempFile::new().unwrap();
        let config = AppConfig::default();
        let content = serde_json::to_string_pretty(&config).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let path = file.path().to_path_buf();
        (file, path)
    }

    #[test]
    fn test_load_config_from_file() {
        let (_file, path) = create_test_config_file();
        let config = ConfigService::load_from_file(&path).unwrap();
        assert_eq!(config.ai_provider, "local");
    }

    #[test]
    fn test_save_config_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let config = AppConfig::default();

        ConfigService::save_to_file(&path, &config).unwrap();

        assert!(path.exists());
        let loaded = ConfigService::load_from_file(&path).unwrap();
        assert_eq!(loaded.ai_provider, config.ai_provider);
    }

    #[test]
    fn test_missing_file_creates_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let service = ConfigService::with_path(path.clone()).unwrap();

        assert!(path.exists());
        assert_eq!(service.get_config().ai_provider, "local");
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, "{ not valid json").unwrap();

        let service = ConfigService::with_path(path).unwrap();
        assert_eq!(service.get_config().ai_provider, "local");
        assert_eq!(service.get_config().cache_ttl_secs, 3600);
    }

    #[test]
    fn test_invalid_values_fall_back_to_defaults() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"ai_provider": "cohere"}"#).unwrap();

        let service = ConfigService::with_path(path).unwrap();
        assert_eq!(service.get_config().ai_provider, "local");
    }

    #[test]
    fn test_config_update() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let mut service = ConfigService::with_path(path).unwrap();

        let update = SettingsUpdate {
            ai_provider: Some("openai".to_string()),
            ..Default::default()
        };

        let updated = service.update_config(update).unwrap();
        assert_eq!(updated.ai_provider, "openai");

        service.reload().unwrap();
        assert_eq!(service.get_config().ai_provider, "openai");
    }
}
