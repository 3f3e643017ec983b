//! Cross-Platform Path Utilities
//!
//! Functions for resolving application directories across platforms.
//! All persistent state lives under ~/.windsurf-memory/.

use std::path::PathBuf;

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the application data directory (~/.windsurf-memory/)
pub fn app_data_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".windsurf-memory"))
}

/// Get the config file path (~/.windsurf-memory/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("config.json"))
}

/// Get the database file path (~/.windsurf-memory/data.db)
pub fn database_path() -> AppResult<PathBuf> {
    Ok(app_data_dir()?.join("data.db"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &PathBuf) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the application data directory, creating if it doesn't exist
pub fn ensure_app_data_dir() -> AppResult<PathBuf> {
    let path = app_data_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_home_dir() {
        let home = home_dir();
        assert!(home.is_ok());
        assert!(home.unwrap().exists());
    }

    #[test]
    fn test_app_data_dir() {
        let dir = app_data_dir();
        assert!(dir.is_ok());
        let path = dir.unwrap();
        assert!(path.to_string_lossy().contains(".windsurf-memory"));
    }

    #[test]
    fn test_config_path() {
        let path = config_path();
        assert!(path.is_ok());
        assert!(path.unwrap().to_string_lossy().contains("config.json"));
    }

    #[test]
    fn test_database_path() {
        let path = database_path();
        assert!(path.is_ok());
        assert!(path.unwrap().to_string_lossy().contains("data.db"));
    }
}
