//! File System Watcher
//!
//! Watches source directories with debouncing and turns file
//! modifications into `FileSaved` events on the editor bus, so real
//! saves travel the same path as simulated ones.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use tracing::{debug, warn};

use super::client::EditorClient;
use super::events::EditorEvent;
use crate::utils::error::{AppError, AppResult};

/// Configuration for the file watcher
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Debounce duration for rapid changes
    pub debounce_ms: u64,
    /// Extensions (without dot) that produce events; empty matches all
    pub extensions: Vec<String>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            extensions: Vec::new(),
        }
    }
}

/// Debounced directory watcher feeding the editor event bus.
///
/// Watching stops when the value is dropped.
pub struct FileWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    watched: Vec<PathBuf>,
}

impl FileWatcher {
    /// Watch a directory tree, posting `FileSaved` events for matching files
    pub fn start(root: &Path, config: WatcherConfig, client: EditorClient) -> AppResult<Self> {
        if !root.exists() {
            return Err(AppError::not_found(format!(
                "watch root {:?} does not exist",
                root
            )));
        }

        let extensions = config.extensions.clone();
        let mut debouncer = new_debouncer(
            Duration::from_millis(config.debounce_ms),
            move |result: Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>| {
                match result {
                    Ok(events) => {
                        for event in events {
                            if event.kind != DebouncedEventKind::Any {
                                continue;
                            }
                            Self::handle_change(&client, &extensions, &event.path);
                        }
                    }
                    Err(error) => {
                        warn!(error = %error, "File watcher error");
                    }
                }
            },
        )
        .map_err(|e| AppError::watcher(format!("Failed to create watcher: {}", e)))?;

        debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| AppError::watcher(format!("Failed to watch {:?}: {}", root, e)))?;

        Ok(Self {
            debouncer,
            watched: vec![root.to_path_buf()],
        })
    }

    /// Add another directory tree to the same watcher
    pub fn watch(&mut self, root: &Path) -> AppResult<()> {
        self.debouncer
            .watcher()
            .watch(root, RecursiveMode::Recursive)
            .map_err(|e| AppError::watcher(format!("Failed to watch {:?}: {}", root, e)))?;
        self.watched.push(root.to_path_buf());
        Ok(())
    }

    /// Paths currently being watched
    pub fn watched_paths(&self) -> &[PathBuf] {
        &self.watched
    }

    fn handle_change(client: &EditorClient, extensions: &[String], path: &Path) {
        if !matches_extension(extensions, path) {
            return;
        }
        // Deleted files and binary content are skipped
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Skipping unreadable changed file");
                return;
            }
        };
        client.emit(EditorEvent::FileSaved {
            path: path.to_string_lossy().into_owned(),
            content,
            timestamp: chrono::Utc::now(),
        });
    }
}

fn matches_extension(extensions: &[String], path: &Path) -> bool {
    if extensions.is_empty() {
        return true;
    }
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.iter().any(|allowed| allowed == ext))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::editor::client::event_bus;

    #[test]
    fn test_matches_extension_filter() {
        let exts = vec!["rs".to_string(), "py".to_string()];
        assert!(matches_extension(&exts, Path::new("src/main.rs")));
        assert!(matches_extension(&exts, Path::new("app.py")));
        assert!(!matches_extension(&exts, Path::new("notes.md")));
        assert!(!matches_extension(&exts, Path::new("Makefile")));
    }

    #[test]
    fn test_empty_filter_matches_all() {
        assert!(matches_extension(&[], Path::new("anything.xyz")));
    }

    #[test]
    fn test_start_rejects_missing_root() {
        let (client, _rx) = event_bus();
        let result = FileWatcher::start(
            Path::new("/does/not/exist"),
            WatcherConfig::default(),
            client,
        );
        assert!(matches!(result.err(), Some(AppError::NotFound(_))));
    }

    #[test]
    fn test_start_watches_existing_dir() {
        let tmp = tempfile::TempDir::new().unwrap();
        let (client, _rx) = event_bus();
        let watcher =
            FileWatcher::start(tmp.path(), WatcherConfig::default(), client).unwrap();
        assert_eq!(watcher.watched_paths().len(), 1);
    }
}
