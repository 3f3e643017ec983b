//! Persistence Tests
//!
//! Round-trips config and database state through the filesystem and
//! verifies tracker state survives a restart.

use chrono::Utc;
use tempfile::TempDir;

use windsurf_tracker::models::{AppConfig, NewTask, TaskStatus};
use windsurf_tracker::storage::{ConfigService, Database};
use windsurf_tracker::{SettingsUpdate, Tracker};

#[test]
fn test_config_round_trips_through_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    {
        let mut service = ConfigService::with_path(path.clone()).unwrap();
        service
            .update_config(SettingsUpdate {
                ai_provider: Some("openai".to_string()),
                openai_api_key: Some("sk-test".to_string()),
                temperature: Some(0.2),
                auto_snapshot: Some(false),
                ..Default::default()
            })
            .unwrap();
    }

    let reloaded = ConfigService::with_path(path).unwrap();
    let config = reloaded.get_config();
    assert_eq!(config.ai_provider, "openai");
    assert_eq!(config.openai_api_key, "sk-test");
    assert_eq!(config.temperature, 0.2);
    assert!(!config.auto_snapshot);
}

#[test]
fn test_malformed_config_file_falls_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json at all").unwrap();

    let service = ConfigService::with_path(path).unwrap();
    assert_eq!(*service.get_config(), AppConfig::default());
}

#[test]
fn test_partial_config_file_fills_missing_fields() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, r#"{"ai_provider": "claude"}"#).unwrap();

    let service = ConfigService::with_path(path).unwrap();
    let config = service.get_config();
    assert_eq!(config.ai_provider, "claude");
    assert_eq!(config.max_retries, AppConfig::default().max_retries);
    assert!(config.ai_enabled);
}

#[test]
fn test_tracker_state_survives_restart() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data.db");

    {
        let db = Database::with_file(&db_path).unwrap();
        let mut t = Tracker::new(db, AppConfig::default()).unwrap();
        t.create_task(NewTask::new("TASK-001", "persisted task")).unwrap();
        t.create_task(NewTask::new("TASK-002", "another task")).unwrap();
        t.move_task("TASK-001", TaskStatus::InProgress).unwrap();
        t.link_file("TASK-001", "src/lib.rs").unwrap();
        t.record_snapshot("src/lib.rs", "fn main() {}\n", Utc::now())
            .unwrap();
    }

    let db = Database::with_file(&db_path).unwrap();
    let t = Tracker::new(db, AppConfig::default()).unwrap();

    assert_eq!(t.task_count(), 2);
    let task = t.get_task("TASK-001").unwrap();
    assert_eq!(task.title, "persisted task");
    assert_eq!(task.status, TaskStatus::InProgress);
    assert_eq!(task.linked_files, vec!["src/lib.rs".to_string()]);

    assert_eq!(t.board().column(TaskStatus::InProgress), &["TASK-001"]);
    assert_eq!(t.board().column(TaskStatus::Todo), &["TASK-002"]);

    let history = t.snapshot_history("src/lib.rs");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].content().unwrap(), "fn main() {}\n");
}

#[test]
fn test_restart_continues_snapshot_sequence() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data.db");

    {
        let db = Database::with_file(&db_path).unwrap();
        let mut t = Tracker::new(db, AppConfig::default()).unwrap();
        t.record_snapshot("a.rs", "v1\n", Utc::now()).unwrap();
    }

    let db = Database::with_file(&db_path).unwrap();
    let mut t = Tracker::new(db, AppConfig::default()).unwrap();

    // Re-saving the restored content is still deduplicated
    let outcome = t.record_snapshot("a.rs", "v1\n", Utc::now()).unwrap();
    assert_eq!(outcome, windsurf_tracker::RecordOutcome::Unchanged(0));

    t.record_snapshot("a.rs", "v2\n", Utc::now()).unwrap();
    assert_eq!(t.snapshot_history("a.rs").len(), 2);
    let diff = t.diff_snapshots("a.rs", 0, 1).unwrap();
    assert!(diff.contains("-v1"));
    assert!(diff.contains("+v2"));
}

#[test]
fn test_activity_log_persists() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("data.db");

    {
        let db = Database::with_file(&db_path).unwrap();
        let mut t = Tracker::new(db, AppConfig::default()).unwrap();
        t.create_task(NewTask::new("TASK-001", "a task")).unwrap();
        t.move_task("TASK-001", TaskStatus::Done).unwrap();
    }

    let db = Database::with_file(&db_path).unwrap();
    let t = Tracker::new(db, AppConfig::default()).unwrap();

    let activity = t.recent_activity(10).unwrap();
    assert_eq!(activity.len(), 2);
    // Newest first
    assert!(activity[0].message.contains("moved to Done"));
    assert!(activity[1].message.contains("created"));
}
