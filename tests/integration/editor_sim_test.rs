//! Editor Simulation Tests
//!
//! Runs the scripted editing session through the event bus into the
//! tracker and asserts the resulting board, snapshot, and activity
//! state end to end.

use std::time::Duration;

use windsurf_tracker::models::{ActivityKind, AppConfig, TaskPriority, TaskStatus};
use windsurf_tracker::services::editor::simulator;
use windsurf_tracker::storage::Database;
use windsurf_tracker::{event_bus, Tracker};

fn tracker() -> Tracker {
    let db = Database::new_in_memory().unwrap();
    Tracker::new(db, AppConfig::default()).unwrap()
}

#[tokio::test]
async fn test_scripted_session_end_to_end() {
    let mut t = tracker();

    let (client, receiver) = event_bus();
    let feed = tokio::spawn(simulator::run(client, Duration::from_millis(1)));
    t.run(receiver).await;
    feed.await.unwrap();

    // TASK-101 went todo -> in_progress -> done, TASK-102 stayed put
    assert_eq!(t.board().column(TaskStatus::Done), &["TASK-101"]);
    assert_eq!(t.board().column(TaskStatus::Todo), &["TASK-102"]);
    assert!(t.board().column(TaskStatus::InProgress).is_empty());

    let fixed = t.get_task("TASK-101").unwrap();
    assert_eq!(fixed.status, TaskStatus::Done);
    assert_eq!(fixed.priority, TaskPriority::High);
    assert_eq!(fixed.linked_files, vec!["src/auth.py".to_string()]);

    let other = t.get_task("TASK-102").unwrap();
    assert_eq!(other.priority, TaskPriority::Low);

    // Both saves of src/auth.py were captured and the diff shows the fix
    let history = t.snapshot_history("src/auth.py");
    assert_eq!(history.len(), 2);
    let diff = t.diff_snapshots("src/auth.py", 0, 1).unwrap();
    assert!(diff.contains("+    if not user:"));
}

#[tokio::test]
async fn test_unknown_task_event_leaves_no_trace() {
    let mut t = tracker();

    let (client, receiver) = event_bus();
    for event in simulator::scripted_session() {
        client.emit(event);
    }
    drop(client);
    t.run(receiver).await;

    // TASK-999 was never created, so the bad move left the board alone
    assert!(t.get_task("TASK-999").is_err());
    assert_eq!(t.task_count(), 2);

    let activity = t.recent_activity(100).unwrap();
    assert!(activity
        .iter()
        .all(|a| a.task_id.as_deref() != Some("TASK-999")));
}

#[tokio::test]
async fn test_auto_snapshot_can_be_disabled() {
    let db = Database::new_in_memory().unwrap();
    let config = AppConfig {
        auto_snapshot: false,
        ..Default::default()
    };
    let mut t = Tracker::new(db, config).unwrap();

    let (client, receiver) = event_bus();
    for event in simulator::scripted_session() {
        client.emit(event);
    }
    drop(client);
    t.run(receiver).await;

    // Task events still apply, file saves are ignored
    assert_eq!(t.task_count(), 2);
    assert!(t.snapshot_history("src/auth.py").is_empty());
}

#[tokio::test]
async fn test_activity_feed_reflects_session() {
    let mut t = tracker();

    let (client, receiver) = event_bus();
    for event in simulator::scripted_session() {
        client.emit(event);
    }
    drop(client);
    t.run(receiver).await;

    let activity = t.recent_activity(100).unwrap();
    let moves = activity
        .iter()
        .filter(|a| a.kind == ActivityKind::TaskMoved)
        .count();
    let saves = activity
        .iter()
        .filter(|a| a.kind == ActivityKind::FileSaved)
        .count();
    let created = activity
        .iter()
        .filter(|a| a.kind == ActivityKind::TaskCreated)
        .count();

    // Two real moves (the TASK-999 move is dropped), two distinct saves
    assert_eq!(moves, 2);
    assert_eq!(saves, 2);
    assert_eq!(created, 2);
}
