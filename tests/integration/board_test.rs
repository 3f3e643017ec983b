//! Board integration tests
//!
//! Exercises the tracker's move semantics against an in-memory database:
//! column ordering, no-op moves, unknown tasks, and reordering.

use windsurf_tracker::models::{ActivityKind, AppConfig, NewTask, TaskStatus};
use windsurf_tracker::storage::Database;
use windsurf_tracker::{AppError, MoveOutcome, Tracker};

fn tracker() -> Tracker {
    let db = Database::new_in_memory().unwrap();
    Tracker::new(db, AppConfig::default()).unwrap()
}

#[test]
fn new_tasks_append_to_their_column_in_order() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();
    t.create_task(NewTask::new("TASK-002", "second")).unwrap();
    t.create_task(NewTask::new("TASK-003", "third")).unwrap();

    assert_eq!(
        t.board().column(TaskStatus::Todo),
        &["TASK-001", "TASK-002", "TASK-003"]
    );
    assert!(t.board().column(TaskStatus::InProgress).is_empty());
    assert!(t.board().column(TaskStatus::Done).is_empty());
}

#[test]
fn duplicate_task_id_is_rejected() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();

    let err = t.create_task(NewTask::new("TASK-001", "again")).unwrap_err();
    assert!(matches!(err, AppError::Duplicate(_)));
    assert_eq!(t.task_count(), 1);
}

#[test]
fn move_crosses_columns_and_records_activity() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();
    t.create_task(NewTask::new("TASK-002", "second")).unwrap();

    let outcome = t.move_task("TASK-002", TaskStatus::InProgress).unwrap();
    assert_eq!(
        outcome,
        MoveOutcome::Moved {
            from: TaskStatus::Todo,
            to: TaskStatus::InProgress
        }
    );
    assert_eq!(t.board().column(TaskStatus::Todo), &["TASK-001"]);
    assert_eq!(t.board().column(TaskStatus::InProgress), &["TASK-002"]);
    assert_eq!(t.get_task("TASK-002").unwrap().status, TaskStatus::InProgress);

    let recent = t.recent_activity(1).unwrap();
    assert_eq!(recent[0].kind, ActivityKind::TaskMoved);
    assert_eq!(recent[0].task_id.as_deref(), Some("TASK-002"));
}

#[test]
fn any_column_can_reach_any_other() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();

    t.move_task("TASK-001", TaskStatus::Done).unwrap();
    assert_eq!(t.get_task("TASK-001").unwrap().status, TaskStatus::Done);

    // Straight back from done to todo, skipping in_progress
    t.move_task("TASK-001", TaskStatus::Todo).unwrap();
    assert_eq!(t.get_task("TASK-001").unwrap().status, TaskStatus::Todo);
}

#[test]
fn same_column_move_is_a_silent_noop() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();
    t.create_task(NewTask::new("TASK-002", "second")).unwrap();
    let activity_before = t.recent_activity(50).unwrap().len();
    let updated_before = t.get_task("TASK-001").unwrap().updated_at;

    let outcome = t.move_task("TASK-001", TaskStatus::Todo).unwrap();

    assert_eq!(outcome, MoveOutcome::NoOp);
    assert_eq!(t.board().column(TaskStatus::Todo), &["TASK-001", "TASK-002"]);
    assert_eq!(t.recent_activity(50).unwrap().len(), activity_before);
    assert_eq!(t.get_task("TASK-001").unwrap().updated_at, updated_before);
}

#[test]
fn unknown_task_move_changes_nothing() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();
    let activity_before = t.recent_activity(50).unwrap().len();

    let outcome = t.move_task("TASK-999", TaskStatus::Done).unwrap();

    assert_eq!(outcome, MoveOutcome::UnknownTask);
    assert_eq!(t.board().len(), 1);
    assert!(t.board().column(TaskStatus::Done).is_empty());
    assert_eq!(t.recent_activity(50).unwrap().len(), activity_before);
}

#[test]
fn moved_task_lands_at_end_of_target_column() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();
    t.create_task(NewTask::new("TASK-002", "second")).unwrap();
    t.create_task(NewTask::new("TASK-003", "third")).unwrap();

    t.move_task("TASK-001", TaskStatus::InProgress).unwrap();
    t.move_task("TASK-003", TaskStatus::InProgress).unwrap();

    assert_eq!(
        t.board().column(TaskStatus::InProgress),
        &["TASK-001", "TASK-003"]
    );
}

#[test]
fn reorder_moves_task_within_column() {
    let mut t = tracker();
    t.create_task(NewTask::new("TASK-001", "first")).unwrap();
    t.create_task(NewTask::new("TASK-002", "second")).unwrap();
    t.create_task(NewTask::new("TASK-003", "third")).unwrap();

    t.reorder_task("TASK-003", 0).unwrap();
    assert_eq!(
        t.board().column(TaskStatus::Todo),
        &["TASK-003", "TASK-001", "TASK-002"]
    );

    let err = t.reorder_task("TASK-999", 0).unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}
