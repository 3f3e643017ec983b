//! Snapshot integration tests
//!
//! Covers snapshot recording through the tracker: dedup of unchanged
//! content, history ordering, timestamp clamping, and unified diffs.

use chrono::{Duration, Utc};

use windsurf_tracker::models::AppConfig;
use windsurf_tracker::storage::Database;
use windsurf_tracker::{AppError, RecordOutcome, Tracker};

fn tracker() -> Tracker {
    let db = Database::new_in_memory().unwrap();
    Tracker::new(db, AppConfig::default()).unwrap()
}

#[test]
fn snapshots_accumulate_in_order() {
    let mut t = tracker();
    let base = Utc::now();

    t.record_snapshot("src/lib.rs", "fn a() {}\n", base).unwrap();
    t.record_snapshot("src/lib.rs", "fn a() {}\nfn b() {}\n", base + Duration::seconds(5))
        .unwrap();
    t.record_snapshot("src/lib.rs", "fn b() {}\n", base + Duration::seconds(10))
        .unwrap();

    let history = t.snapshot_history("src/lib.rs");
    assert_eq!(history.len(), 3);
    assert!(history[0].created_at <= history[1].created_at);
    assert!(history[1].created_at <= history[2].created_at);
    assert_eq!(history[2].content().unwrap(), "fn b() {}\n");
}

#[test]
fn unchanged_content_is_not_recorded_twice() {
    let mut t = tracker();
    let base = Utc::now();

    let first = t.record_snapshot("notes.md", "hello\n", base).unwrap();
    assert_eq!(first, RecordOutcome::Recorded(0));

    let second = t
        .record_snapshot("notes.md", "hello\n", base + Duration::seconds(30))
        .unwrap();
    assert_eq!(second, RecordOutcome::Unchanged(0));
    assert_eq!(t.snapshot_history("notes.md").len(), 1);

    // Re-saving the same content later still counts once it changed in between
    t.record_snapshot("notes.md", "hello world\n", base + Duration::seconds(60))
        .unwrap();
    let third = t
        .record_snapshot("notes.md", "hello\n", base + Duration::seconds(90))
        .unwrap();
    assert_eq!(third, RecordOutcome::Recorded(2));
}

#[test]
fn out_of_order_timestamps_are_clamped() {
    let mut t = tracker();
    let base = Utc::now();

    t.record_snapshot("a.txt", "one\n", base).unwrap();
    t.record_snapshot("a.txt", "two\n", base - Duration::seconds(120))
        .unwrap();

    let history = t.snapshot_history("a.txt");
    assert_eq!(history[1].created_at, history[0].created_at);
}

#[test]
fn paths_are_tracked_independently() {
    let mut t = tracker();
    let now = Utc::now();

    t.record_snapshot("a.rs", "a\n", now).unwrap();
    t.record_snapshot("b.rs", "b\n", now).unwrap();
    t.record_snapshot("a.rs", "aa\n", now).unwrap();

    assert_eq!(t.snapshot_history("a.rs").len(), 2);
    assert_eq!(t.snapshot_history("b.rs").len(), 1);
    assert!(t.snapshot_history("c.rs").is_empty());
}

#[test]
fn diff_shows_added_and_removed_lines() {
    let mut t = tracker();
    let now = Utc::now();

    t.record_snapshot("src/auth.py", "def login(user):\n    return True\n", now)
        .unwrap();
    t.record_snapshot(
        "src/auth.py",
        "def login(user):\n    if not user:\n        return False\n    return True\n",
        now,
    )
    .unwrap();

    let diff = t.diff_snapshots("src/auth.py", 0, 1).unwrap();
    assert!(diff.contains("src/auth.py@0"));
    assert!(diff.contains("src/auth.py@1"));
    assert!(diff.contains("+    if not user:"));
    assert!(diff.contains("+        return False"));
}

#[test]
fn diff_of_identical_indices_is_empty_of_changes() {
    let mut t = tracker();
    t.record_snapshot("x.txt", "same\n", Utc::now()).unwrap();

    let diff = t.diff_snapshots("x.txt", 0, 0).unwrap();
    assert!(!diff.contains("\n+same"));
    assert!(!diff.contains("\n-same"));
}

#[test]
fn diff_with_bad_index_reports_range() {
    let mut t = tracker();
    t.record_snapshot("x.txt", "same\n", Utc::now()).unwrap();

    let err = t.diff_snapshots("x.txt", 0, 5).unwrap_err();
    match err {
        AppError::IndexOutOfRange(msg) => {
            assert!(msg.contains("5"));
            assert!(msg.contains("x.txt"));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = t.diff_snapshots("missing.txt", 0, 0).unwrap_err();
    assert!(matches!(err, AppError::IndexOutOfRange(_)));
}
