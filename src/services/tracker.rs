//! Tracker Service
//!
//! Composition root tying the task store, board projection, snapshot
//! store, and database together. All shared-state mutation happens here,
//! on the thread that drains the event bus; background work posts
//! results back as events instead of touching the stores.

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};

use crate::models::{
    Activity, ActivityKind, AppConfig, NewTask, Snapshot, Task, TaskStatus, TaskUpdate,
};
use crate::services::board::{BoardProjection, MoveOutcome};
use crate::services::editor::{EditorEvent, EventReceiver};
use crate::services::snapshot_store::{RecordOutcome, SnapshotStore};
use crate::services::task_store::TaskStore;
use crate::storage::database::Database;
use crate::utils::error::AppResult;
use crate::utils::text::{extract_task_references, truncate_text};

/// Central application service owning all mutable state
pub struct Tracker {
    tasks: TaskStore,
    board: BoardProjection,
    snapshots: SnapshotStore,
    db: Database,
    config: AppConfig,
}

impl Tracker {
    /// Build a tracker over the given database, loading persisted state
    pub fn new(db: Database, config: AppConfig) -> AppResult<Self> {
        let mut tracker = Self {
            tasks: TaskStore::new(),
            board: BoardProjection::new(),
            snapshots: SnapshotStore::new(),
            db,
            config,
        };
        tracker.load()?;
        Ok(tracker)
    }

    /// Load tasks and snapshots from the database into memory
    fn load(&mut self) -> AppResult<()> {
        for task in self.db.list_tasks()? {
            let status = task.status;
            let id = task.id.clone();
            self.tasks.insert(task)?;
            self.board.insert(&id, status)?;
        }
        for path in self.db.snapshot_paths()? {
            for snapshot in self.db.get_snapshots_for_file(&path)? {
                self.snapshots.restore(snapshot);
            }
        }
        info!(
            tasks = self.tasks.len(),
            "Tracker state loaded from database"
        );
        Ok(())
    }

    // ── Tasks ───────────────────────────────────────────────────────────

    /// Create a task and place it on the board
    pub fn create_task(&mut self, new_task: NewTask) -> AppResult<Task> {
        let task = self.tasks.create(new_task)?.clone();
        self.board.insert(&task.id, task.status)?;
        self.db.insert_task(&task)?;
        self.record_activity(
            Activity::now(
                ActivityKind::TaskCreated,
                format!("Task {} created: {}", task.id, truncate_text(&task.title, 80)),
            )
            .with_task(&task.id),
        );
        Ok(task)
    }

    /// Get a task by ID
    pub fn get_task(&self, id: &str) -> AppResult<&Task> {
        self.tasks.get(id)
    }

    /// Apply a partial update to a task
    pub fn update_task(&mut self, id: &str, update: TaskUpdate) -> AppResult<Task> {
        let task = self.tasks.update(id, update)?.clone();
        self.db.update_task(&task)?;
        self.record_activity(
            Activity::now(
                ActivityKind::TaskUpdated,
                format!("Task {} updated", task.id),
            )
            .with_task(&task.id),
        );
        Ok(task)
    }

    /// Move a task to another column.
    ///
    /// Unknown tasks are logged and reported without touching any state;
    /// a move to the current column is a silent no-op.
    pub fn move_task(&mut self, task_id: &str, to: TaskStatus) -> AppResult<MoveOutcome> {
        let outcome = self.board.transfer(task_id, to);
        match &outcome {
            MoveOutcome::UnknownTask => {
                warn!(task_id, "Move requested for unknown task");
            }
            MoveOutcome::NoOp => {}
            MoveOutcome::Moved { from, to } => {
                let task = self.tasks.get_mut(task_id)?;
                task.status = *to;
                task.updated_at = Utc::now();
                let task = task.clone();
                self.db.update_task(&task)?;
                info!(task_id, from = from.as_str(), to = to.as_str(), "Task moved");
                self.record_activity(
                    Activity::now(
                        ActivityKind::TaskMoved,
                        format!("Task {} moved to {}", task_id, to.display_name()),
                    )
                    .with_task(task_id),
                );
            }
        }
        Ok(outcome)
    }

    /// Reorder a task within its column
    pub fn reorder_task(&mut self, task_id: &str, position: usize) -> AppResult<()> {
        self.board.reorder(task_id, position)
    }

    /// Link a source file to a task
    pub fn link_file(&mut self, task_id: &str, path: &str) -> AppResult<()> {
        let task = self.tasks.get_mut(task_id)?;
        if !task.linked_files.iter().any(|p| p == path) {
            task.linked_files.push(path.to_string());
            task.updated_at = Utc::now();
        }
        let task = task.clone();
        self.db.update_task(&task)?;
        self.record_activity(
            Activity::now(
                ActivityKind::FileLinked,
                format!("{} linked to task {}", path, task_id),
            )
            .with_task(task_id)
            .with_file(path),
        );
        Ok(())
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Record a file-content capture; unchanged content is suppressed
    pub fn record_snapshot(
        &mut self,
        path: &str,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> AppResult<RecordOutcome> {
        let outcome = self.snapshots.record(path, content, timestamp)?;
        if let RecordOutcome::Recorded(index) = outcome {
            let snapshot = &self.snapshots.history(path)[index];
            self.db.insert_snapshot(snapshot)?;
            self.record_activity(
                Activity::now(
                    ActivityKind::FileSaved,
                    format!("Snapshot {} of {} recorded", index, path),
                )
                .with_file(path),
            );
            // Saved content mentioning a known task links the file to it
            for task_id in extract_task_references(content) {
                if self.tasks.contains(&task_id) {
                    self.link_file(&task_id, path)?;
                }
            }
        }
        Ok(outcome)
    }

    /// All captures for a path, oldest first
    pub fn snapshot_history(&self, path: &str) -> &[Snapshot] {
        self.snapshots.history(path)
    }

    /// Unified diff between two captures of a file
    pub fn diff_snapshots(&self, path: &str, from: usize, to: usize) -> AppResult<String> {
        self.snapshots.diff(path, from, to)
    }

    // ── Events ──────────────────────────────────────────────────────────

    /// Apply a single editor event. Failures are logged and swallowed so
    /// one bad event cannot stall the feed.
    pub fn handle_event(&mut self, event: EditorEvent) {
        let kind = event.kind();
        let result = match event {
            EditorEvent::TaskCreated { task } => self.create_task(task).map(|_| ()),
            EditorEvent::TaskUpdated { task_id, changes } => {
                self.update_task(&task_id, changes).map(|_| ())
            }
            EditorEvent::TaskMoved { task_id, status } => {
                self.move_task(&task_id, status).map(|_| ())
            }
            EditorEvent::FileSaved {
                path,
                content,
                timestamp,
            } => {
                if self.config.auto_snapshot {
                    self.record_snapshot(&path, &content, timestamp).map(|_| ())
                } else {
                    Ok(())
                }
            }
            EditorEvent::FileLinkedToTask { task_id, path } => self.link_file(&task_id, &path),
        };
        if let Err(e) = result {
            error!(kind, error = %e, "Editor event failed");
        }
    }

    /// Drain the event bus until every producer hangs up
    pub async fn run(&mut self, mut receiver: EventReceiver) {
        while let Some(event) = receiver.recv().await {
            self.handle_event(event);
        }
        info!("Event bus closed, tracker loop exiting");
    }

    // ── Views ───────────────────────────────────────────────────────────

    /// Current board projection
    pub fn board(&self) -> &BoardProjection {
        &self.board
    }

    /// Number of tracked tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Most recent activity entries, newest first
    pub fn recent_activity(&self, limit: u32) -> AppResult<Vec<Activity>> {
        self.db.recent_activities(limit)
    }

    fn record_activity(&self, activity: Activity) {
        if let Err(e) = self.db.insert_activity(&activity) {
            warn!(error = %e, "Failed to persist activity entry");
        }
    }

    // ── Sample data ─────────────────────────────────────────────────────

    /// Seed a handful of demo tasks when the database is empty
    pub fn seed_sample_data(&mut self) -> AppResult<()> {
        if !self.tasks.is_empty() {
            return Ok(());
        }
        let samples = [
            ("TASK-001", "Set up project skeleton", TaskStatus::Done),
            ("TASK-002", "Implement snapshot diffing", TaskStatus::InProgress),
            ("TASK-003", "Wire up AI code review", TaskStatus::Todo),
        ];
        for (id, title, status) in samples {
            let mut new_task = NewTask::new(id, title);
            new_task.status = status;
            self.create_task(new_task)?;
        }
        info!("Sample data seeded");
        Ok(())
    }
}
