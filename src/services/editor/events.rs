//! Editor Events
//!
//! Events flowing from editor integrations (real or simulated) into the
//! tracker. Simulated and real events share one type so they travel the
//! same handler path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{NewTask, TaskStatus, TaskUpdate};

/// An event from the editor integration layer
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EditorEvent {
    /// A task was created in the editor
    TaskCreated { task: NewTask },
    /// Task fields changed
    TaskUpdated {
        task_id: String,
        changes: TaskUpdate,
    },
    /// A task was dragged to another column
    TaskMoved {
        task_id: String,
        status: TaskStatus,
    },
    /// A file was saved; content travels with the event
    FileSaved {
        path: String,
        content: String,
        timestamp: DateTime<Utc>,
    },
    /// A file was associated with a task
    FileLinkedToTask { task_id: String, path: String },
}

impl EditorEvent {
    /// Short name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            EditorEvent::TaskCreated { .. } => "task_created",
            EditorEvent::TaskUpdated { .. } => "task_updated",
            EditorEvent::TaskMoved { .. } => "task_moved",
            EditorEvent::FileSaved { .. } => "file_saved",
            EditorEvent::FileLinkedToTask { .. } => "file_linked_to_task",
        }
    }
}
