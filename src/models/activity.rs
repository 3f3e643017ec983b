//! Activity Models
//!
//! Recent-activity feed entries recorded for task and file events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of activity entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    TaskCreated,
    TaskUpdated,
    TaskMoved,
    FileSaved,
    FileLinked,
    AiReview,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::TaskCreated => "task_created",
            ActivityKind::TaskUpdated => "task_updated",
            ActivityKind::TaskMoved => "task_moved",
            ActivityKind::FileSaved => "file_saved",
            ActivityKind::FileLinked => "file_linked",
            ActivityKind::AiReview => "ai_review",
        }
    }

    pub fn parse(s: &str) -> Option<ActivityKind> {
        match s {
            "task_created" => Some(ActivityKind::TaskCreated),
            "task_updated" => Some(ActivityKind::TaskUpdated),
            "task_moved" => Some(ActivityKind::TaskMoved),
            "file_saved" => Some(ActivityKind::FileSaved),
            "file_linked" => Some(ActivityKind::FileLinked),
            "ai_review" => Some(ActivityKind::AiReview),
            _ => None,
        }
    }
}

/// A single entry in the recent-activity feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Activity {
    pub kind: ActivityKind,
    /// Human-readable description ("Task TASK-001 moved to in_progress")
    pub message: String,
    /// Related task, if any
    pub task_id: Option<String>,
    /// Related file, if any
    pub file_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Create an entry stamped with the current time
    pub fn now(kind: ActivityKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            task_id: None,
            file_path: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_task(mut self, task_id: impl Into<String>) -> Self {
        self.task_id = Some(task_id.into());
        self
    }

    pub fn with_file(mut self, file_path: impl Into<String>) -> Self {
        self.file_path = Some(file_path.into());
        self
    }
}
