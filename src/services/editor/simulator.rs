//! Editor Event Simulator
//!
//! Synthesizes a short editing session (tasks created, moved, files
//! saved and linked) and feeds it through the same event bus real
//! integrations use. Drives demos and end-to-end tests without an
//! editor attached.

use std::time::Duration;

use chrono::Utc;
use tracing::info;

use super::client::EditorClient;
use super::events::EditorEvent;
use crate::models::{NewTask, TaskPriority, TaskStatus, TaskUpdate};

/// A scripted editing session
pub fn scripted_session() -> Vec<EditorEvent> {
    let auth_v1 = "def login(user, password):\n    return db.check(user, password)\n";
    let auth_v2 = "def login(user, password):\n    if not user:\n        raise ValueError(\"user required\")\n    return db.check(user, password)\n";

    vec![
        EditorEvent::TaskCreated {
            task: NewTask {
                id: "TASK-101".to_string(),
                title: "Fix login validation".to_string(),
                description: "Empty usernames reach the database layer".to_string(),
                status: TaskStatus::Todo,
                priority: TaskPriority::High,
                due_date: None,
            },
        },
        EditorEvent::TaskCreated {
            task: NewTask::new("TASK-102", "Add session timeout"),
        },
        EditorEvent::FileSaved {
            path: "src/auth.py".to_string(),
            content: auth_v1.to_string(),
            timestamp: Utc::now(),
        },
        EditorEvent::TaskMoved {
            task_id: "TASK-101".to_string(),
            status: TaskStatus::InProgress,
        },
        EditorEvent::FileLinkedToTask {
            task_id: "TASK-101".to_string(),
            path: "src/auth.py".to_string(),
        },
        EditorEvent::FileSaved {
            path: "src/auth.py".to_string(),
            content: auth_v2.to_string(),
            timestamp: Utc::now(),
        },
        EditorEvent::TaskUpdated {
            task_id: "TASK-102".to_string(),
            changes: TaskUpdate {
                priority: Some(TaskPriority::Low),
                ..Default::default()
            },
        },
        EditorEvent::TaskMoved {
            task_id: "TASK-101".to_string(),
            status: TaskStatus::Done,
        },
        // Unknown task: handlers must reject this without side effects
        EditorEvent::TaskMoved {
            task_id: "TASK-999".to_string(),
            status: TaskStatus::Done,
        },
    ]
}

/// Feed the scripted session through the event bus with small pauses,
/// approximating interactive editing.
pub async fn run(client: EditorClient, delay: Duration) {
    for event in scripted_session() {
        info!(kind = event.kind(), "Simulating editor event");
        client.emit(event);
        tokio::time::sleep(delay).await;
    }
}
