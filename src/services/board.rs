//! Board Projection
//!
//! Kanban view of the task store: one ordered column per status. The board
//! holds task IDs only; task records live in the task store. Any status can
//! transition to any other status.

use serde::Serialize;

use crate::models::TaskStatus;
use crate::utils::error::{AppError, AppResult};

/// Result of a move request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum MoveOutcome {
    /// Task changed columns
    Moved { from: TaskStatus, to: TaskStatus },
    /// Task was already in the target column; nothing changed
    NoOp,
    /// Task ID is not on the board; nothing changed
    UnknownTask,
}

/// Ordered columns of task IDs, one per status
#[derive(Debug, Default, Clone, Serialize)]
pub struct BoardProjection {
    todo: Vec<String>,
    in_progress: Vec<String>,
    done: Vec<String>,
}

impl BoardProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// IDs in a column, in display order
    pub fn column(&self, status: TaskStatus) -> &[String] {
        match status {
            TaskStatus::Todo => &self.todo,
            TaskStatus::InProgress => &self.in_progress,
            TaskStatus::Done => &self.done,
        }
    }

    fn column_mut(&mut self, status: TaskStatus) -> &mut Vec<String> {
        match status {
            TaskStatus::Todo => &mut self.todo,
            TaskStatus::InProgress => &mut self.in_progress,
            TaskStatus::Done => &mut self.done,
        }
    }

    /// Which column holds the given task, if any
    pub fn column_of(&self, task_id: &str) -> Option<TaskStatus> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| self.column(*status).iter().any(|id| id == task_id))
    }

    /// Append a task to the end of a column.
    /// Fails if the task is already somewhere on the board.
    pub fn insert(&mut self, task_id: &str, status: TaskStatus) -> AppResult<()> {
        if self.column_of(task_id).is_some() {
            return Err(AppError::duplicate(format!("task {} already on board", task_id)));
        }
        self.column_mut(status).push(task_id.to_string());
        Ok(())
    }

    /// Remove a task from whichever column holds it
    pub fn remove(&mut self, task_id: &str) -> AppResult<TaskStatus> {
        for status in TaskStatus::ALL {
            let column = self.column_mut(status);
            if let Some(pos) = column.iter().position(|id| id == task_id) {
                column.remove(pos);
                return Ok(status);
            }
        }
        Err(AppError::not_found(format!("task {} not on board", task_id)))
    }

    /// Move a task within its column to a new position (drag-and-drop reorder).
    /// The position is clamped to the column length.
    pub fn reorder(&mut self, task_id: &str, position: usize) -> AppResult<()> {
        let status = self
            .column_of(task_id)
            .ok_or_else(|| AppError::not_found(format!("task {} not on board", task_id)))?;
        let column = self.column_mut(status);
        let current = column
            .iter()
            .position(|id| id == task_id)
            .expect("column_of guarantees membership");
        let id = column.remove(current);
        let target = position.min(column.len());
        column.insert(target, id);
        Ok(())
    }

    /// Move a task to the end of the target column.
    ///
    /// Same-column moves are no-ops; unknown tasks leave the board untouched.
    pub fn transfer(&mut self, task_id: &str, to: TaskStatus) -> MoveOutcome {
        let from = match self.column_of(task_id) {
            Some(status) => status,
            None => return MoveOutcome::UnknownTask,
        };
        if from == to {
            return MoveOutcome::NoOp;
        }
        let column = self.column_mut(from);
        let pos = column
            .iter()
            .position(|id| id == task_id)
            .expect("column_of guarantees membership");
        let id = column.remove(pos);
        self.column_mut(to).push(id);
        MoveOutcome::Moved { from, to }
    }

    /// Total number of tasks across all columns
    pub fn len(&self) -> usize {
        self.todo.len() + self.in_progress.len() + self.done.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verify no task appears in more than one column
    pub fn check_consistency(&self) -> AppResult<()> {
        let mut seen = std::collections::HashSet::new();
        for status in TaskStatus::ALL {
            for id in self.column(status) {
                if !seen.insert(id.as_str()) {
                    return Err(AppError::internal(format!(
                        "task {} appears in multiple columns",
                        id
                    )));
                }
            }
        }
        Ok(())
    }
}
