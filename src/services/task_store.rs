//! Task Store
//!
//! Owned in-memory store of tasks keyed by ID. All mutation goes through
//! the tracker service on the main thread; the store itself is not shared.

use std::collections::HashMap;

use crate::models::{NewTask, Task, TaskUpdate};
use crate::utils::error::{AppError, AppResult};

/// In-memory task store keyed by task ID
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: HashMap<String, Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new task. Fails if the ID is already taken.
    pub fn create(&mut self, new_task: NewTask) -> AppResult<&Task> {
        if self.tasks.contains_key(&new_task.id) {
            return Err(AppError::duplicate(format!("task {}", new_task.id)));
        }
        let id = new_task.id.clone();
        let task = new_task.into_task();
        self.tasks.insert(id.clone(), task);
        Ok(&self.tasks[&id])
    }

    /// Insert an already-built task record (loading from the database).
    /// Fails if the ID is already taken.
    pub fn insert(&mut self, task: Task) -> AppResult<()> {
        if self.tasks.contains_key(&task.id) {
            return Err(AppError::duplicate(format!("task {}", task.id)));
        }
        self.tasks.insert(task.id.clone(), task);
        Ok(())
    }

    /// Get a task by ID
    pub fn get(&self, id: &str) -> AppResult<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| AppError::not_found(format!("task {}", id)))
    }

    /// Look up a task without treating absence as an error
    pub fn find(&self, id: &str) -> Option<&Task> {
        self.tasks.get(id)
    }

    /// Apply a partial update to a task. Fails if the task does not exist.
    pub fn update(&mut self, id: &str, update: TaskUpdate) -> AppResult<&Task> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("task {}", id)))?;
        task.apply_update(update);
        Ok(task)
    }

    /// Mutable access for tracker-internal transitions (status, linked files)
    pub(crate) fn get_mut(&mut self, id: &str) -> AppResult<&mut Task> {
        self.tasks
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("task {}", id)))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.tasks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Iterate all tasks in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }
}
