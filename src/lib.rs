//! WindSurf Tracker - Core Library
//!
//! Application core for the WindSurf memory tracker:
//! - Kanban task store and board projection
//! - Append-only code snapshot history with line-based diffs
//! - AI advisory layer over chat-completion providers
//! - Editor event pipeline (simulated or fed by a filesystem watcher)
//! - Storage layer (SQLite, JSON config)

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use models::{AppConfig, NewTask, SettingsUpdate, Task, TaskPriority, TaskStatus, TaskUpdate};
pub use services::{
    event_bus, CodeAdvisor, EditorClient, EditorEvent, MoveOutcome, RecordOutcome, Tracker,
};
pub use storage::{ConfigService, Database};
pub use utils::error::{AppError, AppResult};
