//! Services
//!
//! Business logic services for the application: the task/board/snapshot
//! stores, the tracker composition root, editor integration, and the AI
//! advisory layer.

pub mod ai;
pub mod board;
pub mod editor;
pub mod metrics;
pub mod snapshot_store;
pub mod task_store;
pub mod tracker;

pub use ai::CodeAdvisor;
pub use board::{BoardProjection, MoveOutcome};
pub use editor::{event_bus, EditorClient, EditorEvent, EventReceiver, FileWatcher, WatcherConfig};
pub use snapshot_store::{RecordOutcome, SnapshotStore};
pub use task_store::TaskStore;
pub use tracker::Tracker;
