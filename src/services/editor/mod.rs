//! Editor Integration
//!
//! Event bus, simulated event feed, and filesystem watcher. Every
//! producer posts the same `EditorEvent` type; the tracker is the sole
//! consumer.

pub mod client;
pub mod events;
pub mod simulator;
pub mod watcher;

pub use client::{event_bus, EditorClient, EventReceiver};
pub use events::EditorEvent;
pub use watcher::{FileWatcher, WatcherConfig};
