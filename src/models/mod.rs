//! Data Models
//!
//! Contains all data structures used throughout the application.

pub mod activity;
pub mod settings;
pub mod snapshot;
pub mod task;

pub use activity::*;
pub use settings::*;
pub use snapshot::*;
pub use task::*;
