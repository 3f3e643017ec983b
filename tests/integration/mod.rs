//! Integration Tests Module
//!
//! End-to-end tests for the WindSurf tracker core. Covers board
//! transition semantics, snapshot history and diffing, the simulated
//! editor event feed, and persistence across restarts.

// Board projection and move semantics
mod board_test;

// Snapshot recording, ordering, and diffing
mod snapshot_test;

// Scripted editor session end-to-end
mod editor_sim_test;

// Database and config round-trips
mod persistence_test;
