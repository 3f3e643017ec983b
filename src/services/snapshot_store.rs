//! Snapshot Store
//!
//! Append-only history of file content captures, one chronological
//! sequence per path. Supports line-based diffs between any two captures
//! of the same file.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use similar::TextDiff;

use crate::models::{content_hash, Snapshot};
use crate::utils::error::{AppError, AppResult};

/// Result of a record call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new capture was appended at this index
    Recorded(usize),
    /// Content matched the newest capture; index of the existing one
    Unchanged(usize),
}

impl RecordOutcome {
    /// Index of the capture representing this content
    pub fn index(&self) -> usize {
        match self {
            RecordOutcome::Recorded(i) | RecordOutcome::Unchanged(i) => *i,
        }
    }
}

/// Per-path append-only snapshot sequences
#[derive(Debug, Default)]
pub struct SnapshotStore {
    sequences: HashMap<String, Vec<Snapshot>>,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a capture of a file's content.
    ///
    /// Content identical to the newest capture is not appended again.
    /// A timestamp earlier than the newest capture is clamped so each
    /// sequence stays non-decreasing.
    pub fn record(
        &mut self,
        path: &str,
        content: &str,
        timestamp: DateTime<Utc>,
    ) -> AppResult<RecordOutcome> {
        let sequence = self.sequences.entry(path.to_string()).or_default();

        if let Some(newest) = sequence.last() {
            if newest.hash == content_hash(content) {
                return Ok(RecordOutcome::Unchanged(sequence.len() - 1));
            }
        }

        let timestamp = match sequence.last() {
            Some(newest) if timestamp < newest.created_at => newest.created_at,
            _ => timestamp,
        };

        let snapshot = Snapshot::capture(path, content, timestamp)?;
        sequence.push(snapshot);
        Ok(RecordOutcome::Recorded(sequence.len() - 1))
    }

    /// Re-insert a capture loaded from the database, preserving stored order
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.sequences
            .entry(snapshot.file_path.clone())
            .or_default()
            .push(snapshot);
    }

    /// All captures for a path, oldest first. Unknown paths yield an
    /// empty slice, not an error.
    pub fn history(&self, path: &str) -> &[Snapshot] {
        self.sequences.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of captures for a path
    pub fn count(&self, path: &str) -> usize {
        self.history(path).len()
    }

    /// Paths with at least one capture
    pub fn paths(&self) -> Vec<&str> {
        self.sequences.keys().map(String::as_str).collect()
    }

    /// Unified diff between two captures of the same file.
    ///
    /// `from` and `to` are indices into the path's history; either side
    /// out of range is an error. Diffing a capture against itself yields
    /// an empty diff.
    pub fn diff(&self, path: &str, from: usize, to: usize) -> AppResult<String> {
        let sequence = self.history(path);
        let fetch = |index: usize| -> AppResult<&Snapshot> {
            sequence.get(index).ok_or_else(|| {
                AppError::index_out_of_range(format!(
                    "snapshot {} of {} (have {})",
                    index,
                    path,
                    sequence.len()
                ))
            })
        };
        let old = fetch(from)?.content()?;
        let new = fetch(to)?.content()?;

        let diff = TextDiff::from_lines(&old, &new);
        let header_from = format!("{}@{}", path, from);
        let header_to = format!("{}@{}", path, to);
        Ok(diff
            .unified_diff()
            .context_radius(3)
            .header(&header_from, &header_to)
            .to_string())
    }

    /// Count of added and removed lines between two captures
    pub fn diff_stats(&self, path: &str, from: usize, to: usize) -> AppResult<(usize, usize)> {
        let sequence = self.history(path);
        let fetch = |index: usize| -> AppResult<&Snapshot> {
            sequence.get(index).ok_or_else(|| {
                AppError::index_out_of_range(format!(
                    "snapshot {} of {} (have {})",
                    index,
                    path,
                    sequence.len()
                ))
            })
        };
        let old = fetch(from)?.content()?;
        let new = fetch(to)?.content()?;

        let diff = TextDiff::from_lines(&old, &new);
        let mut added = 0;
        let mut removed = 0;
        for change in diff.iter_all_changes() {
            match change.tag() {
                similar::ChangeTag::Insert => added += 1,
                similar::ChangeTag::Delete => removed += 1,
                similar::ChangeTag::Equal => {}
            }
        }
        Ok((added, removed))
    }
}
