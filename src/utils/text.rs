//! Text Utilities
//!
//! Helpers for task identifiers, text formatting, and reference extraction.

use chrono::{DateTime, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Truncate text to a maximum length, appending an ellipsis when cut
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(3);
    let truncated: String = text.chars().take(keep).collect();
    format!("{}...", truncated)
}

/// Convert a title into a URL/file-safe slug
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_was_hyphen = true;
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    slug.trim_end_matches('-').to_string()
}

/// Generate a short task identifier of the form `TASK-XXX`
///
/// Derived from the current timestamp, so identifiers from the same
/// session are unlikely to collide but callers must still handle
/// duplicates at the store level.
pub fn generate_task_id() -> String {
    let millis = Utc::now().timestamp_millis();
    format!("TASK-{:03}", millis % 1000)
}

/// Extract all `TASK-XXX` references from free-form text
pub fn extract_task_references(text: &str) -> Vec<String> {
    static TASK_REF: OnceLock<Regex> = OnceLock::new();
    let re = TASK_REF.get_or_init(|| Regex::new(r"(TASK-\d{3})").unwrap());
    re.find_iter(text).map(|m| m.as_str().to_string()).collect()
}

/// Format a timestamp as a human-readable relative time ("5 minutes ago")
pub fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let delta = Utc::now().signed_duration_since(timestamp);
    let seconds = delta.num_seconds();
    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        let minutes = seconds / 60;
        format!("{} minute{} ago", minutes, if minutes == 1 { "" } else { "s" })
    } else if seconds < 86400 {
        let hours = seconds / 3600;
        format!("{} hour{} ago", hours, if hours == 1 { "" } else { "s" })
    } else {
        let days = seconds / 86400;
        format!("{} day{} ago", days, if days == 1 { "" } else { "s" })
    }
}
