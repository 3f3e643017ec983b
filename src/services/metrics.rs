//! Code Metrics
//!
//! Lightweight line-based metrics and language identification used to
//! enrich snapshot summaries and AI prompts.

use serde::Serialize;

/// Line-based metrics for a piece of source code
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CodeMetrics {
    pub total_lines: usize,
    pub code_lines: usize,
    pub comment_lines: usize,
    pub blank_lines: usize,
    pub function_count: usize,
}

/// Compute line-based metrics for source text.
///
/// Comment detection is prefix-based (`//`, `#`, `--`) and function
/// counting looks for common declaration keywords, which is good enough
/// for summary displays.
pub fn count_code_metrics(content: &str) -> CodeMetrics {
    let mut metrics = CodeMetrics::default();

    for line in content.lines() {
        metrics.total_lines += 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            metrics.blank_lines += 1;
        } else if trimmed.starts_with("//")
            || trimmed.starts_with('#')
            || trimmed.starts_with("--")
        {
            metrics.comment_lines += 1;
        } else {
            metrics.code_lines += 1;
        }

        if trimmed.starts_with("def ")
            || trimmed.starts_with("fn ")
            || trimmed.starts_with("pub fn ")
            || trimmed.starts_with("function ")
            || trimmed.contains("=> {")
        {
            metrics.function_count += 1;
        }
    }

    metrics
}

/// Identify a language name from a file path's extension
pub fn identify_code_language(path: &str) -> &'static str {
    let extension = path.rsplit('.').next().unwrap_or("");
    match extension {
        "rs" => "rust",
        "py" => "python",
        "js" => "javascript",
        "jsx" => "javascript",
        "ts" => "typescript",
        "tsx" => "typescript",
        "go" => "go",
        "java" => "java",
        "c" => "c",
        "h" => "c",
        "cpp" | "cc" | "hpp" => "cpp",
        "rb" => "ruby",
        "php" => "php",
        "cs" => "csharp",
        "swift" => "swift",
        "kt" => "kotlin",
        "sh" => "shell",
        "sql" => "sql",
        "html" => "html",
        "css" => "css",
        "json" => "json",
        "yaml" | "yml" => "yaml",
        "toml" => "toml",
        "md" => "markdown",
        _ => "text",
    }
}
