//! WindSurf Tracker - Demo Binary
//!
//! Runs the tracker against a simulated editing session: loads config and
//! the database, drives the scripted event feed through the tracker, then
//! prints the resulting board and recent activity.

use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use windsurf_tracker::models::TaskStatus;
use windsurf_tracker::services::editor::{event_bus, simulator, FileWatcher, WatcherConfig};
use windsurf_tracker::services::metrics::{count_code_metrics, identify_code_language};
use windsurf_tracker::services::CodeAdvisor;
use windsurf_tracker::storage::{ConfigService, Database};
use windsurf_tracker::utils::text::format_time_ago;
use windsurf_tracker::Tracker;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_service = ConfigService::new()?;
    let config = config_service.get_config_clone();
    let db = Database::new()?;

    let mut tracker = Tracker::new(db, config.clone())?;
    tracker.seed_sample_data()?;

    // Feed the scripted session through the same bus a real editor would use
    let (client, receiver) = event_bus();
    let feed = tokio::spawn(simulator::run(client, Duration::from_millis(50)));
    tracker.run(receiver).await;
    feed.await?;

    println!("\n=== Board ===");
    for status in TaskStatus::ALL {
        let ids = tracker.board().column(status);
        println!("{} ({})", status.display_name(), ids.len());
        for id in ids {
            let task = tracker.get_task(id)?;
            println!("  {} - {}", task.id, task.title);
        }
    }

    println!("\n=== Snapshot history for src/auth.py ===");
    let history = tracker.snapshot_history("src/auth.py");
    for (index, snapshot) in history.iter().enumerate() {
        println!(
            "  #{} {} ({} bytes)",
            index, snapshot.created_at, snapshot.size_bytes
        );
    }
    if history.len() >= 2 {
        println!("{}", tracker.diff_snapshots("src/auth.py", 0, history.len() - 1)?);
    }
    if let Some(latest) = history.last() {
        let metrics = count_code_metrics(&latest.content()?);
        println!(
            "  latest: {} lines ({} code, {} comments), {} functions",
            metrics.total_lines, metrics.code_lines, metrics.comment_lines, metrics.function_count
        );
    }

    println!("\n=== Recent activity ===");
    for entry in tracker.recent_activity(10)? {
        println!(
            "  [{}] {} ({})",
            entry.kind.as_str(),
            entry.message,
            format_time_ago(entry.created_at)
        );
    }

    // AI review of the latest capture, when a provider is configured
    if config.ai_enabled {
        match CodeAdvisor::from_config(&config) {
            Ok(advisor) => {
                if let Some(latest) = history.last() {
                    let language = identify_code_language("src/auth.py");
                    match advisor.analyze_quality(&latest.content()?, language).await {
                        Ok(review) => println!("\n=== AI review ===\n{}", review),
                        Err(e) => warn!(error = %e, "AI review unavailable"),
                    }
                }
            }
            Err(e) => warn!(error = %e, "AI advisor not configured"),
        }
    }

    // Keep tracking real file saves when the watcher is enabled
    if config.watcher_enabled {
        let (client, receiver) = event_bus();
        let watcher_config = WatcherConfig {
            debounce_ms: config.watcher_debounce_ms,
            extensions: config.watch_extensions.clone(),
        };
        let root = std::env::current_dir()?;
        let _watcher = FileWatcher::start(&root, watcher_config, client)?;
        info!(root = %root.display(), "Watching for file changes, press Ctrl-C to stop");
        tokio::select! {
            _ = tracker.run(receiver) => {}
            _ = tokio::signal::ctrl_c() => {}
        }
    }

    info!("Done");
    Ok(())
}
