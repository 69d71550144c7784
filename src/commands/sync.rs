//! Sync command implementation

use std::path::PathBuf;

use console::Style;

use crate::commands::workspace_paths;
use crate::config;
use crate::error::Result;
use crate::fetcher::HttpFetcher;
use crate::sync::{sync_rules, SyncResult, SyncStatus};

/// Run a sync pass over every configured rule
///
/// Per-rule failures are reported, not fatal; the lock is persisted once
/// after the pass and reflects only the rules that succeeded.
pub fn run(workspace: Option<PathBuf>, force: bool) -> Result<()> {
    let paths = workspace_paths(workspace)?;
    let config = config::require_config(&paths)?;
    let mut lock = config::read_lock(&paths)?.unwrap_or_default();

    println!("Syncing rules...");

    let fetcher = HttpFetcher::new();
    let results = sync_rules(&config, &mut lock, &paths.shared_dir(), force, &fetcher)?;

    for result in &results {
        print_result(result);
    }

    config::write_lock(&paths, &lock)?;
    Ok(())
}

fn print_result(result: &SyncResult) {
    match result.status {
        SyncStatus::Error => {
            let detail = result.error.as_deref().unwrap_or("unknown error");
            eprintln!(
                "  {}: {} - {}",
                result.name,
                Style::new().red().apply_to("error"),
                detail
            );
        }
        SyncStatus::Unchanged => {
            println!("  {}: {}", result.name, result.status);
        }
        _ => {
            println!(
                "  {}: {}",
                result.name,
                Style::new().green().apply_to(&result.status)
            );
        }
    }
}
