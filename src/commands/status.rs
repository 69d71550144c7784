//! Status command implementation
//!
//! Checks every configured rule for remote drift by re-fetching and
//! comparing fingerprints against the lock record. Remote check failures
//! degrade to an `error` column, never a command failure.

use std::path::PathBuf;

use console::Style;

use crate::commands::workspace_paths;
use crate::config::{self, SharedConfig, SharedLock};
use crate::error::Result;
use crate::fetcher::{self, Fetch, HttpFetcher};
use crate::hash;
use crate::resolver;

/// One row of the status table
#[derive(Debug, Clone)]
pub struct StatusEntry {
    pub name: String,
    pub current_sha: String,
    pub latest_sha: String,
    pub is_outdated: bool,
}

pub fn run(workspace: Option<PathBuf>) -> Result<()> {
    let paths = workspace_paths(workspace)?;
    let config = config::require_config(&paths)?;

    let Some(lock) = config::read_lock(&paths)? else {
        println!("No lock file. Run `ruleshare sync` first.");
        return Ok(());
    };

    let fetcher = HttpFetcher::new();
    let entries = collect_entries(&config, &lock, &fetcher);
    print_table(&entries);

    Ok(())
}

fn collect_entries(
    config: &SharedConfig,
    lock: &SharedLock,
    fetcher: &dyn Fetch,
) -> Vec<StatusEntry> {
    config
        .rules
        .iter()
        .map(|(name, source)| check_rule(name, source, config, lock, fetcher))
        .collect()
}

fn check_rule(
    name: &str,
    source: &str,
    config: &SharedConfig,
    lock: &SharedLock,
    fetcher: &dyn Fetch,
) -> StatusEntry {
    let Some(entry) = lock.rules.get(name) else {
        return StatusEntry {
            name: name.to_string(),
            current_sha: "not synced".to_string(),
            latest_sha: "unknown".to_string(),
            is_outdated: true,
        };
    };

    let check = resolver::resolve(source, config)
        .and_then(|outcome| fetcher::check_for_update(fetcher, &outcome.resolved, &entry.sha));

    match check {
        Ok(check) => StatusEntry {
            name: name.to_string(),
            current_sha: hash::short(&entry.sha).to_string(),
            latest_sha: hash::short(&check.latest_sha).to_string(),
            is_outdated: check.is_outdated,
        },
        Err(_) => StatusEntry {
            name: name.to_string(),
            current_sha: hash::short(&entry.sha).to_string(),
            latest_sha: "error".to_string(),
            is_outdated: false,
        },
    }
}

fn print_table(entries: &[StatusEntry]) {
    println!();
    println!("Rule Status:");
    println!("{}", "-".repeat(60));

    for entry in entries {
        let marker = if entry.is_outdated { "!" } else { " " };
        let status = if entry.is_outdated {
            Style::new().yellow().apply_to("outdated")
        } else {
            Style::new().green().apply_to("current")
        };
        println!(
            "{} {}: {} ({})",
            marker, entry.name, entry.current_sha, status
        );
    }
}
