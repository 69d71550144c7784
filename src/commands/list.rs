//! List command implementation

use std::path::PathBuf;

use console::Style;

use crate::commands::workspace_paths;
use crate::config;
use crate::error::Result;

/// Print configured sources and rules, marking rules that have synced
pub fn run(workspace: Option<PathBuf>) -> Result<()> {
    let paths = workspace_paths(workspace)?;

    let Some(config) = config::read_config(&paths)? else {
        println!("No shared.json found. Run `ruleshare init` first.");
        return Ok(());
    };

    let lock = config::read_lock(&paths)?;

    if !config.sources.is_empty() {
        println!();
        println!("Sources:");
        for (alias, url) in config.sources.iter() {
            println!("  {}: {}", Style::new().bold().apply_to(alias), url);
        }
    }

    if !config.rules.is_empty() {
        println!();
        println!("Rules:");
        for (name, source) in config.rules.iter() {
            let synced = lock.as_ref().is_some_and(|l| l.rules.contains_key(name));
            let marker = if synced {
                Style::new().green().apply_to("✓").to_string()
            } else {
                " ".to_string()
            };
            println!("  {} {}: {}", marker, name, source);
        }
    }

    if config.rules.is_empty() && config.sources.is_empty() {
        println!();
        println!("No rules or sources configured.");
    }

    Ok(())
}
