//! Remove command implementation

use std::fs;
use std::path::PathBuf;

use crate::cli::RemoveArgs;
use crate::commands::workspace_paths;
use crate::config::{self, SharedConfig};
use crate::error::{Result, RuleshareError};
use crate::resolver;
use crate::sync::rule_file_path;

/// Remove a rule from the config, the lock, and the shared directory
pub fn run(workspace: Option<PathBuf>, args: RemoveArgs) -> Result<()> {
    let paths = workspace_paths(workspace)?;
    let mut config = config::require_config(&paths)?;

    let Some(source) = config.rules.remove(&args.name) else {
        return Err(RuleshareError::RuleNotFound {
            name: args.name.clone(),
        });
    };
    config::write_config(&paths, &config)?;

    if let Some(mut lock) = config::read_lock(&paths)? {
        if lock.rules.remove(&args.name).is_some() {
            config::write_lock(&paths, &lock)?;
        }
    }

    let file_path = rule_file_path(
        &paths.shared_dir(),
        &args.name,
        &synced_source_path(&source, &config),
    );
    if file_path.exists() {
        fs::remove_file(&file_path).map_err(|e| RuleshareError::FileWriteFailed {
            path: file_path.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    println!("Removed rule \"{}\"", args.name);
    Ok(())
}

/// Source path for extension inference; unresolvable sources fall back to
/// the default extension via an empty path
fn synced_source_path(source: &str, config: &SharedConfig) -> String {
    resolver::resolve(source, config)
        .map(|outcome| outcome.resolved.source_path().to_string())
        .unwrap_or_default()
}
