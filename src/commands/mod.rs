//! Command implementations for the ruleshare CLI

pub mod add;
pub mod add_all;
pub mod completions;
pub mod init;
pub mod list;
pub mod remove;
pub mod status;
pub mod sync;

use std::path::PathBuf;

use crate::config::RulesPaths;
use crate::error::Result;

/// Resolve the workspace layout from the optional global `--workspace` flag
pub fn workspace_paths(workspace: Option<PathBuf>) -> Result<RulesPaths> {
    match workspace {
        Some(path) => Ok(RulesPaths::new(path)),
        None => RulesPaths::from_cwd(),
    }
}
