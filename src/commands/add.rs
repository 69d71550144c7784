//! Add command implementation
//!
//! `add <name> <source>` registers a rule; `add source <alias> <source>`
//! registers a source alias. Both create shared.json when it does not
//! exist yet.

use std::path::PathBuf;

use crate::cli::AddArgs;
use crate::commands::workspace_paths;
use crate::config::{self, RulesPaths};
use crate::error::{Result, RuleshareError};
use crate::naming;

pub fn run(workspace: Option<PathBuf>, args: AddArgs) -> Result<()> {
    let paths = workspace_paths(workspace)?;

    if args.name == "source" {
        let alias_source = args.alias_source.ok_or_else(|| RuleshareError::IoError {
            message: "Usage: ruleshare add source <alias> <source>".to_string(),
        })?;
        return add_source(&paths, &args.source, &alias_source);
    }

    if args.alias_source.is_some() {
        return Err(RuleshareError::IoError {
            message: "Usage: ruleshare add <name> <source>".to_string(),
        });
    }

    add_rule(&paths, &args.name, &args.source)
}

fn add_rule(paths: &RulesPaths, name: &str, source: &str) -> Result<()> {
    naming::validate_rule_name(name)?;

    let mut config = config::read_config(paths)?.unwrap_or_default();
    config.rules.insert(name, source.to_string());
    config::write_config(paths, &config)?;

    println!("Added rule \"{}\" -> {}", name, source);
    Ok(())
}

fn add_source(paths: &RulesPaths, alias: &str, source: &str) -> Result<()> {
    naming::validate_alias_name(alias)?;

    let mut config = config::read_config(paths)?.unwrap_or_default();
    config.sources.insert(alias, source.to_string());
    config::write_config(paths, &config)?;

    println!("Added source alias \"{}\" -> {}", alias, source);
    Ok(())
}
