//! Init command implementation

use std::path::PathBuf;

use crate::commands::workspace_paths;
use crate::config::{self, SharedConfig};
use crate::error::Result;

/// Create an empty shared.json; reports instead of failing when one exists
pub fn run(workspace: Option<PathBuf>) -> Result<()> {
    let paths = workspace_paths(workspace)?;
    let config_path = paths.config_path();

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    config::write_config(&paths, &SharedConfig::new())?;
    println!("Created {}", config_path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_config() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path().to_path_buf())).unwrap();

        let paths = crate::config::RulesPaths::new(temp.path());
        let config = crate::config::require_config(&paths).unwrap();
        assert!(config.sources.is_empty());
        assert!(config.rules.is_empty());
    }

    #[test]
    fn test_init_twice_is_not_an_error() {
        let temp = TempDir::new().unwrap();
        run(Some(temp.path().to_path_buf())).unwrap();
        run(Some(temp.path().to_path_buf())).unwrap();
    }
}
