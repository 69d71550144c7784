//! Configuration and lock record handling
//!
//! This module contains data structures for the two persisted records:
//! - `shared.json` - configured source aliases and rules
//! - `shared.lock` - provenance and content fingerprint of the last sync
//!
//! Both live under `.claude/rules/` in the workspace, next to the `shared/`
//! directory that holds the synced rule files. Records follow a load →
//! transform → store cycle: they are read fresh per command invocation,
//! mutated in memory, and written back once.

pub mod ordered_map;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RuleshareError};

pub use ordered_map::OrderedMap;

const RULES_DIR: &str = ".claude/rules";
const CONFIG_FILE: &str = "shared.json";
const LOCK_FILE: &str = "shared.lock";
const SHARED_DIR: &str = "shared";

/// Current lock record format version
pub const LOCK_VERSION: u32 = 1;

/// Shared configuration (shared.json)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SharedConfig {
    /// Source aliases: short name -> source string
    #[serde(default)]
    pub sources: OrderedMap,

    /// Rules: rule name -> source string
    #[serde(default)]
    pub rules: OrderedMap,
}

/// Lock record (shared.lock)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SharedLock {
    /// Lock format version
    pub version: u32,

    /// Per-rule sync records; an entry exists iff the rule has synced at least once
    #[serde(default)]
    pub rules: OrderedMap<LockEntry>,
}

/// Provenance and fingerprint of one synced rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockEntry {
    /// Source string as configured at last sync
    pub source: String,

    /// Content fingerprint of the last fetched bytes
    pub sha: String,

    /// Timestamp of the last sync (RFC 3339)
    pub updated: String,
}

impl SharedConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SharedLock {
    pub fn new() -> Self {
        Self {
            version: LOCK_VERSION,
            rules: OrderedMap::new(),
        }
    }
}

impl Default for SharedLock {
    fn default() -> Self {
        Self::new()
    }
}

/// Filesystem layout of the rules workspace
#[derive(Debug, Clone)]
pub struct RulesPaths {
    root: PathBuf,
}

impl RulesPaths {
    /// Build the layout for a workspace root (the directory containing `.claude/`)
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Layout for the current working directory
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(|e| RuleshareError::IoError {
            message: format!("Failed to get current directory: {}", e),
        })?;
        Ok(Self::new(cwd))
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(RULES_DIR).join(CONFIG_FILE)
    }

    pub fn lock_path(&self) -> PathBuf {
        self.root.join(RULES_DIR).join(LOCK_FILE)
    }

    /// Directory that receives the synced rule files
    pub fn shared_dir(&self) -> PathBuf {
        self.root.join(RULES_DIR).join(SHARED_DIR)
    }
}

/// Read shared.json; `None` when the file does not exist yet
pub fn read_config(paths: &RulesPaths) -> Result<Option<SharedConfig>> {
    read_record(&paths.config_path())
}

/// Read shared.json, failing with a remediation hint when missing
pub fn require_config(paths: &RulesPaths) -> Result<SharedConfig> {
    read_config(paths)?.ok_or_else(|| RuleshareError::ConfigNotFound {
        path: paths.config_path().display().to_string(),
    })
}

/// Write shared.json, creating parent directories as needed
pub fn write_config(paths: &RulesPaths, config: &SharedConfig) -> Result<()> {
    write_record(&paths.config_path(), config)
}

/// Read shared.lock; `None` when no sync has run yet
pub fn read_lock(paths: &RulesPaths) -> Result<Option<SharedLock>> {
    read_record(&paths.lock_path())
}

/// Write shared.lock, creating parent directories as needed
pub fn write_lock(paths: &RulesPaths, lock: &SharedLock) -> Result<()> {
    write_record(&paths.lock_path(), lock)
}

fn read_record<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path).map_err(|e| RuleshareError::FileReadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let record = serde_json::from_str(&content).map_err(|e| RuleshareError::ConfigParseFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    Ok(Some(record))
}

fn write_record<T: Serialize>(path: &Path, record: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RuleshareError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    let content =
        serde_json::to_string_pretty(record).map_err(|e| RuleshareError::ConfigParseFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

    fs::write(path, content).map_err(|e| RuleshareError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}
