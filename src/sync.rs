//! Sync engine
//!
//! Orchestrates resolver + fetcher + lock record into an idempotent per-rule
//! state machine: resolve the configured source, fetch its content, compare
//! the fingerprint against the lock entry and decide created / updated /
//! unchanged / error. Failures are isolated per rule so one bad source never
//! aborts the batch; the caller persists the mutated lock exactly once after
//! the pass.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use crate::config::{LockEntry, SharedConfig, SharedLock};
use crate::error::{Result, RuleshareError};
use crate::fetcher::{Fetch, FetchResult};
use crate::resolver;

/// Default extension for synced files whose source carries none
const DEFAULT_EXTENSION: &str = ".md";

/// Per-rule outcome of a sync pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncStatus {
    Created,
    Updated,
    Unchanged,
    Error,
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SyncStatus::Created => "created",
            SyncStatus::Updated => "updated",
            SyncStatus::Unchanged => "unchanged",
            SyncStatus::Error => "error",
        };
        f.write_str(label)
    }
}

/// Result entry for one rule in a sync pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncResult {
    pub name: String,
    pub status: SyncStatus,
    pub error: Option<String>,
}

/// Sync every configured rule into `shared_dir`, mutating the lock in memory
///
/// Rules are processed in configuration insertion order, strictly
/// sequentially. The lock is not persisted here; rules that errored keep
/// their prior lock state.
pub fn sync_rules(
    config: &SharedConfig,
    lock: &mut SharedLock,
    shared_dir: &Path,
    force: bool,
    fetcher: &dyn Fetch,
) -> Result<Vec<SyncResult>> {
    fs::create_dir_all(shared_dir).map_err(|e| RuleshareError::FileWriteFailed {
        path: shared_dir.display().to_string(),
        reason: e.to_string(),
    })?;

    let rules: Vec<(String, String)> = config
        .rules
        .iter()
        .map(|(name, source)| (name.to_string(), source.clone()))
        .collect();

    let mut results = Vec::with_capacity(rules.len());
    for (name, source) in rules {
        results.push(sync_rule(&name, &source, config, lock, shared_dir, force, fetcher));
    }

    Ok(results)
}

fn sync_rule(
    name: &str,
    source: &str,
    config: &SharedConfig,
    lock: &mut SharedLock,
    shared_dir: &Path,
    force: bool,
    fetcher: &dyn Fetch,
) -> SyncResult {
    match attempt_sync(name, source, config, lock, shared_dir, force, fetcher) {
        Ok(status) => SyncResult {
            name: name.to_string(),
            status,
            error: None,
        },
        Err(e) => SyncResult {
            name: name.to_string(),
            status: SyncStatus::Error,
            error: Some(e.to_string()),
        },
    }
}

fn attempt_sync(
    name: &str,
    source: &str,
    config: &SharedConfig,
    lock: &mut SharedLock,
    shared_dir: &Path,
    force: bool,
    fetcher: &dyn Fetch,
) -> Result<SyncStatus> {
    let outcome = resolver::resolve(source, config)?;
    let FetchResult { content, sha } = fetcher.fetch(&outcome.resolved)?;

    let had_entry = match lock.rules.get(name) {
        Some(entry) if entry.sha == sha && !force => return Ok(SyncStatus::Unchanged),
        Some(_) => true,
        None => false,
    };

    let file_path = rule_file_path(shared_dir, name, outcome.resolved.source_path());
    write_rule_file(&file_path, &content)?;

    lock.rules.insert(
        name,
        LockEntry {
            source: source.to_string(),
            sha,
            updated: now_timestamp(),
        },
    );

    Ok(if had_entry {
        SyncStatus::Updated
    } else {
        SyncStatus::Created
    })
}

/// Local file path for a rule, extension inferred from the source path
pub fn rule_file_path(shared_dir: &Path, name: &str, source_path: &str) -> PathBuf {
    shared_dir.join(format!("{}{}", name, infer_extension(source_path)))
}

/// File extension of a source path: the substring from the last `.` to the
/// end, when that `.` occurs after the last `/` and is not the final
/// character. Defaults to `.md`.
pub fn infer_extension(path: &str) -> &str {
    let Some(last_dot) = path.rfind('.') else {
        return DEFAULT_EXTENSION;
    };

    if last_dot == path.len() - 1 {
        return DEFAULT_EXTENSION;
    }

    let after_slash = match path.rfind('/') {
        Some(last_slash) => last_dot > last_slash,
        None => true,
    };

    if after_slash {
        &path[last_dot..]
    } else {
        DEFAULT_EXTENSION
    }
}

fn write_rule_file(path: &Path, content: &str) -> Result<()> {
    // Rule names may contain '/' after a bulk-add
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| RuleshareError::FileWriteFailed {
            path: parent.display().to_string(),
            reason: e.to_string(),
        })?;
    }

    fs::write(path, content).map_err(|e| RuleshareError::FileWriteFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
