//! Directory listing for bulk imports
//!
//! Enumerates the blob entries of a GitHub repository tree and filters them
//! to a base path. The listing itself goes through the `gh` boundary; the
//! filtering and result shape are owned here.

use crate::error::{Result, RuleshareError};
use crate::github;

/// A file discovered in a repository listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    /// Path relative to the repository root
    pub path: String,
}

/// List all files under `path` in the repository tree at `git_ref`
///
/// An empty `path` lists the whole tree. The default branch name is used
/// when no ref is given.
pub fn list_files(
    owner: &str,
    repo: &str,
    path: &str,
    git_ref: Option<&str>,
) -> Result<Vec<ListedFile>> {
    let entries = github::fetch_tree(owner, repo, git_ref.unwrap_or("main")).map_err(|e| {
        RuleshareError::ListFilesFailed {
            owner: owner.to_string(),
            repo: repo.to_string(),
            reason: e.to_string(),
        }
    })?;

    let files = entries
        .into_iter()
        .filter(|e| e.is_blob())
        .map(|e| ListedFile { path: e.path })
        .collect();

    Ok(filter_by_path(files, path))
}

/// Keep only files under the base path (prefix match on `base + "/"`)
pub fn filter_by_path(files: Vec<ListedFile>, base: &str) -> Vec<ListedFile> {
    if base.is_empty() {
        return files;
    }

    let prefix = format!("{}/", base);
    files
        .into_iter()
        .filter(|f| f.path.starts_with(&prefix))
        .collect()
}
