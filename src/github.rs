//! GitHub CLI (`gh`) boundary
//!
//! Two operations delegate to the locally-authenticated `gh` tool rather than
//! being reimplemented here: raw content retrieval for private repositories
//! and recursive tree listing. Failures distinguish "gh not installed" from
//! "gh command failed" so the user gets an actionable hint either way.

use std::io;
use std::process::Command;

use serde::Deserialize;

use crate::error::{Result, RuleshareError};

/// One entry of a recursive git tree listing
#[derive(Debug, Clone, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    #[serde(rename = "type")]
    pub entry_type: String,
}

impl TreeEntry {
    pub fn is_blob(&self) -> bool {
        self.entry_type == "blob"
    }
}

#[derive(Debug, Deserialize)]
struct TreeResponse {
    #[serde(default)]
    tree: Vec<TreeEntry>,
}

/// Fetch raw file content through `gh api`, using the repository's default
/// branch when no ref is given
pub fn fetch_raw_content(
    owner: &str,
    repo: &str,
    path: &str,
    git_ref: Option<&str>,
) -> Result<String> {
    let mut api_path = format!("repos/{}/{}/contents/{}", owner, repo, path);
    if let Some(r) = git_ref {
        api_path.push_str(&format!("?ref={}", r));
    }

    let stdout = run_gh(&[
        "api",
        &api_path,
        "-H",
        "Accept: application/vnd.github.raw",
    ])?;

    String::from_utf8(stdout).map_err(|e| RuleshareError::GhCommandFailed {
        stderr: format!("gh returned non-UTF-8 content: {}", e),
    })
}

/// List all entries of a repository tree at `git_ref`, recursively
pub fn fetch_tree(owner: &str, repo: &str, git_ref: &str) -> Result<Vec<TreeEntry>> {
    let api_path = format!("repos/{}/{}/git/trees/{}?recursive=1", owner, repo, git_ref);
    let stdout = run_gh(&["api", &api_path])?;
    parse_tree(&stdout)
}

fn parse_tree(raw: &[u8]) -> Result<Vec<TreeEntry>> {
    let response: TreeResponse =
        serde_json::from_slice(raw).map_err(|e| RuleshareError::GhCommandFailed {
            stderr: format!("could not parse gh tree output: {}", e),
        })?;
    Ok(response.tree)
}

fn run_gh(args: &[&str]) -> Result<Vec<u8>> {
    let output = Command::new("gh").args(args).output().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            RuleshareError::GhNotInstalled
        } else {
            RuleshareError::GhCommandFailed {
                stderr: e.to_string(),
            }
        }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RuleshareError::GhCommandFailed {
            stderr: stderr.trim().to_string(),
        });
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tree_filters_nothing_itself() {
        let raw = br#"{
            "sha": "abc",
            "tree": [
                {"path": "notes.md", "type": "blob", "sha": "1"},
                {"path": "sub", "type": "tree", "sha": "2"},
                {"path": "sub/guide.md", "type": "blob", "sha": "3"}
            ]
        }"#;

        let entries = parse_tree(raw).unwrap();
        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_blob());
        assert!(!entries[1].is_blob());
        assert_eq!(entries[2].path, "sub/guide.md");
    }

    #[test]
    fn test_parse_tree_missing_tree_field() {
        let entries = parse_tree(br#"{"sha": "abc"}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_tree_invalid_json_fails() {
        let err = parse_tree(b"not json").unwrap_err();
        assert!(matches!(err, RuleshareError::GhCommandFailed { .. }));
    }
}
