//! Source string resolution
//!
//! This module turns heterogeneous source identifiers into a canonical,
//! alias-free descriptor. Three grammars are accepted:
//! - Direct URLs: `https://host/path/file.md`
//! - GitHub short-form: `github:owner/repo[/path][@ref]`
//! - Alias indirection: `alias[:path]` where `alias` is a key in the
//!   configured sources, resolved recursively
//!
//! Resolution is a pure function of the source string and the configuration;
//! no I/O happens here. Alias chains are walked with an explicit visited set
//! so cycles fail fast instead of recursing forever.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::config::SharedConfig;
use crate::error::{Result, RuleshareError};

/// Canonical, alias-free descriptor of where content lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ResolvedSource {
    /// Direct HTTP(S) URL
    Url { url: String },
    /// GitHub-hosted file or repo root
    GitHub {
        owner: String,
        repo: String,
        /// Path within the repository; empty string means the repo root
        path: String,
        /// Explicit ref; `None` means the caller uses the default branch
        /// (with a fallback to the alternate default branch name)
        git_ref: Option<String>,
    },
}

impl ResolvedSource {
    /// Path used for file extension inference
    pub fn source_path(&self) -> &str {
        match self {
            ResolvedSource::Url { url } => url,
            ResolvedSource::GitHub { path, .. } => path,
        }
    }
}

/// Result of resolving a source string
///
/// Callers need both the canonical target and the user-facing identifier:
/// bulk-add rebuilds derived source strings from the original form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOutcome {
    pub resolved: ResolvedSource,
    pub original_source: String,
}

/// Resolve a source string against the configured aliases
pub fn resolve(source: &str, config: &SharedConfig) -> Result<ResolveOutcome> {
    let mut visited = HashSet::new();
    let resolved = resolve_inner(source, config, &mut visited)?;
    Ok(ResolveOutcome {
        resolved,
        original_source: source.to_string(),
    })
}

fn resolve_inner(
    source: &str,
    config: &SharedConfig,
    visited: &mut HashSet<String>,
) -> Result<ResolvedSource> {
    if source.starts_with("https://") || source.starts_with("http://") {
        return Ok(ResolvedSource::Url {
            url: source.to_string(),
        });
    }

    if let Some(rest) = source.strip_prefix("github:") {
        return parse_github(source, rest);
    }

    resolve_alias(source, config, visited)
}

fn resolve_alias(
    source: &str,
    config: &SharedConfig,
    visited: &mut HashSet<String>,
) -> Result<ResolvedSource> {
    // Bare alias: the whole string is a registered alias key
    if let Some(base) = config.sources.get(source) {
        mark_visited(source, visited)?;
        return resolve_inner(&base.clone(), config, visited);
    }

    let Some((alias, file_path)) = source.split_once(':') else {
        return Err(RuleshareError::InvalidSourceFormat {
            source_str: source.to_string(),
        });
    };

    let Some(base) = config.sources.get(alias) else {
        return Err(RuleshareError::InvalidSourceFormat {
            source_str: source.to_string(),
        });
    };
    let base = base.clone();

    mark_visited(alias, visited)?;

    if file_path.is_empty() {
        return resolve_inner(&base, config, visited);
    }

    let combined = combine_source_and_path(&base, file_path);
    resolve_inner(&combined, config, visited)
}

fn mark_visited(alias: &str, visited: &mut HashSet<String>) -> Result<()> {
    if !visited.insert(alias.to_string()) {
        return Err(RuleshareError::CircularAlias {
            alias: alias.to_string(),
        });
    }
    Ok(())
}

/// Combine an alias target with the path the user appended to the alias
///
/// The target absorbs the path directly when it ends with `:` (an open
/// prefix like `github:`); otherwise the two are joined with `/`. Any
/// `@ref` suffix on the path survives the join.
pub fn combine_source_and_path(base: &str, file_path: &str) -> String {
    let (git_ref, clean_path) = extract_ref(file_path);
    let combined = if base.ends_with(':') {
        format!("{}{}", base, clean_path)
    } else {
        format!("{}/{}", base, clean_path)
    };

    match git_ref {
        Some(r) => format!("{}@{}", combined, r),
        None => combined,
    }
}

fn parse_github(source: &str, without_prefix: &str) -> Result<ResolvedSource> {
    let (git_ref, path_part) = extract_ref(without_prefix);

    let parts: Vec<&str> = path_part.split('/').collect();
    if parts.len() < 2 {
        return Err(RuleshareError::InvalidGitHubSource {
            source_str: source.to_string(),
        });
    }

    Ok(ResolvedSource::GitHub {
        owner: parts[0].to_string(),
        repo: parts[1].to_string(),
        path: parts[2..].join("/"),
        git_ref: git_ref.map(str::to_string),
    })
}

/// Split a trailing `@ref` off a source path
///
/// The `@` is only treated as a ref separator when it occurs after the first
/// character, nothing after it contains a `/`, and the text before it ends in
/// a file extension. This keeps refs like `@v1.0.0` apart from filenames that
/// legitimately contain `@`.
fn extract_ref(source: &str) -> (Option<&str>, &str) {
    let Some(at_index) = source.rfind('@') else {
        return (None, source);
    };

    if at_index == 0 || source[at_index..].contains('/') {
        return (None, source);
    }

    let path_before = &source[..at_index];
    if !has_file_extension(path_before) {
        return (None, source);
    }

    (Some(&source[at_index + 1..]), path_before)
}

fn has_file_extension(path: &str) -> bool {
    let Some(last_dot) = path.rfind('.') else {
        return false;
    };

    if last_dot == path.len() - 1 {
        return false;
    }

    match path.rfind('/') {
        Some(last_slash) => last_dot > last_slash,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_config() -> SharedConfig {
        SharedConfig::new()
    }

    fn config_with_alias() -> SharedConfig {
        let mut config = SharedConfig::new();
        config
            .sources
            .insert("kc", "github:kevincrabbe/kc-rules".to_string());
        config
    }

    fn github_parts(resolved: &ResolvedSource) -> (&str, &str, &str, Option<&str>) {
        match resolved {
            ResolvedSource::GitHub {
                owner,
                repo,
                path,
                git_ref,
            } => (owner, repo, path, git_ref.as_deref()),
            ResolvedSource::Url { .. } => panic!("expected a GitHub source"),
        }
    }

    #[test]
    fn test_resolve_http_url() {
        let outcome = resolve("http://example.com/rules.md", &empty_config()).unwrap();
        assert_eq!(
            outcome.resolved,
            ResolvedSource::Url {
                url: "http://example.com/rules.md".to_string()
            }
        );
        assert_eq!(outcome.original_source, "http://example.com/rules.md");
    }

    #[test]
    fn test_resolve_https_url() {
        let outcome = resolve("https://example.com/rules.md", &empty_config()).unwrap();
        assert!(matches!(outcome.resolved, ResolvedSource::Url { .. }));
    }

    #[test]
    fn test_parse_github_with_path() {
        let outcome = resolve("github:owner/repo/path/file.md", &empty_config()).unwrap();
        let (owner, repo, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
        assert_eq!(path, "path/file.md");
        assert_eq!(git_ref, None);
    }

    #[test]
    fn test_parse_github_single_file() {
        let outcome = resolve("github:owner/repo/file.md", &empty_config()).unwrap();
        let (_, _, path, _) = github_parts(&outcome.resolved);
        assert_eq!(path, "file.md");
    }

    #[test]
    fn test_parse_github_repo_root() {
        let outcome = resolve("github:owner/repo", &empty_config()).unwrap();
        let (owner, repo, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
        assert_eq!(path, "");
        assert_eq!(git_ref, None);
    }

    #[test]
    fn test_parse_github_missing_repo_fails() {
        let err = resolve("github:owner", &empty_config()).unwrap_err();
        assert!(matches!(err, RuleshareError::InvalidGitHubSource { .. }));
    }

    #[test]
    fn test_extract_ref_from_at_suffix() {
        let outcome = resolve("github:owner/repo/file.md@v1.0.0", &empty_config()).unwrap();
        let (_, _, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(path, "file.md");
        assert_eq!(git_ref, Some("v1.0.0"));
    }

    #[test]
    fn test_extract_ref_nested_path() {
        let outcome = resolve("github:owner/repo/p1/p2.md@main", &empty_config()).unwrap();
        let (_, _, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(path, "p1/p2.md");
        assert_eq!(git_ref, Some("main"));
    }

    #[test]
    fn test_at_in_filename_without_extension_is_not_a_ref() {
        // "owner/repo/file" has no extension before the @, so the @ belongs
        // to the filename
        let outcome = resolve("github:owner/repo/file@2x.md", &empty_config()).unwrap();
        let (_, _, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(path, "file@2x.md");
        assert_eq!(git_ref, None);
    }

    #[test]
    fn test_slash_after_at_is_not_a_ref() {
        let outcome = resolve("github:owner/repo/dir@v1/file.md", &empty_config()).unwrap();
        let (_, _, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(path, "dir@v1/file.md");
        assert_eq!(git_ref, None);
    }

    #[test]
    fn test_resolve_alias_to_github() {
        let outcome = resolve("kc:general.md", &config_with_alias()).unwrap();
        let (owner, repo, path, _) = github_parts(&outcome.resolved);
        assert_eq!(owner, "kevincrabbe");
        assert_eq!(repo, "kc-rules");
        assert_eq!(path, "general.md");
        assert_eq!(outcome.original_source, "kc:general.md");
    }

    #[test]
    fn test_resolve_alias_with_nested_path() {
        let outcome = resolve("kc:typescript/rules.md", &config_with_alias()).unwrap();
        let (_, _, path, _) = github_parts(&outcome.resolved);
        assert_eq!(path, "typescript/rules.md");
    }

    #[test]
    fn test_resolve_bare_alias() {
        let outcome = resolve("kc", &config_with_alias()).unwrap();
        let (owner, repo, path, _) = github_parts(&outcome.resolved);
        assert_eq!(owner, "kevincrabbe");
        assert_eq!(repo, "kc-rules");
        assert_eq!(path, "");
        assert_eq!(outcome.original_source, "kc");
    }

    #[test]
    fn test_unknown_alias_fails() {
        let err = resolve("unknown:file.md", &empty_config()).unwrap_err();
        assert!(matches!(err, RuleshareError::InvalidSourceFormat { .. }));
    }

    #[test]
    fn test_bare_non_alias_fails() {
        let err = resolve("not-an-alias", &empty_config()).unwrap_err();
        assert!(matches!(err, RuleshareError::InvalidSourceFormat { .. }));
    }

    #[test]
    fn test_alias_resolution_is_transitive() {
        let mut config = SharedConfig::new();
        config.sources.insert("a", "b:x".to_string());
        config.sources.insert("b", "github:o/r".to_string());

        let via_alias = resolve("a:file.md", &config).unwrap();
        let direct = resolve("github:o/r/x/file.md", &config).unwrap();
        assert_eq!(via_alias.resolved, direct.resolved);
    }

    #[test]
    fn test_alias_two_cycle_fails() {
        let mut config = SharedConfig::new();
        config.sources.insert("a", "b".to_string());
        config.sources.insert("b", "a".to_string());

        let err = resolve("a", &config).unwrap_err();
        assert!(matches!(err, RuleshareError::CircularAlias { .. }));
    }

    #[test]
    fn test_alias_self_cycle_fails() {
        let mut config = SharedConfig::new();
        config.sources.insert("a", "a:file.md".to_string());

        let err = resolve("a:file.md", &config).unwrap_err();
        assert!(matches!(err, RuleshareError::CircularAlias { .. }));
    }

    #[test]
    fn test_alias_ending_with_colon_appends_directly() {
        let mut config = SharedConfig::new();
        config.sources.insert("gh", "github:".to_string());

        let outcome = resolve("gh:owner/repo/file.md", &config).unwrap();
        let (owner, repo, path, _) = github_parts(&outcome.resolved);
        assert_eq!(owner, "owner");
        assert_eq!(repo, "repo");
        assert_eq!(path, "file.md");
    }

    #[test]
    fn test_ref_survives_alias_combination() {
        let outcome = resolve("kc:file.md@v2.1.0", &config_with_alias()).unwrap();
        let (_, _, path, git_ref) = github_parts(&outcome.resolved);
        assert_eq!(path, "file.md");
        assert_eq!(git_ref, Some("v2.1.0"));
    }

    #[test]
    fn test_combine_source_and_path() {
        assert_eq!(
            combine_source_and_path("github:o/r", "file.md"),
            "github:o/r/file.md"
        );
        assert_eq!(combine_source_and_path("github:", "o/r"), "github:o/r");
        assert_eq!(
            combine_source_and_path("github:o/r", "file.md@v1"),
            "github:o/r/file.md@v1"
        );
    }

    #[test]
    fn test_source_path() {
        let url = ResolvedSource::Url {
            url: "https://h/f.txt".to_string(),
        };
        assert_eq!(url.source_path(), "https://h/f.txt");

        let gh = ResolvedSource::GitHub {
            owner: "o".to_string(),
            repo: "r".to_string(),
            path: "docs/f.md".to_string(),
            git_ref: None,
        };
        assert_eq!(gh.source_path(), "docs/f.md");
    }
}
