//! Error types and handling for ruleshare
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for ruleshare operations
#[derive(Error, Diagnostic, Debug)]
pub enum RuleshareError {
    // Resolution errors
    #[error("Invalid source format: {source_str}")]
    #[diagnostic(
        code(ruleshare::resolve::invalid_format),
        help("Valid formats: https://host/file.md, github:owner/repo/path, alias:path")
    )]
    InvalidSourceFormat { source_str: String },

    #[error("Invalid GitHub source: {source_str}")]
    #[diagnostic(
        code(ruleshare::resolve::invalid_github),
        help("GitHub sources need at least an owner and a repository: github:owner/repo")
    )]
    InvalidGitHubSource { source_str: String },

    #[error("Circular alias detected: {alias}")]
    #[diagnostic(
        code(ruleshare::resolve::circular_alias),
        help("Remove the cycle from the sources section of shared.json")
    )]
    CircularAlias { alias: String },

    // Fetch errors
    #[error("Failed to fetch {url}: {reason}")]
    #[diagnostic(code(ruleshare::fetch::failed))]
    FetchFailed { url: String, reason: String },

    #[error("GitHub CLI (gh) is not installed")]
    #[diagnostic(
        code(ruleshare::gh::not_installed),
        help("Install it from https://cli.github.com and run `gh auth login`")
    )]
    GhNotInstalled,

    #[error("GitHub CLI command failed: {stderr}")]
    #[diagnostic(
        code(ruleshare::gh::command_failed),
        help("If the repository is private, run `gh auth login` first")
    )]
    GhCommandFailed { stderr: String },

    #[error("Failed to list files from {owner}/{repo}: {reason}")]
    #[diagnostic(
        code(ruleshare::list::failed),
        help("Check that the repository exists and you have access to it")
    )]
    ListFilesFailed {
        owner: String,
        repo: String,
        reason: String,
    },

    #[error("add-all only supports GitHub sources")]
    #[diagnostic(
        code(ruleshare::list::not_github),
        help("Point add-all at a github:owner/repo source or an alias resolving to one")
    )]
    NotAGitHubSource,

    // Configuration errors
    #[error("No shared.json found at {path}")]
    #[diagnostic(
        code(ruleshare::config::not_found),
        help("Run `ruleshare init` first")
    )]
    ConfigNotFound { path: String },

    #[error("Invalid JSON in {path}")]
    #[diagnostic(
        code(ruleshare::config::parse_failed),
        help("Fix or delete the file, then run `ruleshare init` again")
    )]
    ConfigParseFailed { path: String, reason: String },

    // Validation errors
    #[error("Invalid rule name \"{name}\": {reason}")]
    #[diagnostic(
        code(ruleshare::name::invalid_rule),
        help("Rule names may not contain \\ : * ? \" < > | or dots")
    )]
    InvalidRuleName { name: String, reason: String },

    #[error("Invalid alias name \"{alias}\": {reason}")]
    #[diagnostic(code(ruleshare::name::invalid_alias))]
    InvalidAliasName { alias: String, reason: String },

    #[error("\"{alias}\" is a reserved name")]
    #[diagnostic(
        code(ruleshare::name::reserved_alias),
        help("Cannot use: github, http, https, file")
    )]
    ReservedAlias { alias: String },

    #[error("Rule \"{name}\" not found")]
    #[diagnostic(code(ruleshare::rule::not_found))]
    RuleNotFound { name: String },

    // File system errors
    #[error("Failed to read file: {path}")]
    #[diagnostic(code(ruleshare::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}")]
    #[diagnostic(code(ruleshare::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(ruleshare::fs::io_error))]
    IoError { message: String },
}

impl From<std::io::Error> for RuleshareError {
    fn from(err: std::io::Error) -> Self {
        RuleshareError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RuleshareError {
    fn from(err: serde_json::Error) -> Self {
        RuleshareError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for RuleshareError {
    fn from(err: reqwest::Error) -> Self {
        RuleshareError::FetchFailed {
            url: err
                .url()
                .map(|u| u.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, RuleshareError>;
