//! Content fetching and update checks
//!
//! Retrieves the bytes behind a resolved source together with their content
//! fingerprint. GitHub sources go through the raw-content host with a
//! deterministic branch fallback: when no explicit ref was requested, a
//! failed fetch against the primary default branch name is retried against
//! the alternate one, and as a last resort the authenticated `gh` CLI is
//! asked (private repositories). An explicit ref never falls back.

use crate::error::{Result, RuleshareError};
use crate::github;
use crate::hash;
use crate::resolver::ResolvedSource;

const RAW_HOST: &str = "https://raw.githubusercontent.com";
const DEFAULT_BRANCH: &str = "main";
const FALLBACK_BRANCH: &str = "master";

/// Fetched content together with its fingerprint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    pub content: String,
    pub sha: String,
}

/// Outcome of comparing a lock fingerprint against the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateCheck {
    pub is_outdated: bool,
    pub latest_sha: String,
}

/// Content retrieval seam, stubbed in sync engine tests
pub trait Fetch {
    fn fetch(&self, resolved: &ResolvedSource) -> Result<FetchResult>;
}

/// Fetcher backed by a blocking HTTP client and the `gh` CLI
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }

    fn fetch_url(&self, url: &str) -> Result<FetchResult> {
        let response = self.client.get(url).send().map_err(|e| {
            RuleshareError::FetchFailed {
                url: url.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !response.status().is_success() {
            return Err(RuleshareError::FetchFailed {
                url: url.to_string(),
                reason: response.status().to_string(),
            });
        }

        let content = response.text()?;
        let sha = hash::fingerprint(content.as_bytes());
        Ok(FetchResult { content, sha })
    }

    fn fetch_github(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<FetchResult> {
        let mut last_err = None;
        for branch in candidate_branches(git_ref) {
            match self.fetch_url(&raw_url(owner, repo, branch, path)) {
                Ok(result) => return Ok(result),
                Err(e) => last_err = Some(e),
            }
        }

        // With an explicit ref there is nothing further to try
        if git_ref.is_some() {
            return Err(last_err.unwrap_or(RuleshareError::GhNotInstalled));
        }

        // Last resort: the repository may be private but reachable through
        // the authenticated gh CLI (default branch)
        let content = github::fetch_raw_content(owner, repo, path, None)?;
        let sha = hash::fingerprint(content.as_bytes());
        Ok(FetchResult { content, sha })
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, resolved: &ResolvedSource) -> Result<FetchResult> {
        match resolved {
            ResolvedSource::Url { url } => self.fetch_url(url),
            ResolvedSource::GitHub {
                owner,
                repo,
                path,
                git_ref,
            } => self.fetch_github(owner, repo, path, git_ref.as_deref()),
        }
    }
}

/// Branch names to try, in order: the explicit ref alone, or the primary
/// default branch followed by the alternate one
fn candidate_branches(git_ref: Option<&str>) -> Vec<&str> {
    match git_ref {
        Some(r) => vec![r],
        None => vec![DEFAULT_BRANCH, FALLBACK_BRANCH],
    }
}

fn raw_url(owner: &str, repo: &str, branch: &str, path: &str) -> String {
    format!("{}/{}/{}/{}/{}", RAW_HOST, owner, repo, branch, path)
}

/// Check whether the remote content drifted from a recorded fingerprint
///
/// Implemented as fetch + compare; there is no lighter-weight remote call.
pub fn check_for_update(
    fetcher: &dyn Fetch,
    resolved: &ResolvedSource,
    current_sha: &str,
) -> Result<UpdateCheck> {
    let FetchResult { sha, .. } = fetcher.fetch(resolved)?;
    Ok(UpdateCheck {
        is_outdated: sha != current_sha,
        latest_sha: sha,
    })
}
