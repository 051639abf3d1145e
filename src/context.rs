/// CI run context
///
/// Repository, commit and pull request of the current workflow run,
/// resolved once from the GitHub Actions environment and then passed
/// explicitly to the report builders and adapters.
use crate::error::{ReportError, Result};
use log::debug;
use std::path::Path;

pub const DEFAULT_SERVER_URL: &str = "https://github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, PartialEq)]
pub struct RunContext {
    pub server_url: String,
    pub api_url: String,
    pub owner: String,
    pub repo: String,
    /// Exact commit under test; line links are only valid at this commit
    pub sha: String,
    pub pull_request: Option<u64>,
}

impl RunContext {
    /// Resolve the context from `GITHUB_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve the context through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let repository = get("GITHUB_REPOSITORY")
            .ok_or_else(|| ReportError::MissingContext("GITHUB_REPOSITORY is not set".to_string()))?;
        let (owner, repo) = parse_repository(&repository)?;

        let sha = get("GITHUB_SHA").ok_or_else(|| ReportError::MissingContext("GITHUB_SHA is not set".to_string()))?;

        let server_url = get("GITHUB_SERVER_URL").unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());
        let api_url = get("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let pull_request = match get("GITHUB_EVENT_PATH") {
            Some(path) => read_event_number(Path::new(&path))?,
            None => None,
        };

        debug!("run context: {}/{} at {} (pull request {:?})", owner, repo, sha, pull_request);

        Ok(RunContext {
            server_url: server_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            owner,
            repo,
            sha,
            pull_request,
        })
    }

    /// `{server}/{owner}/{repo}/blob/{sha}`
    pub fn blob_base_url(&self) -> String {
        format!("{}/{}/{}/blob/{}", self.server_url, self.owner, self.repo, self.sha)
    }

    /// Link to one line of a file at the commit under test
    pub fn example_url(&self, file_path: &str, line_number: u32) -> String {
        format!("{}/{}#L{}", self.blob_base_url(), file_path, line_number)
    }

    /// Pull request number, required by the comment path
    pub fn require_pull_request(&self) -> Result<u64> {
        self.pull_request.ok_or(ReportError::NotInPullRequestContext)
    }
}

/// Split `owner/repo`
fn parse_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ReportError::MissingContext(format!(
            "GITHUB_REPOSITORY must look like 'owner/repo', got '{}'",
            repository
        ))),
    }
}

fn read_event_number(path: &Path) -> Result<Option<u64>> {
    if !path.exists() {
        debug!("event payload {} does not exist", path.display());
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let payload: serde_json::Value = serde_json::from_str(&content)?;
    Ok(event_number(&payload))
}

/// Issue or pull request number of an event payload
///
/// Checked in order: `issue.number`, `pull_request.number`, `number`.
pub fn event_number(payload: &serde_json::Value) -> Option<u64> {
    payload
        .pointer("/issue/number")
        .or_else(|| payload.pointer("/pull_request/number"))
        .or_else(|| payload.get("number"))
        .and_then(|n| n.as_u64())
}
