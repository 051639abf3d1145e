/// Pull request comment lifecycle over the GitHub REST API
///
/// This module handles:
/// - Listing issue comments (paginated)
/// - Locating the previously posted report by its title marker
/// - Replacing, creating or deleting that comment
///
/// The marker logic lives in free functions over the `CommentApi` trait so
/// it can be exercised without a network.
use crate::context::RunContext;
use crate::error::{ReportError, Result};
use crate::report::CommentAction;
use log::{debug, info};
use std::time::Duration;

const USER_AGENT: &str = concat!("rspec-report/", env!("CARGO_PKG_VERSION"));
const PER_PAGE: usize = 100;
const MAX_ERROR_BODY: usize = 800;

/// An issue comment as returned by the API
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct IssueComment {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
}

/// Raw comment operations on one pull request
pub trait CommentApi {
    /// One page (1-based) of comments, oldest first
    fn list_comments(&self, page: usize) -> Result<Vec<IssueComment>>;
    fn create_comment(&self, body: &str) -> Result<IssueComment>;
    fn update_comment(&self, id: u64, body: &str) -> Result<IssueComment>;
    fn delete_comment(&self, id: u64) -> Result<()>;
}

/// Result of applying a comment action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentOutcome {
    Created(u64),
    Updated(u64),
    Deleted(u64),
    NothingToDelete,
}

impl CommentOutcome {
    pub fn describe(&self) -> String {
        match self {
            CommentOutcome::Created(id) => format!("created comment {}", id),
            CommentOutcome::Updated(id) => format!("updated comment {}", id),
            CommentOutcome::Deleted(id) => format!("deleted comment {}", id),
            CommentOutcome::NothingToDelete => "no previous comment to delete".to_string(),
        }
    }
}

/// Whether `body` belongs to the report titled `marker`.
///
/// A leading markdown heading marker is ignored so that `# Title :x:`
/// matches the marker `Title`.
pub fn matches_marker(body: &str, marker: &str) -> bool {
    let trimmed = body.trim_start();
    let without_heading = trimmed.trim_start_matches('#').trim_start();
    trimmed.starts_with(marker) || without_heading.starts_with(marker)
}

/// Walk all comment pages and return the first one carrying `marker`
pub fn find_marked_comment(api: &impl CommentApi, marker: &str) -> Result<Option<IssueComment>> {
    let mut page = 1;
    loop {
        let comments = api.list_comments(page)?;
        let page_len = comments.len();
        debug!("comment page {} has {} comments", page, page_len);

        if let Some(found) =
            comments.into_iter().find(|c| c.body.as_deref().is_some_and(|b| matches_marker(b, marker)))
        {
            debug!("found marked comment {}", found.id);
            return Ok(Some(found));
        }

        if page_len < PER_PAGE {
            return Ok(None);
        }
        page += 1;
    }
}

/// Replace the marked comment, or create it when absent
pub fn upsert_comment(api: &impl CommentApi, marker: &str, body: &str) -> Result<CommentOutcome> {
    match find_marked_comment(api, marker)? {
        Some(existing) => {
            let updated = api.update_comment(existing.id, body)?;
            Ok(CommentOutcome::Updated(updated.id))
        }
        None => {
            let created = api.create_comment(body)?;
            Ok(CommentOutcome::Created(created.id))
        }
    }
}

/// Delete the marked comment; a missing comment is not an error
pub fn delete_marked_comment(api: &impl CommentApi, marker: &str) -> Result<CommentOutcome> {
    match find_marked_comment(api, marker)? {
        Some(existing) => {
            api.delete_comment(existing.id)?;
            Ok(CommentOutcome::Deleted(existing.id))
        }
        None => Ok(CommentOutcome::NothingToDelete),
    }
}

/// Execute a comment action built by the report module
pub fn apply_action(api: &impl CommentApi, action: &CommentAction) -> Result<CommentOutcome> {
    let outcome = match action {
        CommentAction::Upsert { marker, body } => upsert_comment(api, marker, body)?,
        CommentAction::Delete { marker } => delete_marked_comment(api, marker)?,
    };
    info!("{} for marker '{}'", outcome.describe(), action.marker());
    Ok(outcome)
}

/// `CommentApi` backed by api.github.com (or a GHES API URL)
pub struct GithubCommentClient {
    agent: ureq::Agent,
    api_url: String,
    owner: String,
    repo: String,
    issue_number: u64,
    token: String,
}

impl GithubCommentClient {
    /// Client for the pull request of `ctx`; fails outside a pull request
    pub fn new(ctx: &RunContext, token: &str) -> Result<Self> {
        let issue_number = ctx.require_pull_request()?;
        let agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).timeout(Duration::from_secs(30)).build();

        Ok(Self {
            agent,
            api_url: ctx.api_url.clone(),
            owner: ctx.owner.clone(),
            repo: ctx.repo.clone(),
            issue_number,
            token: token.trim().to_string(),
        })
    }

    fn issue_comments_url(&self) -> String {
        format!("{}/repos/{}/{}/issues/{}/comments", self.api_url, self.owner, self.repo, self.issue_number)
    }

    fn comment_url(&self, id: u64) -> String {
        format!("{}/repos/{}/{}/issues/comments/{}", self.api_url, self.owner, self.repo, id)
    }

    fn authorized(&self, request: ureq::Request) -> ureq::Request {
        request
            .set("Authorization", &format!("Bearer {}", self.token))
            .set("Accept", "application/vnd.github+json")
            .set("X-GitHub-Api-Version", "2022-11-28")
    }

    fn send(&self, operation: &str, request: ureq::Request, body: Option<&str>) -> Result<ureq::Response> {
        debug!("github {}: {} {}", operation, request.method(), request.url());
        let request = self.authorized(request);

        let response = match body {
            Some(body) => {
                let payload = serde_json::json!({ "body": body }).to_string();
                request.set("Content-Type", "application/json").send_string(&payload)
            }
            None => request.call(),
        };

        match response {
            Ok(response) => Ok(response),
            Err(ureq::Error::Status(status, response)) => {
                let text = response.into_string().unwrap_or_default();
                Err(ReportError::publish(operation, Some(status), truncate_for_error(&text, MAX_ERROR_BODY)))
            }
            Err(ureq::Error::Transport(transport)) => Err(ReportError::publish(operation, None, transport.to_string())),
        }
    }

    fn send_json<T: serde::de::DeserializeOwned>(
        &self,
        operation: &str,
        request: ureq::Request,
        body: Option<&str>,
    ) -> Result<T> {
        let response = self.send(operation, request, body)?;
        Ok(serde_json::from_reader(response.into_reader())?)
    }
}

impl CommentApi for GithubCommentClient {
    fn list_comments(&self, page: usize) -> Result<Vec<IssueComment>> {
        let request = self
            .agent
            .get(&self.issue_comments_url())
            .query("per_page", &PER_PAGE.to_string())
            .query("page", &page.to_string());
        self.send_json("list comments", request, None)
    }

    fn create_comment(&self, body: &str) -> Result<IssueComment> {
        self.send_json("create comment", self.agent.post(&self.issue_comments_url()), Some(body))
    }

    fn update_comment(&self, id: u64, body: &str) -> Result<IssueComment> {
        self.send_json("update comment", self.agent.request("PATCH", &self.comment_url(id)), Some(body))
    }

    fn delete_comment(&self, id: u64) -> Result<()> {
        match self.send("delete comment", self.agent.delete(&self.comment_url(id)), None) {
            Ok(_) => Ok(()),
            // already gone
            Err(ReportError::Publish { status: Some(404), .. }) => {
                debug!("comment {} was already deleted", id);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

fn truncate_for_error(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max_chars).collect();
    out.push_str("...");
    out
}

#[cfg(test)]
#[path = "github_test.rs"]
mod github_test;
