/// Tests for the comment lifecycle
///
/// An in-memory `CommentApi` stands in for GitHub so the marker lookup,
/// pagination and upsert/delete decisions run unchanged.
#[cfg(test)]
mod tests {
    use crate::context::RunContext;
    use crate::error::{ReportError, Result};
    use crate::github::*;
    use crate::report::CommentAction;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakePullRequest {
        comments: RefCell<Vec<IssueComment>>,
        next_id: RefCell<u64>,
        pages_listed: RefCell<usize>,
        reject_writes: bool,
    }

    impl FakePullRequest {
        fn with_bodies(bodies: &[&str]) -> Self {
            let fake = FakePullRequest::default();
            for body in bodies {
                fake.push(body);
            }
            fake
        }

        fn push(&self, body: &str) -> IssueComment {
            let mut next_id = self.next_id.borrow_mut();
            *next_id += 1;
            let comment = IssueComment { id: *next_id, body: Some(body.to_string()) };
            self.comments.borrow_mut().push(comment.clone());
            comment
        }

        fn bodies(&self) -> Vec<String> {
            self.comments.borrow().iter().filter_map(|c| c.body.clone()).collect()
        }
    }

    impl CommentApi for FakePullRequest {
        fn list_comments(&self, page: usize) -> Result<Vec<IssueComment>> {
            *self.pages_listed.borrow_mut() += 1;
            Ok(self.comments.borrow().iter().skip((page - 1) * 100).take(100).cloned().collect())
        }

        fn create_comment(&self, body: &str) -> Result<IssueComment> {
            if self.reject_writes {
                return Err(ReportError::publish("create comment", Some(403), "Resource not accessible by integration"));
            }
            Ok(self.push(body))
        }

        fn update_comment(&self, id: u64, body: &str) -> Result<IssueComment> {
            if self.reject_writes {
                return Err(ReportError::publish("update comment", Some(403), "Resource not accessible by integration"));
            }
            let mut comments = self.comments.borrow_mut();
            let comment = comments.iter_mut().find(|c| c.id == id).expect("comment exists");
            comment.body = Some(body.to_string());
            Ok(comment.clone())
        }

        fn delete_comment(&self, id: u64) -> Result<()> {
            self.comments.borrow_mut().retain(|c| c.id != id);
            Ok(())
        }
    }

    fn upsert(body: &str) -> CommentAction {
        CommentAction::Upsert { marker: "RSpec Report".to_string(), body: body.to_string() }
    }

    fn delete() -> CommentAction {
        CommentAction::Delete { marker: "RSpec Report".to_string() }
    }

    #[test]
    fn test_matches_marker_with_heading() {
        assert!(matches_marker("# RSpec Report :x:\n<details>", "RSpec Report"));
        assert!(matches_marker("RSpec Report", "RSpec Report"));
        assert!(matches_marker("  ## RSpec Report", "RSpec Report"));
        assert!(!matches_marker("LGTM! RSpec Report looks fine", "RSpec Report"));
        assert!(!matches_marker("# Coverage Report", "RSpec Report"));
    }

    #[test]
    fn test_upsert_creates_when_missing() {
        let pr = FakePullRequest::with_bodies(&["LGTM"]);
        let outcome = apply_action(&pr, &upsert("# RSpec Report :x:\nfirst")).unwrap();

        assert_eq!(outcome, CommentOutcome::Created(2));
        assert_eq!(pr.bodies(), vec!["LGTM", "# RSpec Report :x:\nfirst"]);
    }

    #[test]
    fn test_upsert_twice_replaces_instead_of_duplicating() {
        let pr = FakePullRequest::default();
        apply_action(&pr, &upsert("# RSpec Report :x:\nrun 1")).unwrap();
        let outcome = apply_action(&pr, &upsert("# RSpec Report :x:\nrun 1")).unwrap();

        assert_eq!(outcome, CommentOutcome::Updated(1));
        assert_eq!(pr.bodies().len(), 1);
    }

    #[test]
    fn test_upsert_updates_first_match_only() {
        let pr = FakePullRequest::with_bodies(&["# RSpec Report :x:\nold", "# RSpec Report :x:\nolder"]);
        apply_action(&pr, &upsert("# RSpec Report :x:\nnew")).unwrap();

        assert_eq!(pr.bodies(), vec!["# RSpec Report :x:\nnew", "# RSpec Report :x:\nolder"]);
    }

    #[test]
    fn test_delete_removes_marked_comment() {
        let pr = FakePullRequest::with_bodies(&["LGTM", "# RSpec Report :x:\nold"]);
        let outcome = apply_action(&pr, &delete()).unwrap();

        assert_eq!(outcome, CommentOutcome::Deleted(2));
        assert_eq!(pr.bodies(), vec!["LGTM"]);
    }

    #[test]
    fn test_delete_without_match_is_success() {
        let pr = FakePullRequest::with_bodies(&["LGTM"]);
        assert_eq!(apply_action(&pr, &delete()).unwrap(), CommentOutcome::NothingToDelete);
        assert_eq!(pr.bodies(), vec!["LGTM"]);
    }

    #[test]
    fn test_lookup_walks_all_pages() {
        let pr = FakePullRequest::default();
        for i in 0..150 {
            pr.push(&format!("comment {}", i));
        }
        pr.push("# RSpec Report :x:\nlate");

        let found = find_marked_comment(&pr, "RSpec Report").unwrap().unwrap();
        assert_eq!(found.id, 151);
        assert_eq!(*pr.pages_listed.borrow(), 2);
    }

    #[test]
    fn test_lookup_stops_on_exact_full_page() {
        let pr = FakePullRequest::default();
        for i in 0..100 {
            pr.push(&format!("comment {}", i));
        }

        assert!(find_marked_comment(&pr, "RSpec Report").unwrap().is_none());
        // full first page, empty second page
        assert_eq!(*pr.pages_listed.borrow(), 2);
    }

    #[test]
    fn test_publish_failure_propagates() {
        let pr = FakePullRequest { reject_writes: true, ..Default::default() };
        let err = apply_action(&pr, &upsert("# RSpec Report :x:")).unwrap_err();
        assert!(matches!(err, ReportError::Publish { status: Some(403), .. }));
    }

    #[test]
    fn test_client_requires_pull_request() {
        let ctx = RunContext {
            server_url: "https://github.com".to_string(),
            api_url: "https://api.github.com".to_string(),
            owner: "acme".to_string(),
            repo: "app".to_string(),
            sha: "abc123".to_string(),
            pull_request: None,
        };
        assert!(matches!(GithubCommentClient::new(&ctx, "token"), Err(ReportError::NotInPullRequestContext)));
    }

    #[test]
    fn test_outcome_descriptions() {
        assert_eq!(CommentOutcome::Updated(4).describe(), "updated comment 4");
        assert_eq!(CommentOutcome::NothingToDelete.describe(), "no previous comment to delete");
    }
}
