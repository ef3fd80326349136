use std::cell::{Cell, RefCell};

use crate::domain::{ApiToken, RepoSlug};
use crate::error::Result;
use crate::git::{PushError, Repository};

/// Mock repository for testing without actual git operations
///
/// Returns scripted values and records every call so tests can assert on
/// which collaborators the orchestrator touched.
pub struct MockRepository {
    body: Option<String>,
    tag: Option<String>,
    push_result: std::result::Result<(), PushError>,
    reads: Cell<usize>,
    pushes: RefCell<Vec<(String, RepoSlug)>>,
}

impl MockRepository {
    /// Create a mock with an empty commit body, no tags and a push that
    /// succeeds
    pub fn new() -> Self {
        MockRepository {
            body: Some(String::new()),
            tag: None,
            push_result: Ok(()),
            reads: Cell::new(0),
            pushes: RefCell::new(Vec::new()),
        }
    }

    /// Set the body returned for the last commit
    pub fn with_commit_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Make reading the commit body fail
    pub fn with_unreadable_commit(mut self) -> Self {
        self.body = None;
        self
    }

    /// Set the most recent tag
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Set what the push returns
    pub fn with_push_result(mut self, result: std::result::Result<(), PushError>) -> Self {
        self.push_result = result;
        self
    }

    /// Number of commit-body and tag reads so far
    pub fn read_count(&self) -> usize {
        self.reads.get()
    }

    /// Every push attempted, as `(token, repo)`
    pub fn pushes(&self) -> Vec<(String, RepoSlug)> {
        self.pushes.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn last_commit_message_body(&self) -> Result<String> {
        self.reads.set(self.reads.get() + 1);
        self.body
            .clone()
            .ok_or_else(|| git2::Error::from_str("cannot read HEAD commit").into())
    }

    fn last_tag(&self) -> Result<Option<String>> {
        self.reads.set(self.reads.get() + 1);
        Ok(self.tag.clone())
    }

    fn push_commit_and_tags(
        &self,
        token: &ApiToken,
        repo: &RepoSlug,
    ) -> std::result::Result<(), PushError> {
        self.pushes
            .borrow_mut()
            .push((token.expose().to_string(), repo.clone()));
        self.push_result.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_defaults() {
        let repo = MockRepository::default();
        assert_eq!(repo.last_commit_message_body().unwrap(), "");
        assert_eq!(repo.last_tag().unwrap(), None);
        assert_eq!(repo.read_count(), 2);
    }

    #[test]
    fn test_mock_repository_scripted_values() {
        let repo = MockRepository::new()
            .with_commit_body("T\n\nbumpversion: minor")
            .with_tag("v0.0.1");

        assert_eq!(
            repo.last_commit_message_body().unwrap(),
            "T\n\nbumpversion: minor"
        );
        assert_eq!(repo.last_tag().unwrap(), Some("v0.0.1".to_string()));
    }

    #[test]
    fn test_mock_repository_records_pushes() {
        let repo = MockRepository::new().with_push_result(Err(PushError::Failed(
            "connection reset".to_string(),
        )));
        let slug: RepoSlug = "user/repo".parse().unwrap();

        let result = repo.push_commit_and_tags(&ApiToken::new("token"), &slug);
        assert!(result.is_err());
        assert_eq!(repo.pushes(), vec![("token".to_string(), slug)]);
    }

    #[test]
    fn test_mock_repository_unreadable_commit() {
        let repo = MockRepository::new().with_unreadable_commit();
        assert!(repo.last_commit_message_body().is_err());
    }
}
