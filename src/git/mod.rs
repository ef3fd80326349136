//! Source-control collaborator
//!
//! The orchestrator only needs three things from git: the body of the last
//! commit, the most recent tag, and a way to push the bump commit and tags
//! back. The [Repository] trait captures exactly that.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A scripted implementation for testing

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use thiserror::Error;

use crate::domain::{ApiToken, RepoSlug};
use crate::error::Result;

/// Why a push did not go through
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PushError {
    /// The remote refused a reference update, typically because another
    /// job pushed the same commit or tag first
    #[error("remote rejected {refname}: {reason}")]
    Rejected { refname: String, reason: String },

    /// Anything else: network, authentication, missing remote
    #[error("push failed: {0}")]
    Failed(String),
}

/// Git operations the bump workflow depends on.
pub trait Repository {
    /// Body of the HEAD commit, without the summary line, trimmed.
    ///
    /// An empty string when the commit has no body.
    fn last_commit_message_body(&self) -> Result<String>;

    /// Most recent tag reachable from HEAD, as `git describe --tags` prints
    /// it. `None` when the repository has no tags at all.
    fn last_tag(&self) -> Result<Option<String>>;

    /// Push the configured branch and all tags to `repo`, authenticating
    /// with `token`.
    fn push_commit_and_tags(
        &self,
        token: &ApiToken,
        repo: &RepoSlug,
    ) -> std::result::Result<(), PushError>;
}
