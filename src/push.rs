//! Push-race handling
//!
//! Several CI jobs for the same commit (matrix legs, say) may all bump and
//! push. Only the first push wins; the rest are rejected. A rejected push is
//! therefore an expected outcome and not a build failure.

use crate::boundary::BoundaryWarning;
use crate::config::PushConfig;
use crate::domain::{ApiToken, RepoSlug};
use crate::git::{PushError, Repository};
use crate::ui::Reporter;

/// What happened to the push
#[derive(Debug, Clone, PartialEq)]
pub enum PushOutcome {
    Pushed,
    /// The remote refused an update; another job got there first
    LostRace,
    /// The push failed for some other reason (network, auth, ...)
    Failed(String),
}

/// How to treat push failures that are not a rejected update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PushPolicy {
    /// Every failure is reported as a lost race
    #[default]
    TolerateAll,
    /// Only rejected updates are tolerated
    TolerateRaceOnly,
}

impl From<&PushConfig> for PushPolicy {
    fn from(config: &PushConfig) -> Self {
        if config.fail_on_error {
            PushPolicy::TolerateRaceOnly
        } else {
            PushPolicy::TolerateAll
        }
    }
}

/// Push the bump commit and tags. Never propagates a failure; the caller
/// decides from the outcome.
pub fn push(
    repository: &dyn Repository,
    token: &ApiToken,
    repo: &RepoSlug,
    policy: PushPolicy,
    reporter: &dyn Reporter,
) -> PushOutcome {
    tracing::info!(%repo, "pushing bump commit and tags");

    match repository.push_commit_and_tags(token, repo) {
        Ok(()) => {
            tracing::info!(%repo, "push succeeded");
            PushOutcome::Pushed
        }
        Err(PushError::Rejected { refname, reason }) => {
            tracing::info!(refname = %refname, reason = %reason, "push rejected");
            reporter.warning(&BoundaryWarning::PushRace);
            PushOutcome::LostRace
        }
        Err(PushError::Failed(reason)) => {
            tracing::warn!(reason = %reason, "push failed");
            match policy {
                PushPolicy::TolerateAll => reporter.warning(&BoundaryWarning::PushRace),
                PushPolicy::TolerateRaceOnly => {
                    reporter.error(&format!("bumpversion: Failed to push commit: {}", reason))
                }
            }
            PushOutcome::Failed(reason)
        }
    }
}
