//! Main workflow orchestration logic
//!
//! Sequences the safety check, tag validation, level extraction, bump and
//! push. Kept apart from argument parsing so the whole decision procedure
//! runs against injected collaborators in tests.

use std::path::PathBuf;

use crate::bump::BumpTool;
use crate::ci;
use crate::config::Config;
use crate::domain::{level_for, ApiToken, ExitOutcome, RepoSlug, Tag};
use crate::error::Result;
use crate::git::Repository;
use crate::push::{self, PushOutcome, PushPolicy};
use crate::ui::Reporter;

/// Arguments for the bump workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Credential for the push
    pub api_token: ApiToken,

    /// Repository to push to
    pub repo: RepoSlug,

    /// Files the bump tool rewrites
    pub files: Vec<PathBuf>,
}

/// Everything the workflow talks to
pub struct BumpWorkflow<'a> {
    config: &'a Config,
    repository: &'a dyn Repository,
    bump_tool: &'a dyn BumpTool,
    reporter: &'a dyn Reporter,
}

impl<'a> BumpWorkflow<'a> {
    pub fn new(
        config: &'a Config,
        repository: &'a dyn Repository,
        bump_tool: &'a dyn BumpTool,
        reporter: &'a dyn Reporter,
    ) -> Self {
        BumpWorkflow {
            config,
            repository,
            bump_tool,
            reporter,
        }
    }

    /// Main bump workflow
    ///
    /// 1. Require at least one file
    /// 2. Check the CI configuration cannot loop on tag pushes
    /// 3. Require the last tag to be a release tag
    /// 4. Read the bump level from the last commit
    /// 5. Run the bump tool
    /// 6. Push, tolerating a lost race
    ///
    /// Precondition failures come back as [ExitOutcome::RecoverableStop]
    /// after a diagnostic. A failing bump tool or an unreadable repository
    /// is returned as `Err` and must end the process.
    pub fn run(&self, args: &BumpWorkflowArgs) -> Result<ExitOutcome> {
        if args.files.is_empty() {
            self.reporter.error("Need to specify some files");
            return Ok(ExitOutcome::RecoverableStop);
        }

        let ci_config = ci::load_ci_config(&self.config.ci_config);
        if !ci::check(&ci_config, self.reporter) {
            return Ok(ExitOutcome::RecoverableStop);
        }

        let last_tag = self.repository.last_tag()?;
        tracing::debug!(?last_tag, "last tag");
        let releasable = last_tag
            .map(|name| Tag::new(name).is_releasable())
            .unwrap_or(false);
        if !releasable {
            self.reporter
                .error("Release a tag that matches vx.x.x to get automatic version bumps");
            return Ok(ExitOutcome::RecoverableStop);
        }

        let body = self.repository.last_commit_message_body()?;
        let level = level_for(&body, self.reporter);
        tracing::info!(%level, "bump level decided");

        self.bump_tool.bump(level, &args.files)?;

        let policy = PushPolicy::from(&self.config.push);
        let outcome = push::push(
            self.repository,
            &args.api_token,
            &args.repo,
            policy,
            self.reporter,
        );

        match (outcome, policy) {
            (PushOutcome::Failed(_), PushPolicy::TolerateRaceOnly) => {
                Ok(ExitOutcome::RecoverableStop)
            }
            _ => Ok(ExitOutcome::Success),
        }
    }
}
