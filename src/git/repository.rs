use crate::config::Config;
use crate::domain::{ApiToken, RepoSlug};
use crate::error::Result;
use crate::git::PushError;
use git2::{DescribeFormatOptions, DescribeOptions, Repository as Git2Repo};
use std::cell::OnceCell;
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository with our trait interface
///
/// The repository is discovered on first use, so runs that stop before
/// touching git never require one.
pub struct Git2Repository {
    path: PathBuf,
    repo: OnceCell<Git2Repo>,
    branch: String,
    remote_host: String,
    fetch_tags: bool,
}

impl Git2Repository {
    /// Discover the repository containing `path` lazily
    pub fn discover<P: AsRef<Path>>(path: P) -> Self {
        let defaults = Config::default();
        Git2Repository {
            path: path.as_ref().to_path_buf(),
            repo: OnceCell::new(),
            branch: defaults.branch,
            remote_host: defaults.remote_host,
            fetch_tags: defaults.fetch_tags,
        }
    }

    /// Open or discover a git repository now
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repository = Self::discover(path);
        repository.repo()?;

        Ok(repository)
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        let path = repo.path().to_path_buf();
        let repository = Self::discover(path);
        let _ = repository.repo.set(repo);
        repository
    }

    fn repo(&self) -> Result<&Git2Repo> {
        if let Some(repo) = self.repo.get() {
            return Ok(repo);
        }

        let repo = Git2Repo::discover(&self.path)?;
        tracing::debug!(path = %repo.path().display(), "opened repository");
        Ok(self.repo.get_or_init(|| repo))
    }

    /// Apply branch, host and tag-fetch settings from the tool configuration
    pub fn configure(mut self, config: &Config) -> Self {
        self.branch = config.branch.clone();
        self.remote_host = config.remote_host.clone();
        self.fetch_tags = config.fetch_tags;
        self
    }

    fn fetch_remote_tags(&self) {
        let result = self.repo().and_then(|repo| {
            repo.find_remote("origin")
                .and_then(|mut remote| remote.fetch(&["+refs/tags/*:refs/tags/*"], None, None))
                .map_err(Into::into)
        });

        // Local tags are still usable, so a failed fetch is not fatal
        if let Err(e) = result {
            tracing::warn!(error = %e, "could not fetch tags from origin, using local tags");
        }
    }

    /// Refspecs for the configured branch plus every local tag.
    fn push_refspecs(&self) -> Result<Vec<String>> {
        let mut refspecs = vec![format!("refs/heads/{0}:refs/heads/{0}", self.branch)];

        let tags = self.repo()?.tag_names(None)?;
        refspecs.extend(
            tags.iter()
                .flatten()
                .map(|tag| format!("refs/tags/{0}:refs/tags/{0}", tag)),
        );

        Ok(refspecs)
    }

    /// Push to an explicit URL. The token only ever reaches git through the
    /// credentials callback.
    pub fn push_to_url(&self, url: &str, token: &ApiToken) -> std::result::Result<(), PushError> {
        let refspecs = self
            .push_refspecs()
            .map_err(|e| PushError::Failed(e.to_string()))?;
        let refspec_strs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();

        let mut remote = self
            .repo()
            .map_err(|e| PushError::Failed(e.to_string()))?
            .remote_anonymous(url)
            .map_err(|e| PushError::Failed(format!("Cannot create remote: {}", e)))?;

        tracing::debug!(url, refspecs = refspec_strs.len(), "pushing");

        let mut rejected: Option<(String, String)> = None;
        let mut offered_credentials = false;
        let result = {
            let mut callbacks = git2::RemoteCallbacks::new();

            // libgit2 asks again after a rejected credential; only offer it once
            callbacks.credentials(|_url, _username_from_url, _allowed_types| {
                if offered_credentials {
                    return Err(git2::Error::from_str("authentication with API token failed"));
                }
                offered_credentials = true;
                git2::Cred::userpass_plaintext(token.expose(), "x-oauth-basic")
            });

            callbacks.push_update_reference(|refname, status| {
                if let Some(status) = status {
                    rejected.get_or_insert_with(|| (refname.to_string(), status.to_string()));
                }
                Ok(())
            });

            let mut push_options = git2::PushOptions::new();
            push_options.remote_callbacks(callbacks);

            remote.push(&refspec_strs, Some(&mut push_options))
        };

        match result {
            Ok(()) => match rejected {
                Some((refname, reason)) => Err(PushError::Rejected { refname, reason }),
                None => Ok(()),
            },
            // Local failures such as a missing source ref are not a race
            Err(e) if e.code() == git2::ErrorCode::NotFastForward => {
                Err(PushError::Rejected {
                    refname: format!("refs/heads/{}", self.branch),
                    reason: e.message().to_string(),
                })
            }
            Err(e) => Err(PushError::Failed(e.message().to_string())),
        }
    }
}

impl super::Repository for Git2Repository {
    fn last_commit_message_body(&self) -> Result<String> {
        let commit = self.repo()?.head()?.peel_to_commit()?;

        let body = commit.body_bytes().unwrap_or_default();
        Ok(String::from_utf8_lossy(body).trim().to_string())
    }

    fn last_tag(&self) -> Result<Option<String>> {
        if self.fetch_tags {
            self.fetch_remote_tags();
        }

        let repo = self.repo()?;
        if repo.tag_names(None)?.is_empty() {
            return Ok(None);
        }

        let describe = match repo.describe(DescribeOptions::new().describe_tags()) {
            Ok(describe) => describe,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let tag = describe.format(Some(&DescribeFormatOptions::new()))?;
        Ok(Some(tag.trim().to_string()))
    }

    fn push_commit_and_tags(
        &self,
        token: &ApiToken,
        repo: &RepoSlug,
    ) -> std::result::Result<(), PushError> {
        self.push_to_url(&repo.https_url(&self.remote_host), token)
    }
}
