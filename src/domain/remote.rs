use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Credential used to push to the remote.
///
/// Deliberately has no `Display`; `Debug` never shows the value.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    pub fn new(token: impl Into<String>) -> Self {
        ApiToken(token.into())
    }

    /// Raw token, for handing to the credentials callback only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiToken(<redacted>)")
    }
}

const SLUG_PATTERN: &str = r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$";

#[derive(Debug, Error, PartialEq)]
#[error("invalid repository '{0}', expected owner/name")]
pub struct InvalidRepoSlug(String);

/// Repository identifier on the hosting service, `owner/name`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub name: String,
}

impl RepoSlug {
    /// HTTPS remote URL on `host`. Carries no credentials.
    pub fn https_url(&self, host: &str) -> String {
        format!("https://{}/{}/{}.git", host, self.owner, self.name)
    }
}

impl FromStr for RepoSlug {
    type Err = InvalidRepoSlug;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let re = regex::Regex::new(SLUG_PATTERN).map_err(|_| InvalidRepoSlug(s.to_string()))?;
        if !re.is_match(s) {
            return Err(InvalidRepoSlug(s.to_string()));
        }

        match s.split_once('/') {
            Some((owner, name)) => Ok(RepoSlug {
                owner: owner.to_string(),
                name: name.to_string(),
            }),
            None => Err(InvalidRepoSlug(s.to_string())),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
