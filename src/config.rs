use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BumpError, Result};

/// Name of the configuration file looked up in the working directory and
/// the user config directory.
pub const CONFIG_FILE_NAME: &str = "travisbump.toml";

/// Represents the complete configuration for travis-bump-version.
///
/// Every key is optional; a missing file means all defaults.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// CI configuration checked for the loop-prevention exclusion
    #[serde(default = "default_ci_config")]
    pub ci_config: PathBuf,

    /// Branch pushed alongside the tags
    #[serde(default = "default_branch")]
    pub branch: String,

    /// Hosting service the `owner/name` repository lives on
    #[serde(default = "default_remote_host")]
    pub remote_host: String,

    /// Fetch tags from `origin` before describing the last tag
    #[serde(default)]
    pub fetch_tags: bool,

    #[serde(default)]
    pub bump: BumpToolConfig,

    #[serde(default)]
    pub commit: CommitIdentity,

    #[serde(default)]
    pub push: PushConfig,
}

fn default_ci_config() -> PathBuf {
    PathBuf::from(".travis.yml")
}

fn default_branch() -> String {
    "master".to_string()
}

fn default_remote_host() -> String {
    "github.com".to_string()
}

fn default_bump_program() -> String {
    "bumpversion".to_string()
}

/// How the external bump tool is invoked.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BumpToolConfig {
    #[serde(default = "default_bump_program")]
    pub program: String,

    /// Commit message template handed to the tool as `--message`
    #[serde(default)]
    pub message: Option<String>,
}

impl Default for BumpToolConfig {
    fn default() -> Self {
        BumpToolConfig {
            program: default_bump_program(),
            message: None,
        }
    }
}

/// Identity recorded on the bump commit. Unset fields fall back to
/// whatever git would use.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct CommitIdentity {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub email: Option<String>,
}

impl CommitIdentity {
    /// Environment variables git reads for author and committer
    pub fn to_env_vars(&self) -> Vec<(&'static str, String)> {
        let mut env = Vec::new();

        if let Some(name) = &self.name {
            env.push(("GIT_AUTHOR_NAME", name.clone()));
            env.push(("GIT_COMMITTER_NAME", name.clone()));
        }

        if let Some(email) = &self.email {
            env.push(("GIT_AUTHOR_EMAIL", email.clone()));
            env.push(("GIT_COMMITTER_EMAIL", email.clone()));
        }

        env
    }
}

/// Push failure policy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct PushConfig {
    /// Stop with a failure when the push fails for a reason other than a
    /// rejected reference update. Off by default: every push failure is
    /// then treated as a lost race.
    #[serde(default)]
    pub fail_on_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            ci_config: default_ci_config(),
            branch: default_branch(),
            remote_host: default_remote_host(),
            fetch_tags: false,
            bump: BumpToolConfig::default(),
            commit: CommitIdentity::default(),
            push: PushConfig::default(),
        }
    }
}

/// Parse configuration from TOML text.
pub fn parse_config(contents: &str) -> Result<Config> {
    toml::from_str(contents).map_err(|e| BumpError::config(e.to_string()))
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `travisbump.toml` in current directory
/// 3. `travisbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => match discover_config() {
            Some(path) => path,
            None => {
                tracing::debug!("no configuration file found, using defaults");
                return Ok(Config::default());
            }
        },
    };

    tracing::debug!(path = %path.display(), "loading configuration");
    let contents = fs::read_to_string(&path).map_err(|e| {
        BumpError::config(format!("cannot read {}: {}", path.display(), e))
    })?;

    parse_config(&contents)
}

fn discover_config() -> Option<PathBuf> {
    let local = Path::new(".").join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join(CONFIG_FILE_NAME);
    if user.exists() {
        Some(user)
    } else {
        None
    }
}
