//! CI configuration safety check
//!
//! Pushing a version tag must not start another CI build, or that build
//! would bump again and push again forever. The CI configuration therefore
//! has to exclude version tags under `branches.except` before anything is
//! pushed.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

use crate::ui::Reporter;

/// Branch exclusion that keeps tag pushes from triggering builds
pub const LOOP_PREVENTION_PATTERN: &str = "/^v[0-9].*/";

/// Why the CI configuration could not be loaded
#[derive(Debug, Error)]
pub enum CiConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// A parsed CI configuration and where it came from
#[derive(Debug, Clone)]
pub struct CiConfig {
    pub path: PathBuf,
    pub root: Value,
}

/// Read and parse the CI configuration into a generic YAML tree.
pub fn load_ci_config(path: &Path) -> Result<CiConfig, CiConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| CiConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;

    let root = serde_yaml::from_str(&contents).map_err(|source| CiConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(CiConfig {
        path: path.to_path_buf(),
        root,
    })
}

/// The string entries of `branches.except`, if that path holds a sequence.
pub fn except_specifiers(config: &Value) -> Option<Vec<&str>> {
    let except = config.get("branches")?.get("except")?.as_sequence()?;
    Some(except.iter().filter_map(Value::as_str).collect())
}

/// Whether the configuration excludes version tags from builds.
pub fn is_loop_safe(config: &Value) -> bool {
    except_specifiers(config)
        .map(|specifiers| specifiers.contains(&LOOP_PREVENTION_PATTERN))
        .unwrap_or(false)
}

/// Run the safety check on a loaded (or failed-to-load) configuration.
///
/// Emits a diagnostic and returns `false` on any failure. Never errors.
pub fn check(loaded: &Result<CiConfig, CiConfigError>, reporter: &dyn Reporter) -> bool {
    let config = match loaded {
        Ok(config) => config,
        Err(err) => {
            tracing::debug!(error = %err, "CI configuration not usable");
            let message = match err {
                CiConfigError::Unreadable { path, .. } => format!(
                    "bumpversion: Need to be able to read /{} to determine if safe to do automatic version bumps.",
                    display_name(path)
                ),
                CiConfigError::Malformed { path, .. } => except_specifier_message(path),
            };
            reporter.error(&message);
            return false;
        }
    };

    if !is_loop_safe(&config.root) {
        reporter.error(&except_specifier_message(&config.path));
        return false;
    }

    true
}

fn except_specifier_message(path: &Path) -> String {
    format!(
        "bumpversion: Need to have branches: except: - {} in /{}, otherwise it is not safe to push new tags without a build-loop.",
        LOOP_PREVENTION_PATTERN,
        display_name(path)
    )
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
