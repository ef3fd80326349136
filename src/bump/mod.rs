//! External version-bumping tool
//!
//! The tool rewrites the version in the given files, commits and tags. This
//! crate never does version arithmetic itself; it only decides the level
//! and hands it over.

pub mod executor;

pub use executor::ExternalBumpTool;

use std::cell::RefCell;
use std::path::PathBuf;

use crate::domain::BumpLevel;
use crate::error::{BumpError, Result};

/// Anything that can apply a bump to a set of files.
///
/// A returned error is fatal to the run: the repository may be half
/// modified, so callers must not swallow it.
pub trait BumpTool {
    fn bump(&self, level: BumpLevel, files: &[PathBuf]) -> Result<()>;
}

/// Bump tool that records its calls instead of running anything.
#[derive(Debug, Default)]
pub struct RecordingBumpTool {
    calls: RefCell<Vec<(BumpLevel, Vec<PathBuf>)>>,
    fail: bool,
}

impl RecordingBumpTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// A tool whose every invocation fails
    pub fn failing() -> Self {
        RecordingBumpTool {
            calls: RefCell::new(Vec::new()),
            fail: true,
        }
    }

    pub fn calls(&self) -> Vec<(BumpLevel, Vec<PathBuf>)> {
        self.calls.borrow().clone()
    }

    /// The most recent call, if any
    pub fn last_call(&self) -> Option<(BumpLevel, Vec<PathBuf>)> {
        self.calls.borrow().last().cloned()
    }
}

impl BumpTool for RecordingBumpTool {
    fn bump(&self, level: BumpLevel, files: &[PathBuf]) -> Result<()> {
        self.calls.borrow_mut().push((level, files.to_vec()));

        if self.fail {
            return Err(BumpError::bump_tool("recording tool configured to fail"));
        }
        Ok(())
    }
}
