use thiserror::Error;

/// Unified error type for travis-bump-version operations
#[derive(Error, Debug)]
pub enum BumpError {
    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bump tool failed: {0}")]
    BumpTool(String),
}

/// Convenience type alias for Results in travis-bump-version
pub type Result<T> = std::result::Result<T, BumpError>;

impl BumpError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        BumpError::Config(msg.into())
    }

    /// Create a bump tool error with context
    pub fn bump_tool(msg: impl Into<String>) -> Self {
        BumpError::BumpTool(msg.into())
    }
}
