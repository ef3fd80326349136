/// Prefix every release tag carries (`vX.Y.Z`)
pub const RELEASE_TAG_PREFIX: char = 'v';

/// Represents a git tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
}

impl Tag {
    /// Create a new tag from a string
    pub fn new(name: impl Into<String>) -> Self {
        Tag { name: name.into() }
    }

    /// Whether the tag follows the release convention and may be bumped
    /// automatically. No normalisation is attempted.
    pub fn is_releasable(&self) -> bool {
        self.name.starts_with(RELEASE_TAG_PREFIX)
    }
}
