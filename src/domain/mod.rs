//! Domain logic - pure rules independent of git and process plumbing

pub mod level;
pub mod outcome;
pub mod remote;
pub mod tag;

pub use level::{level_for, parse_directive, BumpLevel, Directive};
pub use outcome::ExitOutcome;
pub use remote::{ApiToken, RepoSlug};
pub use tag::Tag;
