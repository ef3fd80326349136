use std::fmt;

/// Non-fatal conditions hit while bumping. They are reported to the user
/// but never stop the run.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// The last commit line carried `bumpversion:` with an unknown level
    InvalidBumpCode { code: String },
    /// The push was refused or failed; another job probably pushed first
    PushRace,
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::InvalidBumpCode { code } => {
                write!(
                    f,
                    "bumpversion: Invalid code {} given, expected major, minor or patch. Assuming patch",
                    code
                )
            }
            BoundaryWarning::PushRace => {
                write!(
                    f,
                    "bumpversion: Failed to push commit, assuming that another job was able to push it first."
                )
            }
        }
    }
}
