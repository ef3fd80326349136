use std::process::ExitCode;

/// Externally visible result of a bump run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Bumped (whether or not the push won the race)
    Success,
    /// A precondition failed; a diagnostic was emitted
    RecoverableStop,
    /// Required command line input was missing or malformed
    UsageError,
}

impl ExitOutcome {
    pub fn code(self) -> u8 {
        match self {
            ExitOutcome::Success => 0,
            ExitOutcome::RecoverableStop => 1,
            ExitOutcome::UsageError => 2,
        }
    }
}

impl From<ExitOutcome> for ExitCode {
    fn from(outcome: ExitOutcome) -> Self {
        ExitCode::from(outcome.code())
    }
}
