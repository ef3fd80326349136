//! Diagnostic sinks
//!
//! Everything the orchestrator wants the operator to see goes through a
//! [Reporter]. The binary uses [ConsoleReporter], tests use [MemoryReporter]
//! and assert on what was captured.

pub mod formatter;

pub use formatter::ConsoleReporter;

use crate::boundary::BoundaryWarning;
use std::cell::RefCell;

/// Receives user-facing diagnostics.
pub trait Reporter {
    /// A condition that stops the run.
    fn error(&self, message: &str);

    /// A condition the run recovers from.
    fn warning(&self, warning: &BoundaryWarning);
}

/// Reporter that keeps every diagnostic in memory, in emission order.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    lines: RefCell<Vec<String>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All captured diagnostics, one per line.
    pub fn output(&self) -> String {
        self.lines.borrow().join("\n")
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }
}

impl Reporter for MemoryReporter {
    fn error(&self, message: &str) {
        self.lines.borrow_mut().push(message.to_string());
    }

    fn warning(&self, warning: &BoundaryWarning) {
        self.lines.borrow_mut().push(warning.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_reporter_keeps_order() {
        let reporter = MemoryReporter::new();
        assert!(reporter.is_empty());

        reporter.error("first");
        reporter.warning(&BoundaryWarning::PushRace);

        let lines = reporter.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "first");
        assert!(lines[1].contains("Failed to push"));
        assert!(reporter.output().starts_with("first\n"));
    }
}
