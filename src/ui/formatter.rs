//! Console rendering for diagnostics.
//!
//! Styling comes from `console`, which drops the escape codes when standard
//! error is not a terminal (the usual case on CI).

use console::style;

use crate::boundary::BoundaryWarning;
use crate::ui::Reporter;

/// Writes diagnostics to standard error.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        ConsoleReporter
    }
}

impl Reporter for ConsoleReporter {
    fn error(&self, message: &str) {
        eprintln!("{}", format_error(message));
    }

    fn warning(&self, warning: &BoundaryWarning) {
        eprintln!("{}", format_warning(warning));
    }
}

/// Format an error line with a red prefix.
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Format a warning line with a yellow prefix.
pub fn format_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}
