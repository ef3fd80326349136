use std::fmt;
use std::str::FromStr;

use crate::boundary::BoundaryWarning;
use crate::ui::Reporter;

/// Marker token that introduces a bump directive on the last commit line.
pub const DIRECTIVE_MARKER: &str = "bumpversion:";

/// Which semantic version component the bump tool should increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BumpLevel {
    Major,
    Minor,
    #[default]
    Patch,
}

impl BumpLevel {
    /// The argument the bump tool expects for this level
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpLevel::Major => "major",
            BumpLevel::Minor => "minor",
            BumpLevel::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(BumpLevel::Major),
            "minor" => Ok(BumpLevel::Minor),
            "patch" => Ok(BumpLevel::Patch),
            _ => Err(()),
        }
    }
}

/// What the last line of a commit body asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive<'a> {
    /// No `bumpversion:` marker with a following token
    Absent,
    /// A recognised level
    Level(BumpLevel),
    /// Marker present, level token unknown
    Invalid(&'a str),
}

impl Directive<'_> {
    /// Level to apply, falling back to patch for anything but a valid directive
    pub fn level(&self) -> BumpLevel {
        match self {
            Directive::Level(level) => *level,
            Directive::Absent | Directive::Invalid(_) => BumpLevel::Patch,
        }
    }
}

/// Parse the directive carried by the last line of `body`.
///
/// Only the trailing line counts, so footers higher up in the message
/// (sign-offs, co-authors) never trigger a bump.
pub fn parse_directive(body: &str) -> Directive<'_> {
    let last_line = match body.trim().lines().last() {
        Some(line) => line,
        None => return Directive::Absent,
    };

    let mut tokens = last_line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(DIRECTIVE_MARKER), Some(code)) => match code.parse::<BumpLevel>() {
            Ok(level) => Directive::Level(level),
            Err(()) => Directive::Invalid(code),
        },
        _ => Directive::Absent,
    }
}

/// Decide the bump level for a commit body, reporting malformed directives.
///
/// Never fails: a bad directive is a warning and the level falls back to patch.
pub fn level_for(body: &str, reporter: &dyn Reporter) -> BumpLevel {
    let directive = parse_directive(body);

    if let Directive::Invalid(code) = directive {
        tracing::debug!(code, "ignoring unknown bump code");
        reporter.warning(&BoundaryWarning::InvalidBumpCode {
            code: code.to_string(),
        });
    }

    directive.level()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MemoryReporter;

    #[test]
    fn test_empty_body_is_patch() {
        let reporter = MemoryReporter::new();
        assert_eq!(level_for("", &reporter), BumpLevel::Patch);
        assert_eq!(level_for("   \n\n  ", &reporter), BumpLevel::Patch);
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_body_without_directive_is_patch() {
        let reporter = MemoryReporter::new();
        assert_eq!(level_for("Title\n\nBody", &reporter), BumpLevel::Patch);
        assert!(reporter.is_empty());
    }

    #[test]
    fn test_valid_directives() {
        for (code, expected) in [
            ("major", BumpLevel::Major),
            ("minor", BumpLevel::Minor),
            ("patch", BumpLevel::Patch),
        ] {
            let reporter = MemoryReporter::new();
            let body = format!("T\n\nbumpversion: {}", code);
            assert_eq!(level_for(&body, &reporter), expected);
            assert!(reporter.is_empty());
        }
    }

    #[test]
    fn test_invalid_code_warns_and_falls_back() {
        let reporter = MemoryReporter::new();
        assert_eq!(
            level_for("T\n\nbumpversion: mjr", &reporter),
            BumpLevel::Patch
        );
        assert!(reporter.output().contains("Invalid code mjr"));
    }

    #[test]
    fn test_directive_only_on_last_line() {
        assert_eq!(
            parse_directive("bumpversion: major\n\nSigned-off-by: someone"),
            Directive::Absent
        );
    }

    #[test]
    fn test_extra_whitespace_between_tokens() {
        assert_eq!(
            parse_directive("T\n\n  bumpversion:    minor  \n"),
            Directive::Level(BumpLevel::Minor)
        );
    }

    #[test]
    fn test_marker_alone_is_absent() {
        assert_eq!(parse_directive("bumpversion:"), Directive::Absent);
    }

    #[test]
    fn test_marker_must_match_exactly() {
        assert_eq!(parse_directive("Bumpversion: major"), Directive::Absent);
        assert_eq!(parse_directive("bumpversion major"), Directive::Absent);
    }

    #[test]
    fn test_level_is_case_sensitive() {
        assert_eq!(
            parse_directive("bumpversion: Major"),
            Directive::Invalid("Major")
        );
    }

    #[test]
    fn test_display_matches_tool_argument() {
        assert_eq!(BumpLevel::Major.to_string(), "major");
        assert_eq!(BumpLevel::default(), BumpLevel::Patch);
    }
}
