//! Exit status and status lines on stderr

use console::{style, Term};
use dbus_calc::core::{BridgeError, Outcome};
use std::process::ExitCode;

/// How a command finished, as far as the exit code is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    /// Result rendered, or output printed
    Success,
    /// The bridge asked for a login
    Redirected,
    /// The reply status had no handler
    Ignored,
}

impl RunStatus {
    /// Process exit code
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Redirected => 2,
            Self::Ignored => 3,
        }
    }
}

impl From<&Outcome> for RunStatus {
    fn from(outcome: &Outcome) -> Self {
        match outcome {
            Outcome::Rendered { .. } => Self::Success,
            Outcome::Redirected { .. } => Self::Redirected,
            Outcome::Ignored { .. } => Self::Ignored,
        }
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        Self::from(status.code())
    }
}

/// Writes human-facing notes to stderr
#[derive(Debug)]
pub struct Reporter {
    term: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            term: Term::stderr(),
            use_color,
            quiet,
        }
    }

    /// Note for an ignored reply, decoding the bridge's error body if present
    #[must_use]
    pub fn ignored_line(status: u16, body: Option<&str>) -> String {
        let detail = body
            .and_then(BridgeError::from_body)
            .map_or_else(
                || BridgeError::describe_status(status).to_string(),
                |err| err.to_string(),
            );
        format!("status {status} ignored: {detail}")
    }

    /// Report an ignored reply
    pub fn ignored(&self, status: u16, body: Option<&str>) {
        let line = Self::ignored_line(status, body);
        if self.use_color {
            self.write(&style(line).yellow().to_string());
        } else {
            self.write(&line);
        }
    }

    /// Report a redirect
    pub fn redirected(&self, location: &str) {
        let line = format!("login required, see {location}");
        if self.use_color {
            self.write(&style(line).yellow().to_string());
        } else {
            self.write(&line);
        }
    }

    /// Report an error; shown even in quiet mode
    pub fn error(&self, message: &str) {
        let line = if self.use_color {
            format!("{} {message}", style("Error:").red().bold())
        } else {
            format!("Error: {message}")
        };
        let _ = self.term.write_line(&line);
    }

    fn write(&self, line: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(RunStatus::Success.code(), 0);
        assert_eq!(RunStatus::Redirected.code(), 2);
        assert_eq!(RunStatus::Ignored.code(), 3);
    }

    #[test]
    fn test_status_from_outcome() {
        let rendered = Outcome::Rendered {
            value: "12".to_string(),
        };
        let redirected = Outcome::Redirected {
            location: "/index.html".to_string(),
        };
        assert_eq!(RunStatus::from(&rendered), RunStatus::Success);
        assert_eq!(RunStatus::from(&redirected), RunStatus::Redirected);
        assert_eq!(
            RunStatus::from(&Outcome::Ignored { status: 500 }),
            RunStatus::Ignored
        );
    }

    #[test]
    fn test_ignored_line_with_bridge_error() {
        let line = Reporter::ignored_line(
            500,
            Some(r#"{"error":"dbus.http.DivisionByZero","message":"Sorry, can't allow division by zero."}"#),
        );
        assert!(line.starts_with("status 500 ignored: "));
        assert!(line.contains("dbus.http.DivisionByZero"));
    }

    #[test]
    fn test_ignored_line_without_body() {
        let line = Reporter::ignored_line(404, None);
        assert!(line.starts_with("status 404 ignored: "));
        assert!(line.len() > "status 404 ignored: ".len());
    }

    #[test]
    fn test_quiet_reporter_does_not_panic() {
        let reporter = Reporter::new(false, true);
        reporter.ignored(500, None);
        reporter.redirected("/index.html");
    }
}
