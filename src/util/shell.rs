//! User-facing status output.
//!
//! Status lines are right-aligned to a fixed width and printed to stderr:
//!
//! ```text
//!         Read vb.ini
//!     Building valac -o hello --pkg gee-0.8 hello.vala
//!       Copied 3 DLLs to dist
//! ```
//!
//! Quiet mode suppresses status lines but never warnings. A capturing shell
//! records lines instead of printing them, for tests.

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::sync::Mutex;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// --quiet: warnings and errors only
    Quiet,
    /// Default: status messages
    #[default]
    Normal,
    /// --verbose: status messages plus details
    Verbose,
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    // Success statuses (green)
    Added,
    Copied,
    Created,
    Moved,
    Removed,
    Updated,
    Wrote,

    // In-progress statuses (cyan)
    Building,
    Discovered,
    Read,
    Running,

    // Warning status (yellow)
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Added => "Added",
            Status::Copied => "Copied",
            Status::Created => "Created",
            Status::Moved => "Moved",
            Status::Removed => "Removed",
            Status::Updated => "Updated",
            Status::Wrote => "Wrote",
            Status::Building => "Building",
            Status::Discovered => "Discovered",
            Status::Read => "Read",
            Status::Running => "Running",
            Status::Warning => "warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Added
            | Status::Copied
            | Status::Created
            | Status::Moved
            | Status::Removed
            | Status::Updated
            | Status::Wrote => "\x1b[1;32m",
            Status::Building | Status::Discovered | Status::Read | Status::Running => {
                "\x1b[1;36m"
            }
            Status::Warning => "\x1b[1;33m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    verbosity: Verbosity,
    use_color: bool,
    captured: Option<Mutex<Vec<String>>>,
}

impl Shell {
    /// Create a shell that writes to stderr.
    pub fn new(verbosity: Verbosity) -> Self {
        Shell {
            verbosity,
            use_color: io::stderr().is_terminal(),
            captured: None,
        }
    }

    /// Create a shell from CLI flags. Quiet wins over verbose.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };
        Shell::new(verbosity)
    }

    /// Create a shell that records lines instead of printing them.
    pub fn capture(verbosity: Verbosity) -> Self {
        Shell {
            verbosity,
            use_color: false,
            captured: Some(Mutex::new(Vec::new())),
        }
    }

    pub fn verbosity(&self) -> Verbosity {
        self.verbosity
    }

    pub fn is_quiet(&self) -> bool {
        self.verbosity == Verbosity::Quiet
    }

    pub fn is_verbose(&self) -> bool {
        self.verbosity == Verbosity::Verbose
    }

    /// Print a status line unless quiet.
    pub fn status(&self, status: Status, message: impl Display) {
        if self.is_quiet() {
            return;
        }
        self.emit(status, &message.to_string());
    }

    /// Print a status line only in verbose mode.
    pub fn verbose(&self, status: Status, message: impl Display) {
        if self.is_verbose() {
            self.emit(status, &message.to_string());
        }
    }

    /// Print a warning. Warnings are shown at every verbosity.
    pub fn warn(&self, message: impl Display) {
        let message = message.to_string();
        tracing::debug!("warning: {}", message);
        self.emit(Status::Warning, &message);
    }

    /// Lines recorded by a capturing shell.
    pub fn captured(&self) -> Vec<String> {
        match &self.captured {
            Some(lines) => lines.lock().map(|l| l.clone()).unwrap_or_default(),
            None => Vec::new(),
        }
    }

    fn emit(&self, status: Status, message: &str) {
        let label = status.as_str();
        if let Some(lines) = &self.captured {
            if let Ok(mut lines) = lines.lock() {
                lines.push(format!("{}: {}", label, message));
            }
            return;
        }

        let line = if status == Status::Warning {
            let label = self.paint(status, label);
            format!("{}: {}", label, message)
        } else {
            let padded = format!("{:>width$}", label, width = STATUS_WIDTH);
            format!("{} {}", self.paint(status, &padded), message)
        };
        let _ = writeln!(io::stderr(), "{}", line);
    }

    fn paint(&self, status: Status, text: &str) -> String {
        if self.use_color {
            format!("{}{}\x1b[0m", status.color_code(), text)
        } else {
            text.to_string()
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(Verbosity::Normal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flags() {
        assert!(Shell::from_flags(true, true).is_quiet());
        assert!(Shell::from_flags(false, true).is_verbose());
        assert_eq!(Shell::from_flags(false, false).verbosity(), Verbosity::Normal);
    }

    #[test]
    fn test_quiet_suppresses_status_not_warnings() {
        let shell = Shell::capture(Verbosity::Quiet);
        shell.status(Status::Read, "vb.ini");
        shell.warn("failed to find git");
        assert_eq!(shell.captured(), vec!["warning: failed to find git"]);
    }

    #[test]
    fn test_verbose_only_lines() {
        let normal = Shell::capture(Verbosity::Normal);
        normal.verbose(Status::Read, "vbglobal.ini");
        normal.status(Status::Wrote, "vb.ini");
        assert_eq!(normal.captured(), vec!["Wrote: vb.ini"]);

        let verbose = Shell::capture(Verbosity::Verbose);
        verbose.verbose(Status::Read, "vbglobal.ini");
        assert_eq!(verbose.captured(), vec!["Read: vbglobal.ini"]);
    }
}
