//! Error and warning types for the build pipeline.
//!
//! Errors abort the pipeline and are printed once by the binary. Warnings
//! are reported where they happen and never stop later stages.

use std::path::PathBuf;

use thiserror::Error;

/// A fatal pipeline error.
#[derive(Debug, Error)]
pub enum VbError {
    /// No source files to scan or compile.
    #[error("no .vala files found in {}", .dir.display())]
    Discovery { dir: PathBuf },

    /// The compiler failed or could not be started.
    #[error("failed to build `{command}`: {reason}")]
    Build { command: String, reason: String },

    /// The dependency lister failed. The built binary is left in place.
    #[error("failed to determine library dependencies of {}: {reason}", .binary.display())]
    DependencyResolution { binary: PathBuf, reason: String },

    /// Writing the distribution archive failed.
    #[error("failed to create archive {}: {reason}", .archive.display())]
    Packaging { archive: PathBuf, reason: String },
}

/// A non-fatal problem.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VbWarning {
    /// An optional external tool is not installed.
    #[error("failed to find {tool} so {consequence}")]
    ToolMissing { tool: String, consequence: String },

    /// An optional external tool ran but reported failure.
    #[error("{action} failed")]
    ToolFailed { action: String },

    /// The freshly built program exited unsuccessfully.
    #[error("failed to run {}{}", .binary.display(), exit_suffix(.code))]
    RunFailure { binary: PathBuf, code: Option<i32> },
}

fn exit_suffix(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!(" (exit code {code})"),
        None => String::new(),
    }
}
