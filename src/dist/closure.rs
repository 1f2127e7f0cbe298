//! Runtime library closure of a built binary.
//!
//! An external lister (`ldd` from the MSYS2 toolchain) prints one line per
//! library in the shape `name => path (address)`. Only libraries that ship
//! with the toolchain are worth redistributing; system libraries are left
//! out.

use std::path::{Path, PathBuf};

use anyhow::Result;
use regex::Regex;

use crate::core::errors::VbError;
use crate::util::process::ProcessBuilder;

const LISTER_LINE_PATTERN: &str = r"^\s*(?P<name>\S+)\s=>\s(?P<path>\S+)";

/// Lists the dynamic libraries a binary needs.
pub trait DependencyLister {
    /// Raw lister output for `binary`.
    ///
    /// Failure is a [`VbError::DependencyResolution`].
    fn list(&self, binary: &Path) -> Result<String>;
}

/// Runs an `ldd`-style program.
#[derive(Debug, Clone)]
pub struct LddLister {
    program: String,
}

impl LddLister {
    pub fn new(program: impl Into<String>) -> Self {
        LddLister {
            program: program.into(),
        }
    }
}

impl DependencyLister for LddLister {
    fn list(&self, binary: &Path) -> Result<String> {
        let failed = |reason: String| VbError::DependencyResolution {
            binary: binary.to_path_buf(),
            reason,
        };

        let output = ProcessBuilder::new(&self.program)
            .arg(binary)
            .exec()
            .map_err(|e| failed(format!("{:#}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match output.status.code() {
                Some(code) => format!("{} exited with code {}", self.program, code),
                None => format!("{} was terminated", self.program),
            };
            let reason = match stderr.trim() {
                "" => reason,
                detail => format!("{}: {}", reason, detail),
            };
            return Err(failed(reason).into());
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// One library reported by the lister.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryRef {
    pub name: String,
    pub source_path: PathBuf,
}

/// Where redistributable libraries live.
#[derive(Debug, Clone)]
pub struct RuntimeRoots {
    /// Toolchain installation directory, e.g. `C:/bin/msys64`.
    pub toolchain_root: PathBuf,
    /// Toolchain-relative prefix the lister reports, e.g. `/mingw64`.
    pub runtime_prefix: String,
}

impl RuntimeRoots {
    /// Where `reported` lives on disk, if it belongs to the toolchain.
    ///
    /// Paths under the runtime prefix are re-rooted beneath the toolchain
    /// root.
    pub fn locate(&self, reported: &Path) -> Option<PathBuf> {
        if reported.starts_with(&self.toolchain_root) {
            return Some(reported.to_path_buf());
        }

        let prefix = self.runtime_prefix.trim_end_matches('/');
        if prefix.is_empty() || !reported.starts_with(prefix) {
            return None;
        }
        let reported = reported.to_string_lossy();
        Some(self.toolchain_root.join(reported.trim_start_matches('/')))
    }
}

/// Parse lister output in order, skipping lines of any other shape.
pub fn parse_lister_output(output: &str) -> Result<Vec<LibraryRef>> {
    let line_rx = Regex::new(LISTER_LINE_PATTERN)?;
    Ok(output
        .lines()
        .filter_map(|line| line_rx.captures(line))
        .map(|caps| LibraryRef {
            name: caps["name"].to_string(),
            source_path: PathBuf::from(&caps["path"]),
        })
        .collect())
}

/// Keep only toolchain libraries, with their on-disk paths.
pub fn filter_closure(libraries: Vec<LibraryRef>, roots: &RuntimeRoots) -> Vec<LibraryRef> {
    libraries
        .into_iter()
        .filter_map(|lib| match roots.locate(&lib.source_path) {
            Some(source_path) => Some(LibraryRef {
                name: lib.name,
                source_path,
            }),
            None => {
                tracing::debug!("not redistributing {}", lib.source_path.display());
                None
            }
        })
        .collect()
}

/// The redistributable libraries `binary` depends on.
pub fn resolve_closure(
    lister: &dyn DependencyLister,
    binary: &Path,
    roots: &RuntimeRoots,
) -> Result<Vec<LibraryRef>> {
    let output = lister.list(binary)?;
    Ok(filter_closure(parse_lister_output(&output)?, roots))
}
