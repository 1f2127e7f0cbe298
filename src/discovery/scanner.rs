//! Single-pass source scanner.
//!
//! Files are read in order, line by line. Each line is tested against:
//! 1. an alternation of every pending package name as a whole word;
//! 2. a fixed pattern for idiomatic IO-layer use, while that package is
//!    pending;
//! 3. a `const string VERSION = "...";` pattern, until a version is found.
//!
//! The alternation is rebuilt from the smaller pending set after every hit.
//! Scanning stops, without opening further files, once nothing is pending
//! and the version is either found or not wanted.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use regex::Regex;

use super::SourceReader;
use crate::core::package::PackageName;
use crate::core::registry::IO_PACKAGE;

/// Idiomatic uses of the IO layer that never name it.
const IO_USE_PATTERN: &str = r"\b(?:File\.|ZlibCompressor|Converter)";

/// A version constant; its value is captured as `version`.
const VERSION_PATTERN: &str = r#"const\s+string\s+(?i:version)\s*=\s*"(?P<version>[^"]+)"\s*;"#;

/// What a scan discovered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Pending packages the sources use.
    pub found: BTreeSet<PackageName>,
    /// The first version constant, in file-then-line order.
    pub version: Option<String>,
    /// Files that were opened, in order.
    pub files_read: Vec<PathBuf>,
}

/// Whole-word matcher over the still-pending package names.
#[derive(Debug)]
struct PackageMatcher {
    pending: BTreeSet<PackageName>,
    regex: Option<Regex>,
}

impl PackageMatcher {
    fn new(pending: BTreeSet<PackageName>) -> Result<Self> {
        let mut matcher = PackageMatcher {
            pending,
            regex: None,
        };
        matcher.rebuild()?;
        Ok(matcher)
    }

    fn rebuild(&mut self) -> Result<()> {
        if self.pending.is_empty() {
            self.regex = None;
            return Ok(());
        }

        let alternation = self
            .pending
            .iter()
            .map(|name| regex::escape(name.as_str()))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = format!(r"\b(?P<pkg>{})\b", alternation);
        tracing::debug!("package matcher: {}", pattern);
        self.regex = Some(
            Regex::new(&pattern)
                .with_context(|| format!("invalid package pattern: {}", pattern))?,
        );
        Ok(())
    }

    fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn is_pending(&self, name: &str) -> bool {
        self.pending.contains(name)
    }

    /// Remove every distinct pending name the line mentions.
    fn take_hits(&mut self, line: &str) -> Result<Vec<PackageName>> {
        let Some(regex) = &self.regex else {
            return Ok(Vec::new());
        };

        let hits: BTreeSet<&str> = regex
            .captures_iter(line)
            .filter_map(|caps| caps.name("pkg"))
            .map(|m| m.as_str())
            .collect();
        let taken: Vec<PackageName> = hits
            .into_iter()
            .filter_map(|hit| self.pending.take(hit))
            .collect();

        if !taken.is_empty() {
            self.rebuild()?;
        }
        Ok(taken)
    }

    fn take(&mut self, name: &str) -> Result<Option<PackageName>> {
        let taken = self.pending.take(name);
        if taken.is_some() {
            self.rebuild()?;
        }
        Ok(taken)
    }
}

/// Scan `sources` in order for the `pending` packages and, if
/// `need_version`, a version constant.
pub fn scan_with(
    reader: &dyn SourceReader,
    sources: &[PathBuf],
    pending: BTreeSet<PackageName>,
    need_version: bool,
) -> Result<ScanResult> {
    let start = Instant::now();
    let io_use = Regex::new(IO_USE_PATTERN)?;
    let version_rx = Regex::new(VERSION_PATTERN)?;

    let mut matcher = PackageMatcher::new(pending)?;
    let mut result = ScanResult::default();
    let done = |matcher: &PackageMatcher, result: &ScanResult| {
        matcher.is_empty() && (!need_version || result.version.is_some())
    };

    for path in sources {
        if done(&matcher, &result) {
            break;
        }

        let file = reader.open(path)?;
        result.files_read.push(path.clone());
        scan_file(file, path, &mut matcher, &io_use, &version_rx, &mut result, &done)?;
    }

    tracing::debug!(
        "scanned {} of {} files in {:?}",
        result.files_read.len(),
        sources.len(),
        start.elapsed()
    );
    Ok(result)
}

fn scan_file(
    file: Box<dyn BufRead + '_>,
    path: &Path,
    matcher: &mut PackageMatcher,
    io_use: &Regex,
    version_rx: &Regex,
    result: &mut ScanResult,
    done: impl Fn(&PackageMatcher, &ScanResult) -> bool,
) -> Result<()> {
    for line in file.lines() {
        let line = line.with_context(|| format!("failed to read {}", path.display()))?;

        for name in matcher.take_hits(&line)? {
            tracing::debug!("found package {} in {}", name, path.display());
            result.found.insert(name);
        }

        if matcher.is_pending(IO_PACKAGE) && io_use.is_match(&line) {
            if let Some(name) = matcher.take(IO_PACKAGE)? {
                tracing::debug!("found implicit {} use in {}", name, path.display());
                result.found.insert(name);
            }
        }

        if result.version.is_none() {
            if let Some(caps) = version_rx.captures(&line) {
                result.version = caps.name("version").map(|m| m.as_str().to_string());
            }
        }

        if done(matcher, result) {
            break;
        }
    }
    Ok(())
}
