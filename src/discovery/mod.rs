//! Discovering what a project needs from its source text.

pub mod scanner;

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::package::PackageName;

pub use scanner::{scan_with, ScanResult};

/// Opens source files for scanning.
pub trait SourceReader {
    /// Open `path` for line-by-line reading.
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>>;
}

/// Reads sources from the filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSourceReader;

impl SourceReader for FsSourceReader {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        let file = File::open(path)
            .with_context(|| format!("failed to open source file: {}", path.display()))?;
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Scan source files on disk.
pub fn scan(
    sources: &[PathBuf],
    pending: BTreeSet<PackageName>,
    need_version: bool,
) -> Result<ScanResult> {
    scan_with(&FsSourceReader, sources, pending, need_version)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_scan_files_on_disk() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.vala");
        std::fs::write(&a, "void main() {\n    var w = new Gtk.Window();\n}\n").unwrap();

        let pending = [PackageName::new("Gtk"), PackageName::new("Gee")]
            .into_iter()
            .collect();
        let result = scan(&[a.clone()], pending, false).unwrap();

        assert!(result.found.contains("Gtk"));
        assert!(!result.found.contains("Gee"));
        assert_eq!(result.files_read, vec![a]);
    }
}
