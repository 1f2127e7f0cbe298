//! Test utilities and mocks for vb unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use vb::test_support::{ProjectFixture, RecordingReader};
//!
//! #[test]
//! fn test_example() {
//!     let reader = RecordingReader::new().with_file("a.vala", "Gee.List l;\n");
//!     // scan with `reader`, then check `reader.opened()`...
//! }
//! ```

pub mod fixtures;

use std::collections::HashMap;
use std::io::{BufRead, Cursor};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};

use crate::discovery::SourceReader;

// Re-export fixtures for convenience
pub use fixtures::*;

/// In-memory source files that remember which were opened, in order.
#[derive(Debug, Clone, Default)]
pub struct RecordingReader {
    files: HashMap<PathBuf, String>,
    opened: Arc<Mutex<Vec<PathBuf>>>,
}

impl RecordingReader {
    pub fn new() -> Self {
        RecordingReader::default()
    }

    /// Add a file with the given content.
    pub fn with_file(mut self, path: impl AsRef<Path>, content: impl Into<String>) -> Self {
        self.files.insert(path.as_ref().to_path_buf(), content.into());
        self
    }

    /// Paths opened so far.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.opened.lock().unwrap().clone()
    }
}

impl SourceReader for RecordingReader {
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        let Some(content) = self.files.get(path) else {
            bail!("no such file: {}", path.display());
        };
        self.opened.lock().unwrap().push(path.to_path_buf());
        Ok(Box::new(Cursor::new(content.as_bytes())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn test_recording_reader() {
        let reader = RecordingReader::new().with_file("a.vala", "hello");

        let mut text = String::new();
        reader.open(Path::new("a.vala")).unwrap().read_to_string(&mut text).unwrap();
        assert_eq!(text, "hello");
        assert!(reader.open(Path::new("b.vala")).is_err());
        assert_eq!(reader.opened(), vec![PathBuf::from("a.vala")]);
    }
}
