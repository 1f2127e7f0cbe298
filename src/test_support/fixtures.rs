//! Test fixtures for common test scenarios.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::util::GlobalContext;

/// A project directory with its own empty home directory, so the user's
/// real master settings never leak into a test.
#[derive(Debug)]
pub struct ProjectFixture {
    tmp: TempDir,
}

impl ProjectFixture {
    /// Create an empty project.
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir_all(tmp.path().join("home")).unwrap();
        std::fs::create_dir_all(tmp.path().join("project")).unwrap();
        ProjectFixture { tmp }
    }

    /// Add a source file.
    pub fn with_source(self, name: &str, content: &str) -> Self {
        self.with_file(name, content)
    }

    /// Add any file, creating parent directories.
    pub fn with_file(self, relative: &str, content: &str) -> Self {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
        self
    }

    /// Add a master settings file in the fixture's home directory.
    pub fn with_master_settings(self, content: &str) -> Self {
        std::fs::write(self.home().join(".vbglobal.ini"), content).unwrap();
        self
    }

    pub fn root(&self) -> PathBuf {
        self.tmp.path().join("project")
    }

    pub fn home(&self) -> PathBuf {
        self.tmp.path().join("home")
    }

    /// Path of a file inside the project.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.root().join(relative)
    }

    /// Read a project file.
    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative)).unwrap()
    }

    /// A context rooted at the project with the fixture's home.
    pub fn context(&self) -> GlobalContext {
        GlobalContext::with_paths(self.root(), Some(self.home()))
    }
}

impl Default for ProjectFixture {
    fn default() -> Self {
        Self::new()
    }
}
