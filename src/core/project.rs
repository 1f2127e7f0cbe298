//! A project directory: its sources and application name.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::errors::VbError;
use super::platform::TargetPlatform;
use crate::settings::GeneralSettings;

/// Extension of the source files vb compiles.
pub const SOURCE_EXTENSION: &str = "vala";

/// A project rooted at a directory containing `*.vala` files.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
    sources: Vec<PathBuf>,
    app_name: String,
}

impl Project {
    /// Find the project's sources and work out its application name.
    ///
    /// The name is, in order: the `appname` setting, the stem of the only
    /// source file, or the name of the project directory.
    pub fn discover(root: &Path, general: &GeneralSettings) -> Result<Project> {
        let sources = find_sources(root)?;

        let app_name = match &general.app_name {
            Some(name) => name.clone(),
            None if sources.len() == 1 => file_stem(&sources[0]),
            None => dir_name(root),
        };

        Ok(Project {
            root: root.to_path_buf(),
            sources,
            app_name,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Source files, sorted by path.
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Where the compiler writes the binary.
    pub fn binary_path(&self, platform: TargetPlatform) -> PathBuf {
        self.root.join(platform.exe_name(&self.app_name))
    }
}

/// Source files directly inside `root`, sorted by path.
pub fn find_sources(root: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(root)
        .with_context(|| format!("failed to read directory: {}", root.display()))?;

    let mut sources = Vec::new();
    for entry in entries {
        let path = entry?.path();
        let is_source = path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION);
        if is_source && path.is_file() {
            sources.push(path);
        }
    }

    if sources.is_empty() {
        return Err(VbError::Discovery {
            dir: root.to_path_buf(),
        }
        .into());
    }

    sources.sort();
    Ok(sources)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn dir_name(root: &Path) -> String {
    let root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
    root.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "app".to_string())
}
