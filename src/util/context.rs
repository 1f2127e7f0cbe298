//! Global context for vb operations.
//!
//! Provides the paths every operation needs: the project directory (the
//! current working directory), the user's home directory, and the
//! conventional locations of the settings files and distribution directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::settings::{MASTER_SETTINGS_NAME, PROJECT_SETTINGS_NAME};

/// Name of the distribution directory inside the project.
pub const DIST_DIR_NAME: &str = "dist";

/// Global context containing paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Project directory
    cwd: PathBuf,

    /// User's home directory, if one could be determined
    home: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context for the current working directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf());
        Ok(GlobalContext { cwd, home })
    }

    /// Create a context with a specific project directory and home.
    pub fn with_paths(cwd: impl Into<PathBuf>, home: Option<PathBuf>) -> Self {
        GlobalContext {
            cwd: cwd.into(),
            home,
        }
    }

    /// Get the project directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the user's home directory.
    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Master settings locations, in search order.
    pub fn master_settings_candidates(&self) -> Vec<PathBuf> {
        match &self.home {
            Some(home) => vec![
                home.join(".config").join(MASTER_SETTINGS_NAME),
                home.join(format!(".{}", MASTER_SETTINGS_NAME)),
                home.join(MASTER_SETTINGS_NAME),
            ],
            None => Vec::new(),
        }
    }

    /// Get the project settings file path.
    pub fn project_settings_path(&self) -> PathBuf {
        self.cwd.join(PROJECT_SETTINGS_NAME)
    }

    /// Get the distribution directory.
    pub fn dist_dir(&self) -> PathBuf {
        self.cwd.join(DIST_DIR_NAME)
    }

    /// Display `path` relative to the project directory.
    pub fn display_path(&self, path: &Path) -> String {
        crate::util::fs::relative_path(&self.cwd, path)
            .display()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert_eq!(ctx.dist_dir(), ctx.cwd().join("dist"));
        assert_eq!(ctx.project_settings_path(), ctx.cwd().join("vb.ini"));
    }

    #[test]
    fn test_master_candidates_order() {
        let ctx = GlobalContext::with_paths("/work/app", Some(PathBuf::from("/home/me")));
        assert_eq!(
            ctx.master_settings_candidates(),
            vec![
                PathBuf::from("/home/me/.config/vbglobal.ini"),
                PathBuf::from("/home/me/.vbglobal.ini"),
                PathBuf::from("/home/me/vbglobal.ini"),
            ]
        );

        let homeless = GlobalContext::with_paths("/work/app", None);
        assert!(homeless.master_settings_candidates().is_empty());
    }

    #[test]
    fn test_display_path() {
        let ctx = GlobalContext::with_paths("/work/app", None);
        assert_eq!(ctx.display_path(Path::new("/work/app/dist/app.zip")), "dist/app.zip");
    }
}
