//! Auxiliary files shipped next to the binary.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::fs::ensure_dir;

/// Names that may be found under a conventional extension instead.
const CONVENTIONAL_NAMES: &[&str] = &["README", "LICENSE"];

/// Extensions tried, in order, for conventional names.
pub const FALLBACK_EXTENSIONS: &[&str] = &["txt", "md"];

/// Find an extra-file entry relative to `root`.
///
/// `README` may be `README.txt` or `README.md`, and likewise for `LICENSE`.
pub fn locate(root: &Path, entry: &Path) -> Option<PathBuf> {
    if root.join(entry).is_file() {
        return Some(entry.to_path_buf());
    }

    let upper = entry.to_string_lossy().to_uppercase();
    if !CONVENTIONAL_NAMES.iter().any(|name| upper.starts_with(name)) {
        return None;
    }
    FALLBACK_EXTENSIONS
        .iter()
        .map(|ext| entry.with_extension(ext))
        .find(|candidate| root.join(candidate).is_file())
}

/// Copy every extra file that exists into `dist`, keeping relative
/// subdirectories. Missing entries are skipped.
///
/// Returns the copied files' new paths.
pub fn copy_extra_files(root: &Path, entries: &[PathBuf], dist: &Path) -> Result<Vec<PathBuf>> {
    let mut copied = Vec::new();
    for entry in entries {
        let Some(found) = locate(root, entry) else {
            tracing::debug!("no extra file {}", entry.display());
            continue;
        };

        let dest_dir = match found.parent() {
            Some(parent) if !found.is_absolute() => dist.join(parent),
            _ => dist.to_path_buf(),
        };
        ensure_dir(&dest_dir)?;

        let src = root.join(&found);
        let Some(name) = found.file_name() else {
            continue;
        };
        let dest = dest_dir.join(name);
        std::fs::copy(&src, &dest).with_context(|| {
            format!("failed to copy {} to {}", src.display(), dest.display())
        })?;
        copied.push(dest);
    }
    Ok(copied)
}
