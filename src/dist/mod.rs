//! Assembling a redistributable directory for a built binary.
//!
//! Steps, in order:
//! 1. embed an icon, if one is found (warn-only);
//! 2. recreate the distribution directory;
//! 3. copy extra files;
//! 4. list the binary's runtime libraries, at its original location;
//! 5. move the binary into the distribution directory;
//! 6. copy the toolchain libraries next to it.
//!
//! Archiving is a separate step, see [`archive`].

pub mod archive;
pub mod closure;
pub mod extra_files;
pub mod icon;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::util::fs::{copy_into, ensure_dir, move_into, remove_dir_all_if_exists};
use crate::util::shell::{Shell, Status};

pub use archive::{archive_stem, create_archive};
pub use closure::{DependencyLister, LddLister, LibraryRef, RuntimeRoots};

/// What one assembly run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistributionManifest {
    /// The binary's location inside the distribution directory.
    pub binary_path: PathBuf,
    pub copied_files: Vec<PathBuf>,
    pub copied_libraries: Vec<PathBuf>,
    pub icon_embedded: bool,
    pub archive_path: Option<PathBuf>,
}

/// Inputs to [`assemble`].
#[derive(Debug, Clone)]
pub struct DistRequest<'a> {
    /// Project root; extra files and icons are looked up here.
    pub root: &'a Path,
    /// The freshly built binary.
    pub binary: &'a Path,
    pub dist_dir: &'a Path,
    pub extra_files: &'a [PathBuf],
    /// Resource editor used to embed the icon.
    pub rcedit: &'a Path,
    pub roots: &'a RuntimeRoots,
}

/// Build the distribution directory for `req.binary`.
///
/// Fails with a dependency-resolution error if the lister fails; the binary
/// is then still at its original path.
pub fn assemble(
    req: &DistRequest<'_>,
    lister: &dyn DependencyLister,
    shell: &Shell,
) -> Result<DistributionManifest> {
    let mut manifest = DistributionManifest::default();

    if let Some(icon) = icon::find_icon(req.root) {
        match icon::embed_icon(req.rcedit, req.binary, &icon) {
            Ok(()) => {
                shell.verbose(Status::Added, format!("icon {}", icon.display()));
                manifest.icon_embedded = true;
            }
            Err(warning) => shell.warn(warning),
        }
    }

    remove_dir_all_if_exists(req.dist_dir)?;
    ensure_dir(req.dist_dir)?;

    manifest.copied_files = extra_files::copy_extra_files(req.root, req.extra_files, req.dist_dir)?;
    if !manifest.copied_files.is_empty() {
        shell.verbose(
            Status::Copied,
            format!(
                "{} extra {} to {}",
                manifest.copied_files.len(),
                plural(manifest.copied_files.len(), "file", "files"),
                req.dist_dir.display()
            ),
        );
    }

    let libraries = closure::resolve_closure(lister, req.binary, req.roots)?;

    manifest.binary_path = move_into(req.binary, req.dist_dir)?;
    shell.verbose(
        Status::Moved,
        format!("{} to {}", req.binary.display(), req.dist_dir.display()),
    );

    for lib in &libraries {
        let copied = copy_into(&lib.source_path, req.dist_dir)
            .with_context(|| format!("failed to copy runtime library {}", lib.name))?;
        manifest.copied_libraries.push(copied);
    }
    if !libraries.is_empty() {
        shell.verbose(
            Status::Copied,
            format!(
                "{} {} to {}",
                libraries.len(),
                plural(libraries.len(), "library", "libraries"),
                req.dist_dir.display()
            ),
        );
    }

    Ok(manifest)
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 {
        one
    } else {
        many
    }
}
