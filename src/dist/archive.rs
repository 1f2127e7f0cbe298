//! Deterministic zip archives of the distribution directory.
//!
//! Entries are written in sorted path order with a fixed timestamp, so the
//! same directory always produces the same archive bytes.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Component, Path};

use anyhow::{Context, Result};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

use crate::core::errors::VbError;
use crate::util::fs::same_file;

/// `<app>` or `<app>-<version>`: the archive's stem and entry prefix.
pub fn archive_stem(app_name: &str, version: Option<&str>) -> String {
    match version {
        Some(version) => format!("{}-{}", app_name, version),
        None => app_name.to_string(),
    }
}

/// Zip `dir` into `target`, prefixing every entry with `prefix/`.
///
/// `target` may lie inside `dir`; it is never archived into itself.
/// Returns the entry names written. Failure is a [`VbError::Packaging`].
pub fn create_archive(dir: &Path, target: &Path, prefix: &str) -> Result<Vec<String>> {
    write_archive(dir, target, prefix).map_err(|e| {
        VbError::Packaging {
            archive: target.to_path_buf(),
            reason: format!("{:#}", e),
        }
        .into()
    })
}

fn write_archive(dir: &Path, target: &Path, prefix: &str) -> Result<Vec<String>> {
    let file = File::create(target)
        .with_context(|| format!("failed to create {}", target.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default());

    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk {}", dir.display()))?;
        let path = entry.path();
        if same_file(path, target) {
            continue;
        }

        let relative = path.strip_prefix(dir).unwrap_or(path);
        let name = format!("{}/{}", prefix, entry_name(relative));

        if entry.file_type().is_dir() {
            let name = format!("{}/", name);
            zip.add_directory(name.as_str(), options)?;
            names.push(name);
        } else {
            zip.start_file(name.as_str(), options)?;
            let mut src =
                File::open(path).with_context(|| format!("failed to read {}", path.display()))?;
            io::copy(&mut src, &mut zip)?;
            names.push(name);
        }
    }

    let mut file = zip.finish()?;
    file.flush()?;
    Ok(names)
}

/// Forward-slash form of a relative path.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
