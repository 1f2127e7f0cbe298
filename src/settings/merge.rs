//! Reconciling the project settings file with discovered packages.
//!
//! Every line of the existing file is copied through unchanged except the
//! `[Packages]` section, which is regenerated:
//! - claimed packages are written as active `Name = id` lines;
//! - every package the old section mentioned (active or commented) that is
//!   no longer claimed is kept as a commented line with its recorded id;
//! - remaining global defaults the file never mentioned are added as
//!   commented lines.
//!
//! Lines are sorted so regenerating unchanged input is byte-identical, and
//! the file is only written when its content actually changes.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use anyhow::{Context, Result};

use super::parser::{step, Category, Effect};
use crate::core::package::{PackageName, PackageScope, PackageSpec};
use crate::core::registry::Registry;

/// Result of regenerating settings text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub text: String,
    pub changed: bool,
}

/// What happened to the project settings file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsWrite {
    Created,
    Updated,
    Unchanged,
}

/// Render a `[Packages]` section, one sorted line per spec.
pub fn packages_section(specs: impl IntoIterator<Item = PackageSpec>) -> String {
    let lines: BTreeSet<String> = specs.into_iter().map(|spec| spec.to_settings_line()).collect();

    let mut section = String::from("[Packages]\n");
    for line in lines {
        section.push_str(&line);
        section.push('\n');
    }
    section
}

/// Settings text for a project that has no settings file yet.
pub fn new_settings_text(registry: &Registry) -> String {
    let mut text = String::from("[General]\n\n[ExtraFiles]\n\n");
    text.push_str(&packages_section(registry.specs()));
    text
}

/// Regenerate the `[Packages]` section of `existing` from `registry`.
///
/// The section is located by name; it ends at the next category header.
/// When the file has no `[Packages]` section one is appended.
pub fn merge_packages(existing: &str, registry: &Registry) -> MergeOutcome {
    let mut before = String::new();
    let mut after = String::new();
    let mut recorded: BTreeMap<PackageName, String> = BTreeMap::new();
    let mut found = false;

    let mut category = Category::General;
    for raw in existing.split_inclusive('\n') {
        let (next, effect) = step(category, raw);
        category = next;

        if category == Category::Packages {
            found = true;
            match effect {
                Effect::Package { name, resolver_id }
                | Effect::UnusedPackage { name, resolver_id } => {
                    recorded.entry(name).or_insert_with(|| resolver_id.to_string());
                }
                _ => {}
            }
            continue;
        }

        if found {
            after.push_str(raw);
        } else {
            before.push_str(raw);
        }
    }

    // Unused records keep their ids; defaults only fill names never recorded.
    let mut inactive = recorded;
    for (name, id) in registry.globals() {
        inactive.entry(name.clone()).or_insert_with(|| id.clone());
    }

    let mut text = before;
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    let active = registry
        .active()
        .iter()
        .map(|(name, id)| PackageSpec::new(name.clone(), id.clone(), PackageScope::LocalOverride));
    let unused = inactive
        .into_iter()
        .filter(|(name, _)| !registry.is_active(name.as_str()))
        .map(|(name, id)| PackageSpec::new(name, id, PackageScope::LocalUnused));
    text.push_str(&packages_section(active.chain(unused)));
    if !after.is_empty() {
        text.push('\n');
        text.push_str(&after);
    }

    let changed = text != existing;
    MergeOutcome { text, changed }
}

/// Bring the project settings file at `path` up to date.
///
/// Creates the file when missing. An existing file is rewritten only when
/// the regenerated content differs, so its timestamp changes only with its
/// content.
pub fn reconcile(path: &Path, registry: &Registry) -> Result<SettingsWrite> {
    if !path.exists() {
        std::fs::write(path, new_settings_text(registry))
            .with_context(|| format!("failed to write settings file: {}", path.display()))?;
        return Ok(SettingsWrite::Created);
    }

    let existing = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read settings file: {}", path.display()))?;
    let outcome = merge_packages(&existing, registry);
    if !outcome.changed {
        return Ok(SettingsWrite::Unchanged);
    }

    std::fs::write(path, &outcome.text)
        .with_context(|| format!("failed to write settings file: {}", path.display()))?;
    Ok(SettingsWrite::Updated)
}
