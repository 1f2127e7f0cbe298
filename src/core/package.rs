//! Package names and specifications.
//!
//! A package is an externally resolved library that the compiler links
//! against. vb only *names* packages; the resolver id (a pkg-config style
//! string such as `gtk+-3.0`) is handed to the compiler untouched.

use std::borrow::Borrow;
use std::fmt;

/// Canonical, title-cased package name (`gtk` and `GTK` both become `Gtk`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PackageName(String);

impl PackageName {
    /// Canonicalize a raw key from a settings file or the command line.
    pub fn new(raw: &str) -> Self {
        PackageName(title_case(raw.trim()))
    }

    /// The canonical name as it appears in source code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PackageName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PackageName {
    fn from(raw: &str) -> Self {
        PackageName::new(raw)
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut at_word_start = true;
    for ch in raw.chars() {
        if ch.is_alphabetic() {
            if at_word_start {
                out.extend(ch.to_uppercase());
            } else {
                out.extend(ch.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = true;
        }
    }
    out
}

/// Where a package's resolver id came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageScope {
    /// A process-wide default (built in or from the master settings file).
    Global,
    /// Claimed by the current project: explicitly configured or discovered.
    LocalOverride,
    /// Known to the project but currently unused; persisted as a comment.
    LocalUnused,
}

/// A package name bound to its resolver id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSpec {
    pub name: PackageName,
    pub resolver_id: String,
    pub scope: PackageScope,
}

impl PackageSpec {
    pub fn new(name: PackageName, resolver_id: impl Into<String>, scope: PackageScope) -> Self {
        PackageSpec {
            name,
            resolver_id: resolver_id.into(),
            scope,
        }
    }

    /// Render as a `[Packages]` line; unused packages are commented out.
    pub fn to_settings_line(&self) -> String {
        match self.scope {
            PackageScope::LocalUnused | PackageScope::Global => {
                format!("# {} = {}", self.name, self.resolver_id)
            }
            PackageScope::LocalOverride => format!("{} = {}", self.name, self.resolver_id),
        }
    }
}
