//! Package registry.
//!
//! The registry maps package names to resolver ids. It holds two disjoint
//! tables: the global defaults and the packages claimed by the project being
//! processed. Claiming a name moves it out of the global table, so the final
//! package list names every package exactly once and prefers the project's
//! own resolver id.
//!
//! The registry is an explicit value: it is loaded once, then passed by value
//! through discovery and merging. Claiming consumes the registry and returns
//! the new state.

use std::collections::{BTreeMap, BTreeSet};

use super::package::{PackageName, PackageScope, PackageSpec};

/// Package that provides the GUI toolkit.
pub const GUI_PACKAGE: &str = "Gtk";

/// Package that provides the IO abstraction layer.
pub const IO_PACKAGE: &str = "Gio";

/// Built-in global defaults.
pub const DEFAULT_PACKAGES: &[(&str, &str)] = &[
    ("Gee", "gee-0.8"),
    (IO_PACKAGE, "gio-2.0"),
    (GUI_PACKAGE, "gtk+-3.0"),
];

/// Global defaults plus the current project's claimed packages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    global: BTreeMap<PackageName, String>,
    local: BTreeMap<PackageName, String>,
}

impl Registry {
    /// Create a registry with no packages at all.
    pub fn empty() -> Self {
        Registry::default()
    }

    /// Create a registry holding the built-in defaults.
    pub fn with_defaults() -> Self {
        let mut registry = Registry::empty();
        for (name, id) in DEFAULT_PACKAGES {
            registry.insert_global(PackageName::new(name), *id);
        }
        registry
    }

    /// Set (or replace) a global default.
    ///
    /// Names already claimed locally stay local.
    pub fn insert_global(&mut self, name: PackageName, resolver_id: impl Into<String>) {
        if !self.local.contains_key(&name) {
            self.global.insert(name, resolver_id.into());
        }
    }

    /// Forget every global default.
    pub fn clear_global(&mut self) {
        self.global.clear();
    }

    /// Claim `name` for the current project with the given resolver id.
    ///
    /// The name leaves the global table for the rest of this project's
    /// processing.
    pub fn claim_local(mut self, name: PackageName, resolver_id: impl Into<String>) -> Self {
        self.global.remove(&name);
        tracing::debug!("claimed package {}", name);
        self.local.insert(name, resolver_id.into());
        self
    }

    /// Claim a global default under its default resolver id.
    ///
    /// Returns the registry unchanged when `name` is not a global default.
    pub fn claim_default(self, name: &PackageName) -> Self {
        match self.global.get(name).cloned() {
            Some(id) => self.claim_local(name.clone(), id),
            None => self,
        }
    }

    /// Look up the resolver id for `name`, preferring the project's claim.
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.local
            .get(name)
            .or_else(|| self.global.get(name))
            .map(String::as_str)
    }

    /// Whether `name` is still an unclaimed global default.
    pub fn is_global(&self, name: &str) -> bool {
        self.global.contains_key(name)
    }

    /// Whether `name` has been claimed by the project.
    pub fn is_active(&self, name: &str) -> bool {
        self.local.contains_key(name)
    }

    /// Unclaimed global defaults: candidates for discovery.
    pub fn pending(&self) -> BTreeSet<PackageName> {
        self.global.keys().cloned().collect()
    }

    /// Packages claimed by the project, in name order.
    pub fn active(&self) -> &BTreeMap<PackageName, String> {
        &self.local
    }

    /// Unclaimed global defaults, in name order.
    pub fn globals(&self) -> &BTreeMap<PackageName, String> {
        &self.global
    }

    /// Every package with its scope, claimed packages first.
    pub fn specs(&self) -> Vec<PackageSpec> {
        let local = self
            .local
            .iter()
            .map(|(n, id)| PackageSpec::new(n.clone(), id.clone(), PackageScope::LocalOverride));
        let global = self
            .global
            .iter()
            .map(|(n, id)| PackageSpec::new(n.clone(), id.clone(), PackageScope::Global));
        local.chain(global).collect()
    }
}
