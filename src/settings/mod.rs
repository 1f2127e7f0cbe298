//! Settings files.
//!
//! vb reads two files with the same line-oriented format:
//! - Master: the first of `~/.config/vbglobal.ini`, `~/.vbglobal.ini`,
//!   `~/vbglobal.ini` that exists. Holds global package defaults, toolchain
//!   paths and scaffolding templates.
//! - Project: `./vb.ini`. Holds optional overrides, extra distribution files
//!   and the project's `[Packages]` section, which vb keeps up to date.
//!
//! Both files are applied, master first, onto one `ProjectConfig` that starts
//! from built-in defaults.

pub mod merge;
pub mod parser;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::package::{PackageName, PackageScope, PackageSpec};
use crate::core::registry::Registry;
use crate::util::fs::expand_pattern;

pub use merge::{
    merge_packages, new_settings_text, packages_section, reconcile, MergeOutcome, SettingsWrite,
};
pub use parser::{Category, Effect, TemplateKind};

/// File name of the master settings file.
pub const MASTER_SETTINGS_NAME: &str = "vbglobal.ini";

/// File name of the per-project settings file.
pub const PROJECT_SETTINGS_NAME: &str = "vb.ini";

/// Extra files copied into a distribution when `[ExtraFiles]` is absent.
pub const DEFAULT_EXTRA_FILES: &[&str] = &["README", "LICENSE"];

/// Which settings file is being applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Master,
    Project,
}

/// `[General]` settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneralSettings {
    /// Application name override (prefer leaving the default).
    pub app_name: Option<String>,
    /// Version override (prefer a `VERSION` constant in the source).
    pub version: Option<String>,
    /// Resource editor used to embed the icon.
    pub rcedit: PathBuf,
    /// Toolchain root that runtime libraries are copied from.
    pub toolchain_root: PathBuf,
    /// Prefix the dependency lister reports for toolchain libraries.
    pub runtime_prefix: String,
    /// Compiler executable.
    pub compiler: String,
    /// Dependency lister executable.
    pub lister: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        GeneralSettings {
            app_name: None,
            version: None,
            rcedit: PathBuf::from("C:/bin/rcedit.exe"),
            toolchain_root: PathBuf::from("C:/bin/msys64"),
            runtime_prefix: "/mingw64".to_string(),
            compiler: "valac".to_string(),
            lister: "ldd".to_string(),
        }
    }
}

impl GeneralSettings {
    fn set(&mut self, key: &str, value: &str) {
        match key {
            "appname" => self.app_name = Some(value.to_string()),
            "version" => self.version = Some(value.to_string()),
            "winrcedit" => self.rcedit = PathBuf::from(value),
            "winmsys2" => self.toolchain_root = PathBuf::from(value),
            "winruntime" => self.runtime_prefix = value.to_string(),
            "compiler" => self.compiler = value.to_string(),
            "lister" => self.lister = value.to_string(),
            _ => tracing::debug!("ignoring unknown setting `{}`", key),
        }
    }
}

/// Raw template bodies for `vb new`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Templates {
    pub console: String,
    pub gui: String,
    pub lib: String,
}

impl Default for Templates {
    fn default() -> Self {
        Templates {
            console: CONSOLE_TEMPLATE.to_string(),
            gui: GUI_TEMPLATE.to_string(),
            lib: String::new(),
        }
    }
}

impl Templates {
    pub fn get(&self, kind: TemplateKind) -> &str {
        match kind {
            TemplateKind::Console => &self.console,
            TemplateKind::Gui => &self.gui,
            TemplateKind::Lib => &self.lib,
        }
    }

    fn get_mut(&mut self, kind: TemplateKind) -> &mut String {
        match kind {
            TemplateKind::Console => &mut self.console,
            TemplateKind::Gui => &mut self.gui,
            TemplateKind::Lib => &mut self.lib,
        }
    }
}

/// Everything read from the settings files for one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub general: GeneralSettings,
    /// Extra distribution files, relative to the project root.
    pub extra_files: Vec<PathBuf>,
    /// Packages recorded in the project file (active and commented).
    pub packages: BTreeMap<PackageName, PackageSpec>,
    pub templates: Templates,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        ProjectConfig {
            general: GeneralSettings::default(),
            extra_files: DEFAULT_EXTRA_FILES.iter().map(PathBuf::from).collect(),
            packages: BTreeMap::new(),
            templates: Templates::default(),
        }
    }
}

impl ProjectConfig {
    /// Read a settings file and apply it.
    ///
    /// Extra-file patterns are expanded relative to `project_root`, whichever
    /// file they come from.
    pub fn read(
        &mut self,
        path: &Path,
        origin: Origin,
        project_root: &Path,
        registry: Registry,
    ) -> Result<Registry> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file: {}", path.display()))?;
        Ok(self.apply(&text, origin, project_root, registry))
    }

    /// Apply settings text.
    ///
    /// In a master file `[Packages]` entries become global defaults. In a
    /// project file they are claimed locally, which removes them from the
    /// global defaults, and commented entries are remembered as unused.
    pub fn apply(
        &mut self,
        text: &str,
        origin: Origin,
        base: &Path,
        mut registry: Registry,
    ) -> Registry {
        for effect in parser::parse(text) {
            match effect {
                Effect::None => {}
                Effect::Enter(category) => {
                    if category.resets_on_entry() {
                        registry = self.reset(category, origin, registry);
                    }
                }
                Effect::TemplateLine(kind, line) => self.templates.get_mut(kind).push_str(line),
                Effect::ExtraPattern(pattern) => self.add_extra_pattern(base, pattern),
                Effect::General { key, value } => self.general.set(&key, value),
                Effect::Package { name, resolver_id } => match origin {
                    Origin::Master => registry.insert_global(name, resolver_id),
                    Origin::Project => {
                        registry = registry.claim_local(name.clone(), resolver_id);
                        self.packages.insert(
                            name.clone(),
                            PackageSpec::new(name, resolver_id, PackageScope::LocalOverride),
                        );
                    }
                },
                Effect::UnusedPackage { name, resolver_id } => {
                    if origin == Origin::Project && !self.packages.contains_key(&name) {
                        self.packages.insert(
                            name.clone(),
                            PackageSpec::new(name, resolver_id, PackageScope::LocalUnused),
                        );
                    }
                }
            }
        }
        registry
    }

    fn reset(&mut self, category: Category, origin: Origin, mut registry: Registry) -> Registry {
        match category {
            Category::General => {}
            Category::Packages => match origin {
                Origin::Master => registry.clear_global(),
                Origin::Project => self.packages.clear(),
            },
            Category::ExtraFiles => self.extra_files.clear(),
            Category::Template(kind) => self.templates.get_mut(kind).clear(),
        }
        registry
    }

    fn add_extra_pattern(&mut self, base: &Path, pattern: &str) {
        match expand_pattern(base, pattern) {
            Ok(paths) => self.extra_files.extend(paths),
            Err(e) => tracing::warn!("skipping extra files `{}`: {:#}", pattern, e),
        }
    }

    /// Packages the project remembers as unused, with their recorded ids.
    pub fn unused_packages(&self) -> impl Iterator<Item = &PackageSpec> {
        self.packages
            .values()
            .filter(|spec| spec.scope == PackageScope::LocalUnused)
    }

    /// The resolver id recorded for an unused package, if any.
    pub fn recorded_unused_id(&self, name: &str) -> Option<&str> {
        self.packages
            .get(name)
            .filter(|spec| spec.scope == PackageScope::LocalUnused)
            .map(|spec| spec.resolver_id.as_str())
    }
}

/// Load the master settings file, if one exists, onto `config`.
///
/// Candidates are tried in order and the first existing file wins. With no
/// master file the built-in defaults apply.
pub fn load_master(
    candidates: &[PathBuf],
    project_root: &Path,
    config: &mut ProjectConfig,
) -> Result<(Registry, Option<PathBuf>)> {
    let registry = Registry::with_defaults();
    match candidates.iter().find(|path| path.is_file()) {
        Some(path) => {
            tracing::debug!("reading master settings {}", path.display());
            let registry = config.read(path, Origin::Master, project_root, registry)?;
            Ok((registry, Some(path.clone())))
        }
        None => Ok((registry, None)),
    }
}

const CONSOLE_TEMPLATE: &str = r##"// Copyright © #YEAR# #USER#. All rights reserved.
// License: GPLv3

const string APPNAME = "#APPNAME#";
const string VERSION = "0.1.0";

void main(string[] args) {
    stdout.printf("Hello %s v%s\n", APPNAME, VERSION);
}
"##;

const GUI_TEMPLATE: &str = r##"// Copyright © #YEAR# #USER#. All rights reserved.
// License: GPLv3

const string APPNAME = "#APPNAME#";
const string VERSION = "0.1.0";

void main(string[] args) {
    Gtk.init(ref args);

    var window = new Gtk.Window();
    window.title = "Hello " + APPNAME + " v" + VERSION;
    window.window_position = Gtk.WindowPosition.CENTER;
    window.set_default_size(320, 240);
    window.destroy.connect(Gtk.main_quit);

    window.show_all();

    Gtk.main();
}
"##;
