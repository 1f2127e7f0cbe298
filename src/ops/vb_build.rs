//! Implementation of `vb build` and `vb run`.
//!
//! The pipeline is strictly sequential:
//! scan sources → reconcile `vb.ini` → compile → assemble `dist/` →
//! archive → run.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::builder::{self, BuildOptions as CompileOptions};
use crate::core::errors::VbWarning;
use crate::core::platform::TargetPlatform;
use crate::core::project::Project;
use crate::core::registry::Registry;
use crate::discovery::{self, ScanResult};
use crate::dist::{self, DistRequest, DistributionManifest, LddLister, RuntimeRoots};
use crate::settings::{self, load_master, Origin, ProjectConfig, SettingsWrite};
use crate::util::process::ProcessBuilder;
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Options for the build command.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Keep the console window of GUI programs on Windows
    pub console: bool,

    /// Archive the distribution directory; implies `dist`
    pub zip: bool,

    /// Assemble a distribution directory even when not targeting Windows
    pub dist: bool,

    pub platform: TargetPlatform,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            console: false,
            zip: false,
            dist: false,
            platform: TargetPlatform::current(),
        }
    }
}

impl BuildOptions {
    /// Whether this build assembles a distribution directory.
    ///
    /// Always on Windows; elsewhere only with `dist` or `zip`.
    pub fn distributing(&self) -> bool {
        self.platform.is_windows() || self.dist || self.zip
    }
}

/// A project after discovery and settings reconciliation.
#[derive(Debug, Clone)]
pub struct Discovered {
    pub config: ProjectConfig,
    pub project: Project,
    pub registry: Registry,
    pub scan: ScanResult,
    pub version: Option<String>,
    pub settings: SettingsWrite,
}

/// What a build produced.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub discovered: Discovered,
    /// Final location of the binary.
    pub binary: PathBuf,
    pub dist: Option<DistributionManifest>,
}

/// Load settings for the project in `ctx`, without touching any file.
///
/// Returns the merged configuration and the registry after the project's
/// own `[Packages]` claims.
pub fn load_settings(ctx: &GlobalContext, shell: &Shell) -> Result<(ProjectConfig, Registry)> {
    let mut config = ProjectConfig::default();
    let (registry, master) = load_master(&ctx.master_settings_candidates(), ctx.cwd(), &mut config)?;
    if let Some(master) = master {
        shell.verbose(Status::Read, master.display());
    }

    let path = ctx.project_settings_path();
    if !path.is_file() {
        return Ok((config, registry));
    }
    let registry = config.read(&path, Origin::Project, ctx.cwd(), registry)?;
    shell.verbose(Status::Read, ctx.display_path(&path));
    Ok((config, registry))
}

/// Find the project's sources, scan them, and bring `vb.ini` up to date.
pub fn discover(ctx: &GlobalContext, opts: &BuildOptions, shell: &Shell) -> Result<Discovered> {
    let (config, registry) = load_settings(ctx, shell)?;
    let project = Project::discover(ctx.cwd(), &config.general)?;

    let need_version = opts.distributing() && opts.zip && config.general.version.is_none();
    let mut pending = registry.pending();
    pending.extend(config.unused_packages().map(|spec| spec.name.clone()));

    let scan = discovery::scan(project.sources(), pending, need_version)?;
    let registry = claim_found(registry, &config, &scan);
    for name in &scan.found {
        shell.verbose(Status::Discovered, format!("package {}", name));
    }

    let version = config.general.version.clone().or_else(|| scan.version.clone());

    let path = ctx.project_settings_path();
    let settings = settings::reconcile(&path, &registry)?;
    match settings {
        SettingsWrite::Created => shell.status(Status::Wrote, ctx.display_path(&path)),
        SettingsWrite::Updated => shell.status(Status::Updated, ctx.display_path(&path)),
        SettingsWrite::Unchanged => {}
    }

    Ok(Discovered {
        config,
        project,
        registry,
        scan,
        version,
        settings,
    })
}

/// Claim every discovered package.
///
/// A package the project remembers as unused comes back with its recorded
/// resolver id; any other takes the global default.
fn claim_found(mut registry: Registry, config: &ProjectConfig, scan: &ScanResult) -> Registry {
    for name in &scan.found {
        let id = config
            .recorded_unused_id(name.as_str())
            .or_else(|| registry.resolve(name.as_str()))
            .map(str::to_string);
        registry = match id {
            Some(id) => registry.claim_local(name.clone(), id),
            None => registry,
        };
    }
    registry
}

/// Discover, compile and, when distributing, assemble and archive.
pub fn build(ctx: &GlobalContext, opts: &BuildOptions, shell: &Shell) -> Result<BuildOutcome> {
    let discovered = discover(ctx, opts, shell)?;
    let project = &discovered.project;
    let general = &discovered.config.general;

    let compile_opts = CompileOptions {
        platform: opts.platform,
        console: opts.console,
    };
    let cmd =
        builder::compile_command(project, &discovered.registry, &general.compiler, compile_opts);
    shell.status(Status::Building, cmd.display_command());
    builder::compile(&cmd)?;

    let binary = project.binary_path(opts.platform);
    if !opts.distributing() {
        return Ok(BuildOutcome {
            discovered,
            binary,
            dist: None,
        });
    }

    let dist_dir = ctx.dist_dir();
    let roots = RuntimeRoots {
        toolchain_root: general.toolchain_root.clone(),
        runtime_prefix: general.runtime_prefix.clone(),
    };
    let req = DistRequest {
        root: project.root(),
        binary: &binary,
        dist_dir: &dist_dir,
        extra_files: &discovered.config.extra_files,
        rcedit: &general.rcedit,
        roots: &roots,
    };
    let mut manifest = dist::assemble(&req, &LddLister::new(&general.lister), shell)?;

    if opts.zip {
        let stem = dist::archive_stem(project.app_name(), discovered.version.as_deref());
        let archive = dist_dir.join(format!("{}.zip", stem));
        dist::create_archive(&dist_dir, &archive, &stem)?;
        shell.status(Status::Created, ctx.display_path(&archive));
        manifest.archive_path = Some(archive);
    }

    tracing::debug!("distribution: {:?}", manifest);
    let binary = manifest.binary_path.clone();
    Ok(BuildOutcome {
        discovered,
        binary,
        dist: Some(manifest),
    })
}

/// Run the built program with `args`.
///
/// Never fatal: problems are reported as warnings.
pub fn run_binary(binary: &Path, args: &[String], shell: &Shell) {
    let cmd = ProcessBuilder::new(binary).args(args);
    if !cmd.is_available() {
        shell.warn(VbWarning::ToolMissing {
            tool: binary.display().to_string(),
            consequence: "nothing was run".to_string(),
        });
        return;
    }

    shell.status(Status::Running, cmd.display_command());
    match cmd.status() {
        Ok(status) if status.success() => {}
        Ok(status) => shell.warn(VbWarning::RunFailure {
            binary: binary.to_path_buf(),
            code: status.code(),
        }),
        Err(_) => shell.warn(VbWarning::RunFailure {
            binary: binary.to_path_buf(),
            code: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ProjectFixture;
    use crate::util::shell::Verbosity;

    #[test]
    fn test_discover_writes_fresh_settings() {
        let fx = ProjectFixture::new()
            .with_source("hello.vala", "void main() { var m = new Gee.HashMap<int,int>(); }\n");
        let shell = Shell::capture(Verbosity::Normal);

        let found = discover(&fx.context(), &BuildOptions::default(), &shell).unwrap();

        assert_eq!(found.project.app_name(), "hello");
        assert_eq!(found.settings, SettingsWrite::Created);
        assert_eq!(
            fx.read("vb.ini"),
            "[General]\n\n[ExtraFiles]\n\n[Packages]\n# Gio = gio-2.0\n# Gtk = gtk+-3.0\nGee = gee-0.8\n"
        );
        assert_eq!(shell.captured(), vec!["Wrote: vb.ini"]);
    }

    #[test]
    fn test_second_discovery_is_idempotent() {
        let fx = ProjectFixture::new()
            .with_source("hello.vala", "Gtk.Window w;\nvar f = File.new_for_path(p);\n");
        let shell = Shell::capture(Verbosity::Quiet);
        let ctx = fx.context();

        discover(&ctx, &BuildOptions::default(), &shell).unwrap();
        let first = fx.read("vb.ini");
        let again = discover(&ctx, &BuildOptions::default(), &shell).unwrap();

        assert_eq!(again.settings, SettingsWrite::Unchanged);
        assert_eq!(fx.read("vb.ini"), first);
        assert!(again.registry.is_active("Gtk"));
        assert!(again.registry.is_active("Gio"));
    }

    #[test]
    fn test_unused_record_keeps_its_id() {
        let fx = ProjectFixture::new()
            .with_source("hello.vala", "void main() {}\n")
            .with_file("vb.ini", "[General]\n\n[Packages]\n# Gee = gee-0.6\n");
        let shell = Shell::capture(Verbosity::Quiet);

        let found = discover(&fx.context(), &BuildOptions::default(), &shell).unwrap();
        assert!(!found.registry.is_active("Gee"));
        assert!(fx.read("vb.ini").contains("# Gee = gee-0.6\n"));
        assert!(!fx.read("vb.ini").contains("gee-0.8"));
    }

    #[test]
    fn test_rediscovered_record_activates_with_its_id() {
        let fx = ProjectFixture::new()
            .with_source("hello.vala", "Gee.List l;\n")
            .with_file("vb.ini", "[Packages]\n# Gee = gee-0.6\n");
        let shell = Shell::capture(Verbosity::Quiet);

        let found = discover(&fx.context(), &BuildOptions::default(), &shell).unwrap();
        assert_eq!(found.registry.resolve("Gee"), Some("gee-0.6"));
        assert!(fx.read("vb.ini").contains("\nGee = gee-0.6\n"));
    }

    #[test]
    fn test_local_override_is_not_pending() {
        let fx = ProjectFixture::new()
            .with_source("hello.vala", "void main() {}\n")
            .with_file("vb.ini", "[Packages]\nGtk = gtk4\n");
        let shell = Shell::capture(Verbosity::Quiet);

        let found = discover(&fx.context(), &BuildOptions::default(), &shell).unwrap();
        assert!(!found.registry.is_global("Gtk"));
        assert_eq!(found.registry.resolve("Gtk"), Some("gtk4"));
        assert!(!fx.read("vb.ini").contains("gtk+-3.0"));
    }

    #[test]
    fn test_master_packages_replace_defaults() {
        let fx = ProjectFixture::new()
            .with_master_settings("[Packages]\njson = json-glib-1.0\n")
            .with_source("hello.vala", "var p = new Json.Parser();\nGee.List l;\n");
        let shell = Shell::capture(Verbosity::Quiet);

        discover(&fx.context(), &BuildOptions::default(), &shell).unwrap();
        assert_eq!(
            fx.read("vb.ini"),
            "[General]\n\n[ExtraFiles]\n\n[Packages]\nJson = json-glib-1.0\n"
        );
    }

    #[test]
    fn test_version_wanted_only_for_archives() {
        let fx = ProjectFixture::new()
            .with_source("a.vala", "void main() {}\n")
            .with_source("b.vala", "const string VERSION = \"2.1.0\";\n");
        let shell = Shell::capture(Verbosity::Quiet);
        let opts = BuildOptions {
            zip: true,
            dist: true,
            ..BuildOptions::default()
        };

        let found = discover(&fx.context(), &opts, &shell).unwrap();
        assert_eq!(found.version.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn test_zip_implies_distribution() {
        let unix = |zip, dist| BuildOptions {
            zip,
            dist,
            platform: TargetPlatform::Unix,
            ..BuildOptions::default()
        };
        assert!(!unix(false, false).distributing());
        assert!(unix(false, true).distributing());
        assert!(unix(true, false).distributing());

        let windows = BuildOptions {
            platform: TargetPlatform::Windows,
            ..BuildOptions::default()
        };
        assert!(windows.distributing());
    }

    #[test]
    fn test_no_sources_writes_nothing() {
        let fx = ProjectFixture::new();
        let shell = Shell::capture(Verbosity::Quiet);

        let err = discover(&fx.context(), &BuildOptions::default(), &shell).unwrap_err();
        assert!(err.to_string().starts_with("no .vala files found"));
        assert!(!fx.path("vb.ini").exists());
    }

    #[test]
    fn test_build_fails_without_compiler() {
        let fx = ProjectFixture::new()
            .with_source("hello.vala", "void main() {}\n")
            .with_file("vb.ini", "[General]\ncompiler = vb-no-such-valac\n");
        let shell = Shell::capture(Verbosity::Quiet);

        let err = build(&fx.context(), &BuildOptions::default(), &shell).unwrap_err();
        assert!(err.to_string().starts_with("failed to build `vb-no-such-valac -o hello"));
        // Settings are reconciled before compiling.
        assert!(fx.read("vb.ini").contains("[Packages]\n"));
    }

    #[test]
    fn test_run_missing_binary_warns() {
        let shell = Shell::capture(Verbosity::Quiet);
        run_binary(Path::new("/nonexistent/hello"), &[], &shell);
        let lines = shell.captured();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("warning: failed to find /nonexistent/hello"));
    }
}
