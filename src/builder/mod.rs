//! Compiling a project.
//!
//! A build is exactly one compiler invocation over every source file, with
//! one `--pkg` flag per claimed package.

pub mod valac;

use anyhow::Result;

use crate::core::errors::VbError;
use crate::core::platform::TargetPlatform;
use crate::core::project::Project;
use crate::core::registry::{Registry, GUI_PACKAGE};
use crate::util::fs::relative_path;
use crate::util::process::ProcessBuilder;

pub use valac::ValacCommand;

/// Options that change the compiler command line.
#[derive(Debug, Clone, Copy)]
pub struct BuildOptions {
    pub platform: TargetPlatform,
    /// Keep the console window for GUI programs on Windows.
    pub console: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            platform: TargetPlatform::current(),
            console: false,
        }
    }
}

/// Build the compiler command for `project`.
///
/// Packages are passed in name order. On Windows a GUI program (one that
/// uses the GUI package) is linked without a console window unless
/// `console` is set.
pub fn compile_command(
    project: &Project,
    registry: &Registry,
    compiler: &str,
    opts: BuildOptions,
) -> ProcessBuilder {
    let binary = opts.platform.exe_name(project.app_name());
    let hide_console =
        opts.platform.is_windows() && registry.is_active(GUI_PACKAGE) && !opts.console;

    let mut cmd = ValacCommand::new(compiler, binary).hide_console(hide_console);
    for id in registry.active().values() {
        cmd = cmd.package(id);
    }
    for source in project.sources() {
        cmd = cmd.source(relative_path(project.root(), source));
    }
    cmd.to_process(project.root())
}

/// Run the compiler. Any failure is a [`VbError::Build`].
pub fn compile(cmd: &ProcessBuilder) -> Result<()> {
    let command = cmd.display_command();
    if !cmd.is_available() {
        return Err(VbError::Build {
            command,
            reason: "compiler not found".to_string(),
        }
        .into());
    }

    let status = cmd.status().map_err(|e| VbError::Build {
        command: command.clone(),
        reason: format!("{:#}", e),
    })?;

    if !status.success() {
        let reason = match status.code() {
            Some(code) => format!("exit code {}", code),
            None => "terminated by signal".to_string(),
        };
        return Err(VbError::Build { command, reason }.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::package::PackageName;
    use crate::settings::GeneralSettings;
    use tempfile::TempDir;

    fn project(tmp: &TempDir) -> Project {
        std::fs::write(tmp.path().join("hello.vala"), "").unwrap();
        Project::discover(tmp.path(), &GeneralSettings::default()).unwrap()
    }

    fn gui_registry() -> Registry {
        Registry::with_defaults()
            .claim_default(&PackageName::new("Gtk"))
            .claim_default(&PackageName::new("Gee"))
    }

    #[test]
    fn test_windows_gui_build_hides_console() {
        let tmp = TempDir::new().unwrap();
        let opts = BuildOptions {
            platform: TargetPlatform::Windows,
            console: false,
        };
        let cmd = compile_command(&project(&tmp), &gui_registry(), "valac", opts);
        assert_eq!(
            cmd.get_args(),
            &[
                "-o",
                "hello.exe",
                "-X",
                "-mwindows",
                "--pkg",
                "gee-0.8",
                "--pkg",
                "gtk+-3.0",
                "hello.vala"
            ]
        );
    }

    #[test]
    fn test_console_flag_and_unix() {
        let tmp = TempDir::new().unwrap();
        let project = project(&tmp);

        let console = BuildOptions {
            platform: TargetPlatform::Windows,
            console: true,
        };
        let cmd = compile_command(&project, &gui_registry(), "valac", console);
        assert!(!cmd.get_args().iter().any(|a| a == "-mwindows"));

        let unix = BuildOptions {
            platform: TargetPlatform::Unix,
            console: false,
        };
        let cmd = compile_command(&project, &gui_registry(), "valac", unix);
        assert_eq!(cmd.get_args()[1], "hello");
        assert!(!cmd.get_args().iter().any(|a| a == "-mwindows"));
    }

    #[test]
    fn test_missing_compiler_is_build_error() {
        let tmp = TempDir::new().unwrap();
        let cmd = compile_command(
            &project(&tmp),
            &Registry::empty(),
            "vb-no-such-compiler",
            BuildOptions::default(),
        );
        let err = compile(&cmd).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<VbError>(),
            Some(VbError::Build { .. })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn test_failing_compiler_is_build_error() {
        let tmp = TempDir::new().unwrap();
        let cmd = compile_command(
            &project(&tmp),
            &Registry::empty(),
            "false",
            BuildOptions::default(),
        );
        let err = compile(&cmd).unwrap_err();
        match err.downcast_ref::<VbError>() {
            Some(VbError::Build { reason, .. }) => assert_eq!(reason, "exit code 1"),
            other => panic!("expected a build error, got {:?}", other),
        }
    }
}
