//! Implementation of `vb new`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::Datelike;

use crate::core::package::PackageName;
use crate::core::registry::{Registry, GUI_PACKAGE};
use crate::ops::vcs;
use crate::settings::{
    load_master, new_settings_text, ProjectConfig, TemplateKind, PROJECT_SETTINGS_NAME,
};
use crate::util::fs::write_string;
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Where the GPL text is installed on Debian-like systems.
pub const SYSTEM_LICENSE: &str = "/usr/share/common-licenses/GPL-3";

/// Options for creating a new project.
#[derive(Debug, Clone)]
pub struct NewOptions {
    /// Project name
    pub name: String,

    /// Which template to start from
    pub kind: TemplateKind,

    /// Create a git repository
    pub vcs: bool,

    /// License text to copy; skipped with a warning when missing
    pub license: PathBuf,
}

impl NewOptions {
    pub fn new(name: impl Into<String>, kind: TemplateKind) -> Self {
        NewOptions {
            name: name.into(),
            kind,
            vcs: true,
            license: PathBuf::from(SYSTEM_LICENSE),
        }
    }
}

/// Create `<cwd>/<name>` from the configured template.
pub fn new_project(ctx: &GlobalContext, opts: &NewOptions, shell: &Shell) -> Result<PathBuf> {
    let path = ctx.cwd().join(&opts.name);
    if path.exists() {
        bail!("destination `{}` already exists", path.display());
    }

    let mut config = ProjectConfig::default();
    let (registry, _) = load_master(&ctx.master_settings_candidates(), ctx.cwd(), &mut config)?;

    let template = config.templates.get(opts.kind);
    if template.trim().is_empty() {
        bail!(
            "no {} is configured\n\
             add a [{}] section to the master settings file",
            describe(opts.kind),
            opts.kind.section_name()
        );
    }

    fs::create_dir_all(&path)
        .with_context(|| format!("failed to create directory: {}", path.display()))?;

    write_string(&path.join(".gitignore"), &gitignore(ctx.home(), &opts.name))?;
    write_string(
        &path.join(format!("{}.vala", opts.name)),
        &fill_template(template, &opts.name, chrono::Local::now().year(), &user_name()),
    )?;
    write_string(
        &path.join(PROJECT_SETTINGS_NAME),
        &new_settings_text(&initial_registry(registry, opts.kind)),
    )?;
    write_string(&path.join("README.md"), &readme(&opts.name))?;

    if opts.license.is_file() {
        fs::copy(&opts.license, path.join("LICENSE"))
            .with_context(|| format!("failed to copy {}", opts.license.display()))?;
    } else {
        shell.warn(format!(
            "failed to find {} so no LICENSE was created",
            opts.license.display()
        ));
    }

    if opts.vcs {
        vcs::init_repository(&path, shell);
    }

    shell.status(
        Status::Created,
        format!("{} `{}`", describe(opts.kind), opts.name),
    );
    Ok(path)
}

fn describe(kind: TemplateKind) -> &'static str {
    match kind {
        TemplateKind::Console => "console application",
        TemplateKind::Gui => "GUI application",
        TemplateKind::Lib => "library template",
    }
}

/// Substitute `#YEAR#`, `#APPNAME#` and `#USER#`.
pub fn fill_template(template: &str, app_name: &str, year: i32, user: &str) -> String {
    template
        .replace("#YEAR#", &year.to_string())
        .replace("#APPNAME#", app_name)
        .replace("#USER#", user)
}

/// GUI projects start with the GUI package active.
fn initial_registry(registry: Registry, kind: TemplateKind) -> Registry {
    match kind {
        TemplateKind::Gui => registry.claim_default(&PackageName::new(GUI_PACKAGE)),
        TemplateKind::Console | TemplateKind::Lib => registry,
    }
}

/// The user's own `~/.gitignore`, followed by the project's outputs.
fn gitignore(home: Option<&Path>, name: &str) -> String {
    let mut text = home
        .and_then(|home| fs::read_to_string(home.join(".gitignore")).ok())
        .unwrap_or_default();
    if !text.is_empty() && !text.ends_with('\n') {
        text.push('\n');
    }
    text.push_str(&format!("{name}\n{name}.exe\ndist/\n"));
    text
}

fn readme(name: &str) -> String {
    format!("# {}\n\n\n?\n\n## License\n\nGPLv3\n\n---\n", name)
}

fn user_name() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::shell::Verbosity;
    use tempfile::TempDir;

    fn context(tmp: &TempDir) -> GlobalContext {
        let home = tmp.path().join("home");
        let work = tmp.path().join("work");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&work).unwrap();
        GlobalContext::with_paths(work, Some(home))
    }

    fn offline(name: &str, kind: TemplateKind, tmp: &TempDir) -> NewOptions {
        NewOptions {
            vcs: false,
            license: tmp.path().join("no-license"),
            ..NewOptions::new(name, kind)
        }
    }

    #[test]
    fn test_fill_template() {
        let template = "// (c) #YEAR# #USER#\nconst string APPNAME = \"#APPNAME#\";\n";
        let text = fill_template(template, "hi", 2026, "mark");
        assert_eq!(text, "// (c) 2026 mark\nconst string APPNAME = \"hi\";\n");
    }

    #[test]
    fn test_new_console_project() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        fs::write(ctx.home().unwrap().join(".gitignore"), "*.swp").unwrap();
        let shell = Shell::capture(Verbosity::Normal);

        let opts = offline("hello", TemplateKind::Console, &tmp);
        let path = new_project(&ctx, &opts, &shell).unwrap();

        assert_eq!(path, ctx.cwd().join("hello"));
        let vala = fs::read_to_string(path.join("hello.vala")).unwrap();
        assert!(vala.contains("const string APPNAME = \"hello\";"));
        assert!(!vala.contains("#APPNAME#"));
        assert!(!vala.contains("#YEAR#"));
        assert_eq!(
            fs::read_to_string(path.join(".gitignore")).unwrap(),
            "*.swp\nhello\nhello.exe\ndist/\n"
        );
        assert_eq!(
            fs::read_to_string(path.join("vb.ini")).unwrap(),
            "[General]\n\n[ExtraFiles]\n\n[Packages]\n# Gee = gee-0.8\n# Gio = gio-2.0\n# Gtk = gtk+-3.0\n"
        );
        assert!(path.join("README.md").is_file());
        assert!(!path.join("LICENSE").exists());

        let lines = shell.captured();
        assert!(lines[0].starts_with("warning: failed to find"));
        assert_eq!(lines[1], "Created: console application `hello`");
    }

    #[test]
    fn test_new_gui_project_activates_gtk() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        let license = tmp.path().join("GPL-3");
        fs::write(&license, "GNU GENERAL PUBLIC LICENSE").unwrap();
        let opts = NewOptions {
            license,
            ..offline("paint", TemplateKind::Gui, &tmp)
        };

        let path = new_project(&ctx, &opts, &Shell::capture(Verbosity::Quiet)).unwrap();

        let ini = fs::read_to_string(path.join("vb.ini")).unwrap();
        assert!(ini.contains("\nGtk = gtk+-3.0\n"));
        assert!(ini.contains("# Gee = gee-0.8\n"));
        assert!(fs::read_to_string(path.join("paint.vala")).unwrap().contains("Gtk.init"));
        assert_eq!(
            fs::read_to_string(path.join("LICENSE")).unwrap(),
            "GNU GENERAL PUBLIC LICENSE"
        );
    }

    #[test]
    fn test_new_refuses_existing_destination() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        fs::create_dir(ctx.cwd().join("taken")).unwrap();

        let err = new_project(
            &ctx,
            &offline("taken", TemplateKind::Console, &tmp),
            &Shell::capture(Verbosity::Quiet),
        )
        .unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_empty_library_template_is_error() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);

        let err = new_project(
            &ctx,
            &offline("mylib", TemplateKind::Lib, &tmp),
            &Shell::capture(Verbosity::Quiet),
        )
        .unwrap_err();
        assert!(err.to_string().starts_with("no library template is configured"));
        assert!(!ctx.cwd().join("mylib").exists());
    }

    #[test]
    fn test_library_template_from_master_settings() {
        let tmp = TempDir::new().unwrap();
        let ctx = context(&tmp);
        fs::write(
            ctx.home().unwrap().join(".vbglobal.ini"),
            "[LibTemplate]\nnamespace #APPNAME# {\n}\n",
        )
        .unwrap();

        let path = new_project(
            &ctx,
            &offline("mylib", TemplateKind::Lib, &tmp),
            &Shell::capture(Verbosity::Quiet),
        )
        .unwrap();
        assert_eq!(
            fs::read_to_string(path.join("mylib.vala")).unwrap(),
            "namespace mylib {\n}\n"
        );
    }
}
