//! `vb ini` command
//!
//! Prints a description of the settings files.

use anyhow::Result;

const SETTINGS_HELP: &str = "\
vb reads an optional master settings file, the first of:
    ~/.config/vbglobal.ini
    ~/.vbglobal.ini
    ~/vbglobal.ini
and then the project's ./vb.ini, which vb creates and keeps up to date.

Both use the same format. Lines starting with # are comments.

[General]
appname = NAME        default: the single .vala file's stem, else the
                      directory name (prefer leaving this unset)
version = VERSION     default: const string VERSION = \"...\"; in the source
compiler = valac
lister = ldd
winrcedit = C:/bin/rcedit.exe
winmsys2 = C:/bin/msys64
winruntime = /mingw64

[ExtraFiles]
One file name or glob pattern per line, copied into dist/.
Without this section README and LICENSE are copied (also as .txt or .md).
An empty section copies nothing.

[Packages]
Name = pkg-config-id
In the master file these are the global defaults, e.g.
    Gee = gee-0.8
    Gio = gio-2.0
    Gtk = gtk+-3.0
In vb.ini active lines are linked; commented lines (# Name = id) are known
but unused, and keep their id for when the package is used again.

[AppTemplate], [GUITemplate], [LibTemplate]
Raw source used by `vb new`, `vb new --gui` and `vb new --lib`.
#YEAR#, #APPNAME# and #USER# are substituted. No template line may start
with [.
";

pub fn execute() -> Result<()> {
    print!("{}", SETTINGS_HELP);
    Ok(())
}
