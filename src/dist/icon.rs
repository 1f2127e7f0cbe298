//! Embedding an application icon with a resource editor.

use std::path::{Path, PathBuf};

use crate::core::errors::VbWarning;
use crate::util::process::ProcessBuilder;

/// Icon locations, relative to the project root, in search order.
pub const ICON_CANDIDATES: &[&str] = &["icon.ico", "images/icon.ico"];

pub fn find_icon(root: &Path) -> Option<PathBuf> {
    ICON_CANDIDATES
        .iter()
        .map(|candidate| root.join(candidate))
        .find(|path| path.is_file())
}

/// Run `<rcedit> <binary> --set-icon <icon>`.
///
/// Never fatal: a missing editor or a failed run is returned as a warning.
pub fn embed_icon(rcedit: &Path, binary: &Path, icon: &Path) -> Result<(), VbWarning> {
    let cmd = ProcessBuilder::new(rcedit)
        .arg(binary)
        .arg("--set-icon")
        .arg(icon);

    if !cmd.is_available() {
        return Err(VbWarning::ToolMissing {
            tool: rcedit.display().to_string(),
            consequence: format!("no icon added to {}", binary.display()),
        });
    }

    match cmd.exec() {
        Ok(output) if output.status.success() => Ok(()),
        _ => Err(VbWarning::ToolFailed {
            action: format!("adding icon to {}", binary.display()),
        }),
    }
}
