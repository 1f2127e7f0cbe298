//! Implementation of `vb clean`.

use anyhow::Result;

use crate::core::platform::TargetPlatform;
use crate::core::project::Project;
use crate::ops::vb_build::load_settings;
use crate::util::fs::{remove_dir_all_if_exists, remove_file_if_exists};
use crate::util::shell::{Shell, Status};
use crate::util::GlobalContext;

/// Delete the built binary and the distribution directory.
///
/// Missing files are not an error. Returns whether anything was removed.
pub fn clean(ctx: &GlobalContext, platform: TargetPlatform, shell: &Shell) -> Result<bool> {
    let (config, _) = load_settings(ctx, shell)?;
    let project = Project::discover(ctx.cwd(), &config.general)?;

    let mut removed = false;
    let dist = ctx.dist_dir();
    if remove_dir_all_if_exists(&dist)? {
        shell.status(Status::Removed, ctx.display_path(&dist));
        removed = true;
    }

    let binary = project.binary_path(platform);
    if remove_file_if_exists(&binary)? {
        shell.status(Status::Removed, ctx.display_path(&binary));
        removed = true;
    }
    Ok(removed)
}
