//! `vb build` command

use anyhow::Result;

use crate::cli::BuildArgs;
use vb::core::TargetPlatform;
use vb::ops::{self, BuildOptions};
use vb::util::{GlobalContext, Shell};

pub fn options(args: &BuildArgs) -> BuildOptions {
    BuildOptions {
        console: args.console,
        zip: args.zip,
        dist: args.dist,
        platform: TargetPlatform::current(),
    }
}

pub fn execute(args: BuildArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    ops::build(&ctx, &options(&args), shell)?;
    Ok(())
}
