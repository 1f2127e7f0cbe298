//! `vb run` command (the default)

use anyhow::Result;

use crate::cli::RunArgs;
use crate::commands::build::options;
use vb::ops;
use vb::util::{GlobalContext, Shell};

pub fn execute(args: RunArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    let outcome = ops::build(&ctx, &options(&args.build), shell)?;
    ops::run_binary(&outcome.binary, &args.args, shell);
    Ok(())
}
