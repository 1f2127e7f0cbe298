//! `vb clean` command

use anyhow::Result;

use vb::core::TargetPlatform;
use vb::ops;
use vb::util::{GlobalContext, Shell};

pub fn execute(shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;
    ops::clean(&ctx, TargetPlatform::current(), shell)?;
    Ok(())
}
