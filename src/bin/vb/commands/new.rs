//! `vb new` command

use anyhow::Result;

use crate::cli::NewArgs;
use vb::ops::{self, NewOptions};
use vb::settings::TemplateKind;
use vb::util::{GlobalContext, Shell};

pub fn execute(args: NewArgs, shell: &Shell) -> Result<()> {
    let ctx = GlobalContext::new()?;

    let kind = if args.gui {
        TemplateKind::Gui
    } else if args.lib {
        TemplateKind::Lib
    } else {
        TemplateKind::Console
    };
    let opts = NewOptions {
        vcs: !args.no_vcs,
        ..NewOptions::new(args.name, kind)
    };

    ops::new_project(&ctx, &opts, shell)?;
    Ok(())
}
