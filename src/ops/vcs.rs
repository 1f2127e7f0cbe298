//! Version-control bootstrap for new projects.

use std::path::Path;

use crate::core::errors::VbWarning;
use crate::util::process::ProcessBuilder;
use crate::util::shell::Shell;

const GIT: &str = "git";

/// `git` invocations run in order, each with a short description.
const BOOTSTRAP_STEPS: &[(&[&str], &str)] = &[
    (&["init", "-q"], "git init"),
    (&["add", "."], "git add ."),
    (&["commit", "-q", "-m", "started"], "git commit"),
];

/// Create a repository in `dir` and commit everything in it.
///
/// Every step is warn-only. Returns whether all steps succeeded.
pub fn init_repository(dir: &Path, shell: &Shell) -> bool {
    if !ProcessBuilder::new(GIT).is_available() {
        shell.warn(VbWarning::ToolMissing {
            tool: GIT.to_string(),
            consequence: "no repository was created".to_string(),
        });
        return false;
    }

    let mut ok = true;
    for (args, action) in BOOTSTRAP_STEPS {
        let cmd = ProcessBuilder::new(GIT).cwd(dir).args(args.iter());
        let succeeded = matches!(cmd.exec(), Ok(output) if output.status.success());
        if !succeeded {
            shell.warn(VbWarning::ToolFailed {
                action: action.to_string(),
            });
            ok = false;
        }
    }
    ok
}
