//! Vala compiler command line.

use std::path::{Path, PathBuf};

use crate::util::process::ProcessBuilder;

/// One `valac` invocation producing one binary.
#[derive(Debug, Clone)]
pub struct ValacCommand {
    compiler: String,
    output: PathBuf,
    packages: Vec<String>,
    sources: Vec<PathBuf>,
    hide_console: bool,
}

impl ValacCommand {
    pub fn new(compiler: impl Into<String>, output: impl Into<PathBuf>) -> Self {
        ValacCommand {
            compiler: compiler.into(),
            output: output.into(),
            packages: Vec::new(),
            sources: Vec::new(),
            hide_console: false,
        }
    }

    /// Link against a package by its resolver id.
    pub fn package(mut self, resolver_id: impl Into<String>) -> Self {
        self.packages.push(resolver_id.into());
        self
    }

    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Ask the C compiler for a GUI-subsystem binary (no console window).
    pub fn hide_console(mut self, hide: bool) -> Self {
        self.hide_console = hide;
        self
    }

    /// The process to run from `cwd`.
    pub fn to_process(&self, cwd: &Path) -> ProcessBuilder {
        let mut pb = ProcessBuilder::new(&self.compiler)
            .cwd(cwd)
            .arg("-o")
            .arg(&self.output);

        if self.hide_console {
            pb = pb.args(["-X", "-mwindows"]);
        }

        for id in &self.packages {
            pb = pb.arg("--pkg").arg(id);
        }

        pb.args(&self.sources)
    }
}
