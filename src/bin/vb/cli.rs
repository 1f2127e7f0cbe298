//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand};

/// vb - build, run and package Vala applications
///
/// Compiles every .vala file in the current directory, linking the packages
/// the sources use, and keeps vb.ini up to date with them.
#[derive(Parser)]
#[command(name = "vb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Only print warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Defaults to `run`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the project, then run it
    Run(RunArgs),

    /// Build the project
    Build(BuildArgs),

    /// Remove the built program and the dist directory
    Clean,

    /// Create a new project in a new directory
    New(NewArgs),

    /// Describe the settings files
    Ini,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Default)]
pub struct BuildArgs {
    /// Keep the console window of a GUI program (Windows)
    #[arg(long)]
    pub console: bool,

    /// Archive the dist directory as <app>[-<version>].zip (implies --dist)
    #[arg(long)]
    pub zip: bool,

    /// Assemble the dist directory even when not on Windows
    #[arg(long)]
    pub dist: bool,
}

#[derive(Args, Default)]
pub struct RunArgs {
    #[command(flatten)]
    pub build: BuildArgs,

    /// Arguments for the program
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

#[derive(Args)]
pub struct NewArgs {
    /// Project name
    pub name: String,

    /// Start from the GUI template
    #[arg(long, conflicts_with = "lib")]
    pub gui: bool,

    /// Start from the library template
    #[arg(long)]
    pub lib: bool,

    /// Do not create a git repository
    #[arg(long)]
    pub no_vcs: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
