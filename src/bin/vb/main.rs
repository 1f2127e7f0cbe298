//! vb CLI - build, run and package Vala applications

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands, RunArgs};
use vb::util::Shell;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose && !cli.quiet {
        EnvFilter::new("vb=debug")
    } else {
        EnvFilter::new("vb=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose);

    // Execute command; plain `vb` builds and runs
    match cli.command.unwrap_or(Commands::Run(RunArgs::default())) {
        Commands::Run(args) => commands::run::execute(args, &shell),
        Commands::Build(args) => commands::build::execute(args, &shell),
        Commands::Clean => commands::clean::execute(&shell),
        Commands::New(args) => commands::new::execute(args, &shell),
        Commands::Ini => commands::ini::execute(),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
