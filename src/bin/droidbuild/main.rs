//! droidbuild CLI - builds the Android OCR library

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use droidbuild::util::Shell;
use droidbuild::BuildError;

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        let code = e
            .downcast_ref::<BuildError>()
            .map(BuildError::exit_code)
            .unwrap_or(1);
        std::process::exit(code);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("droidbuild=debug")
    } else {
        EnvFilter::new("droidbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    let shell = Shell::from_flags(cli.quiet, cli.verbose, cli.color);
    let config_path = cli.config.as_deref();

    // Execute command
    match cli.command {
        Some(Commands::Build(args)) => commands::build::execute(args, config_path, &shell),
        None => commands::build::execute(Default::default(), config_path, &shell),
        Some(Commands::Locate(args)) => commands::locate::execute(args, config_path),
        Some(Commands::Doctor) => commands::doctor::execute(config_path, shell.is_verbose()),
        Some(Commands::Completions(args)) => commands::completions::execute(args),
    }
}
