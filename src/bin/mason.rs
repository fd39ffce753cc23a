// src/bin/mason.rs

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use mason::cli::{Cli, Commands, handlers};

/// The main entry point of the `mason` binary.
/// It sets up logging, parses arguments, dispatches to the matching
/// handler, and performs centralized error handling.
fn main() {
    env_logger::init();

    if let Err(e) = run_cli(Cli::parse()) {
        eprintln!("\n{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> Result<()> {
    log::debug!("CLI args parsed: {:?}", cli);

    match cli.command {
        Commands::Expand(args) => handlers::expand::handle(&args),
        Commands::Rules(args) => handlers::rules::handle(&args),
        Commands::Graph(args) => handlers::graph::handle(&args),
    }
}
