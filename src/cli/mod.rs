//! Command-line surface: argument definitions and per-subcommand handlers.

use clap::{Parser, Subcommand};

pub mod handlers;

/// mason: a minimal build-description engine.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// The available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Expands every command template over its configuration tree and
    /// prints the rendered variants.
    Expand(handlers::expand::ExpandArgs),
    /// Prints the rule table of a build manifest.
    Rules(handlers::rules::RulesArgs),
    /// Exports the rule graph as a JSON document and an interactive HTML page.
    Graph(handlers::graph::GraphArgs),
}
