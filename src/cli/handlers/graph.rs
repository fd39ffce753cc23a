use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::{
    constants,
    core::{graph_export::RuleGraph, manifest},
};

/// Arguments for the `graph` subcommand.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Path to the build manifest.
    #[arg(default_value = constants::MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// Output path for the JSON document.
    #[arg(long, default_value = constants::GRAPH_JSON_FILENAME)]
    pub json: PathBuf,

    /// Output path for the self-contained HTML page.
    #[arg(long, default_value = constants::GRAPH_HTML_FILENAME)]
    pub html: PathBuf,

    /// Label embedded in the graph document.
    #[arg(long, default_value = "Build rule graph")]
    pub label: String,
}

pub fn handle(args: &GraphArgs) -> Result<()> {
    let store = manifest::load_store(&args.manifest)
        .with_context(|| format!("Failed to load build manifest '{}'", args.manifest.display()))?;

    let graph = RuleGraph::from_store(&store);
    graph.write_json(&args.json, &args.label)?;
    graph.write_html(&args.html, &args.label)?;

    println!(
        "Rule graph written to {} and {}.",
        args.json.display().to_string().cyan(),
        args.html.display().to_string().cyan()
    );

    Ok(())
}
