use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::{constants, core::manifest};

/// Arguments for the `rules` subcommand.
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Path to the build manifest.
    #[arg(default_value = constants::MANIFEST_FILENAME)]
    pub manifest: PathBuf,
}

pub fn handle(args: &RulesArgs) -> Result<()> {
    let store = manifest::load_store(&args.manifest)
        .with_context(|| format!("Failed to load build manifest '{}'", args.manifest.display()))?;

    if store.rules().is_empty() {
        println!("No rules defined in '{}'.", args.manifest.display());
        return Ok(());
    }

    println!("\nRules in '{}':", args.manifest.display());
    for rule in store.rules() {
        // Flag rules whose command name has no registry entry; they are
        // legal, but worth surfacing.
        let marker = if store.command(&rule.command).is_some() {
            String::new()
        } else {
            format!(" {}", "(command not registered)".yellow())
        };
        println!(
            "  {} -> {}  via {}{}",
            rule.input,
            rule.output,
            rule.command.cyan(),
            marker
        );
    }

    Ok(())
}
