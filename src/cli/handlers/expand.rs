use anyhow::{Context, Result, anyhow};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;

use crate::{
    constants,
    core::{expander, formatter::ResolveMode, manifest},
    models::CommandSpec,
};

/// Arguments for the `expand` subcommand.
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Path to the build manifest.
    #[arg(default_value = constants::MANIFEST_FILENAME)]
    pub manifest: PathBuf,

    /// Only expand the named command.
    #[arg(long, short)]
    pub command: Option<String>,

    /// Strict resolution: variants missing a required key are dropped
    /// instead of rendered with empty substitutions.
    #[arg(long)]
    pub strict: bool,
}

pub fn handle(args: &ExpandArgs) -> Result<()> {
    let manifest = manifest::load_manifest(&args.manifest)
        .with_context(|| format!("Failed to load build manifest '{}'", args.manifest.display()))?;

    let mode = if args.strict {
        ResolveMode::Strict
    } else {
        ResolveMode::Partial
    };

    // Sort for stable output; the manifest model does not order commands.
    let mut names: Vec<&String> = manifest.commands.keys().collect();
    names.sort();

    if let Some(wanted) = &args.command {
        if !manifest.commands.contains_key(wanted) {
            return Err(anyhow!(
                "Command '{}' is not defined in '{}'",
                wanted,
                args.manifest.display()
            ));
        }
        names.retain(|name| *name == wanted);
    }

    for name in names {
        let spec: &CommandSpec = manifest
            .commands
            .get(name)
            .ok_or_else(|| anyhow!("Command '{}' disappeared from the manifest", name))?;
        let variants = expander::expand_template(&spec.template, &spec.config, mode)
            .with_context(|| format!("Failed to expand command '{}'", name))?;

        println!("\n{}", name.cyan().bold());
        if variants.is_empty() {
            println!("  {}", "(no variant resolved)".dimmed());
            continue;
        }
        for variant in &variants {
            println!("  [{}] {}", variant.path.join("/").green(), variant.text);
        }
    }

    Ok(())
}
