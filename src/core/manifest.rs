//! # Manifest
//!
//! Loading of the TOML build manifest (`mason.toml`) and its conversion
//! into a populated [`BuildStore`]. The manifest is the single
//! user-facing description file: templated commands with their variant
//! trees, plus the rule list.

use crate::{
    core::store::BuildStore,
    models::BuildManifest,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};
use thiserror::Error;

/// Represents errors that can occur while reading a build manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    /// An I/O error occurred while reading the manifest file.
    #[error("I/O error while reading build manifest: {0}")]
    Io(#[from] std::io::Error),
    /// The TOML content of the manifest is invalid and could not be parsed.
    #[error("Failed to parse build manifest at '{path}': {source}")]
    TomlParse {
        /// The path to the file that failed to parse.
        path: std::path::PathBuf,
        /// The underlying parsing error from the `toml` crate.
        #[source]
        source: Box<toml::de::Error>,
    },
}

/// Reads and parses a build manifest from disk.
pub fn load_manifest(path: &Path) -> Result<BuildManifest> {
    log::debug!("Loading build manifest from '{}'", path.display());
    let content = fs::read_to_string(path).map_err(ManifestError::Io)?;
    let manifest: BuildManifest =
        toml::from_str(&content).map_err(|e| ManifestError::TomlParse {
            path: path.to_path_buf(),
            source: Box::new(e),
        })?;
    Ok(manifest)
}

/// Builds a [`BuildStore`] from a parsed manifest: every command is
/// registered (expanded in partial mode) and every rule is appended, with
/// error context naming the offending command.
pub fn build_store(manifest: &BuildManifest) -> Result<BuildStore> {
    let mut store = BuildStore::new();

    for (name, spec) in &manifest.commands {
        store
            .register_command(name, &spec.template, &spec.config)
            .with_context(|| format!("Failed to register command '{}'", name))?;
    }

    for rule in &manifest.rules {
        store.add_rule(&rule.input, &rule.output, &rule.command);
    }

    log::debug!(
        "Manifest produced {} command(s) and {} rule(s)",
        manifest.commands.len(),
        manifest.rules.len()
    );
    Ok(store)
}

/// Convenience wrapper: load a manifest and build its store in one step.
pub fn load_store(path: &Path) -> Result<BuildStore> {
    let manifest = load_manifest(path)
        .with_context(|| format!("Failed to load build manifest '{}'", path.display()))?;
    build_store(&manifest)
}
