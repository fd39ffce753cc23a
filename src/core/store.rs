//! # Build Store
//!
//! The owned container for a build description: the command registry
//! (command name → rendered variant list) and the append-only rule table.
//! A store is constructed by the caller and passed by reference, so
//! independent build sessions and tests never share state.

use crate::{
    core::{
        expander::{self, ExpandError},
        formatter::ResolveMode,
    },
    models::{ConfigTree, RenderedCommand, Rule},
};
use std::collections::HashMap;

/// In-memory registry of expanded commands and build rules.
///
/// Registration is atomic with respect to readers holding the store: the
/// full variant list is built before it is inserted, and a failed
/// registration leaves the store untouched.
#[derive(Debug, Clone, Default)]
pub struct BuildStore {
    commands: HashMap<String, Vec<RenderedCommand>>,
    rules: Vec<Rule>,
}

impl BuildStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Expands `template` over `config` and stores the result under `name`,
    /// replacing any prior entry for that name.
    ///
    /// Expansion always runs in partial mode: registration never discards a
    /// variant because a key is missing. The only input error is an empty
    /// configuration tree (or a syntactically invalid template).
    pub fn register_command(
        &mut self,
        name: &str,
        template: &str,
        config: &ConfigTree,
    ) -> Result<(), ExpandError> {
        let variants = expander::expand_template(template, config, ResolveMode::Partial)?;
        log::debug!(
            "Registering command '{}' with {} variant(s)",
            name,
            variants.len()
        );
        self.commands.insert(name.to_string(), variants);
        Ok(())
    }

    /// Appends a rule unconditionally. No deduplication, and no check that
    /// `command` names a registered command; binding a rule to a concrete
    /// variant is the job of a higher-level build driver.
    pub fn add_rule(
        &mut self,
        input: impl Into<String>,
        output: impl Into<String>,
        command: impl Into<String>,
    ) {
        let rule = Rule {
            input: input.into(),
            output: output.into(),
            command: command.into(),
        };
        log::trace!(
            "Adding rule: {} -> {} via '{}'",
            rule.input,
            rule.output,
            rule.command
        );
        self.rules.push(rule);
    }

    /// Returns the rendered variants registered under `name`, if any.
    pub fn command(&self, name: &str) -> Option<&[RenderedCommand]> {
        self.commands.get(name).map(Vec::as_slice)
    }

    /// Iterates every registered command with its variant list.
    pub fn commands(&self) -> impl Iterator<Item = (&str, &[RenderedCommand])> {
        self.commands
            .iter()
            .map(|(name, variants)| (name.as_str(), variants.as_slice()))
    }

    /// The rule table, in append order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}
