//! # Expander
//!
//! The configuration tree walker. It traverses a [`ConfigTree`] depth-first
//! in insertion order, accumulating string settings into a per-path
//! snapshot, and attempts one template resolution per tree node. Each node
//! yields either a [`RenderedCommand`] or an explicit skip (when strict
//! resolution hits a missing key); skips never abort the traversal.

use crate::{
    core::formatter::{self, FormatError, ResolveMode},
    models::{ConfigSnapshot, ConfigTree, ConfigValue, RenderedCommand},
};
use thiserror::Error;

/// Represents errors that can occur while expanding a template over a
/// configuration tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExpandError {
    /// The root configuration tree had no entries.
    #[error("Config must not be empty")]
    EmptyConfig,
    /// The template itself is malformed. Missing-key conditions are handled
    /// per node and never surface through this variant.
    #[error(transparent)]
    Template(#[from] FormatError),
}

/// Expands `template` over every node of `config`, returning the rendered
/// command list in traversal order: each mapping level is visited in
/// insertion order, group children recurse before the level's own
/// resolution is attempted, and the root node itself (empty path) is never
/// recorded.
///
/// Snapshots are copied on descent, so settings contributed inside one
/// branch are invisible to its siblings. Settings at a level are visible to
/// group siblings that appear *after* them at the same level, which is what
/// "accumulated along the path" means under ordered iteration.
pub fn expand_template(
    template: &str,
    config: &ConfigTree,
    mode: ResolveMode,
) -> Result<Vec<RenderedCommand>, ExpandError> {
    if config.is_empty() {
        return Err(ExpandError::EmptyConfig);
    }

    let mut results = Vec::new();
    let mut snapshot = ConfigSnapshot::new();
    let mut path = Vec::new();
    walk(template, config, &mut snapshot, &mut path, mode, &mut results)?;

    log::debug!(
        "Expanded template into {} variant(s) ({:?} mode)",
        results.len(),
        mode
    );
    Ok(results)
}

/// One recursion step over `(subtree, snapshot, path)`.
fn walk(
    template: &str,
    subtree: &ConfigTree,
    snapshot: &mut ConfigSnapshot,
    path: &mut Vec<String>,
    mode: ResolveMode,
    results: &mut Vec<RenderedCommand>,
) -> Result<(), ExpandError> {
    for (key, value) in subtree.iter() {
        match value {
            ConfigValue::Group(child) => {
                // Copy-on-descend: the branch gets its own snapshot so its
                // settings never leak into siblings.
                let mut branch_snapshot = snapshot.clone();
                path.push(key.to_string());
                walk(template, child, &mut branch_snapshot, path, mode, results)?;
                path.pop();
            }
            ConfigValue::Setting(setting) => {
                snapshot.insert(key.to_string(), setting.clone());
            }
        }
    }

    // All entries of this level are merged in; now try to render this node.
    match formatter::resolve_template(template, snapshot, mode) {
        Ok(text) => {
            if path.is_empty() {
                // The root represents "no variant selected" and is never
                // recorded, even when it renders.
                log::trace!("Root snapshot rendered but is not recorded");
            } else {
                results.push(RenderedCommand {
                    path: path.clone(),
                    text,
                });
            }
        }
        Err(FormatError::MissingKey { name }) => {
            // Per-node outcome, not a failure: skip this node, keep walking.
            log::debug!(
                "Skipping variant '{}': missing required key '{}'",
                path.join("/"),
                name
            );
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The debug/release compiler tree used across the suite.
    fn clang_tree() -> ConfigTree {
        let mut debug = ConfigTree::new();
        debug.set("debug_symbols", "-g");
        debug.set("optimize", "-O0");
        debug.set("defines", "-DDEBUG");

        let mut release = ConfigTree::new();
        release.set("optimize", "-O2");
        release.set("defines", "-DNDEBUG");

        let mut tree = ConfigTree::new();
        tree.group("debug", debug);
        tree.group("release", release);
        tree
    }

    const CLANG_TEMPLATE: &str = "clang {debug_symbols} {optimize} {defines} {input} -o {output}";

    #[test]
    fn test_clang_scenario_partial_mode() {
        let commands =
            expand_template(CLANG_TEMPLATE, &clang_tree(), ResolveMode::Partial).unwrap();
        assert_eq!(
            commands,
            vec![
                RenderedCommand {
                    path: vec!["debug".to_string()],
                    text: "clang -g -O0 -DDEBUG {input} -o {output}".to_string(),
                },
                RenderedCommand {
                    path: vec!["release".to_string()],
                    // Doubled space: `debug_symbols` is absent in release.
                    text: "clang  -O2 -DNDEBUG {input} -o {output}".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_strict_mode_skips_incomplete_variants() {
        // `release` has no `debug_symbols`, so strict mode drops it but
        // still renders `debug`.
        let commands = expand_template(CLANG_TEMPLATE, &clang_tree(), ResolveMode::Strict).unwrap();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands.first().unwrap().path, vec!["debug".to_string()]);
    }

    #[test]
    fn test_delayed_only_template_is_unchanged_for_every_path() {
        let template = "cp {input} {output}";
        let commands = expand_template(template, &clang_tree(), ResolveMode::Strict).unwrap();
        assert_eq!(commands.len(), 2);
        assert!(commands.iter().all(|c| c.text == template));
    }

    #[test]
    fn test_empty_config_is_rejected() {
        let result = expand_template("anything", &ConfigTree::new(), ResolveMode::Partial);
        assert_eq!(result, Err(ExpandError::EmptyConfig));
    }

    #[test]
    fn test_root_path_is_never_recorded() {
        // A tree of only root-level settings renders fine at the root, but
        // the empty path must not appear in the output.
        let mut tree = ConfigTree::new();
        tree.set("optimize", "-O2");
        let commands = expand_template("clang {optimize}", &tree, ResolveMode::Strict).unwrap();
        assert!(commands.is_empty());
    }

    #[test]
    fn test_sibling_snapshots_are_independent() {
        let mut left = ConfigTree::new();
        left.set("flag", "-DLEFT");
        let mut right = ConfigTree::new();
        right.set("other", "-DRIGHT");

        let mut tree = ConfigTree::new();
        tree.group("left", left);
        tree.group("right", right);

        let commands = expand_template("cc {flag}{other}", &tree, ResolveMode::Partial).unwrap();
        assert_eq!(commands.len(), 2);
        // `right` must not see `left`'s flag.
        assert_eq!(commands.get(0).unwrap().text, "cc -DLEFT");
        assert_eq!(commands.get(1).unwrap().text, "cc -DRIGHT");
    }

    #[test]
    fn test_root_settings_flow_into_branches() {
        let mut debug = ConfigTree::new();
        debug.set("optimize", "-O0");

        let mut tree = ConfigTree::new();
        tree.set("cc", "clang");
        tree.group("debug", debug);

        let commands = expand_template("{cc} {optimize}", &tree, ResolveMode::Strict).unwrap();
        assert_eq!(
            commands,
            vec![RenderedCommand {
                path: vec!["debug".to_string()],
                text: "clang -O0".to_string(),
            }]
        );
    }

    #[test]
    fn test_settings_after_a_group_are_invisible_to_it() {
        // Iteration order matters: a group declared before a setting at the
        // same level recurses with a snapshot that does not yet contain it.
        let mut early = ConfigTree::new();
        early.set("x", "1");

        let mut tree = ConfigTree::new();
        tree.group("early", early);
        tree.set("late", "2");

        let commands = expand_template("v={x}{late}", &tree, ResolveMode::Partial).unwrap();
        assert_eq!(commands.first().unwrap().text, "v=1");
    }

    #[test]
    fn test_nested_groups_record_children_before_parent() {
        let mut inner = ConfigTree::new();
        inner.set("depth", "2");
        let mut outer = ConfigTree::new();
        outer.set("depth", "1");
        outer.group("inner", inner);

        let mut tree = ConfigTree::new();
        tree.group("outer", outer);

        let commands = expand_template("d={depth}", &tree, ResolveMode::Partial).unwrap();
        let paths: Vec<Vec<String>> = commands.iter().map(|c| c.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                vec!["outer".to_string(), "inner".to_string()],
                vec!["outer".to_string()],
            ]
        );
        // The inner node sees the outer setting, then overrides it.
        assert_eq!(commands.get(0).unwrap().text, "d=2");
        assert_eq!(commands.get(1).unwrap().text, "d=1");
    }

    #[test]
    fn test_template_syntax_errors_propagate() {
        let mut tree = ConfigTree::new();
        tree.set("x", "1");
        let result = expand_template("oops {", &tree, ResolveMode::Partial);
        assert!(matches!(
            result,
            Err(ExpandError::Template(FormatError::StrayBrace { .. }))
        ));
    }
}
