// src/models.rs

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};
use std::collections::HashMap;
use std::fmt;

// --- CONFIGURATION TREE MODELS ---

/// A single value inside a configuration tree: either a concrete setting
/// (a string) or a nested group of sub-variants. Uses `untagged` so the
/// TOML syntax stays natural:
///
/// ```toml
/// [commands.compile.config.debug]
/// optimize = "-O0"                     # Setting
/// [commands.compile.config.debug.asan]
/// sanitize = "-fsanitize=address"      # nested Group
/// ```
///
/// Any value that is neither a string nor a table fails deserialization,
/// which is the only way a malformed tree shape can reach this crate.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ConfigValue {
    /// A nested variant group.
    Group(ConfigTree),
    /// A plain configuration setting.
    Setting(String),
}

/// A nested configuration mapping whose iteration order is the insertion
/// (document) order of its keys.
///
/// Traversal order of the expander is defined by this order, so a plain
/// `HashMap` cannot back it. The entries are kept as an ordered list; `get`
/// is a linear scan, which is fine for the shallow, small trees this engine
/// works with.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigTree {
    entries: Vec<(String, ConfigValue)>,
}

impl ConfigTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if the tree has no entries at this level.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The number of entries at this level.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Inserts a key, replacing any prior value for it in place (the
    /// original position is kept, as an insertion-ordered map would).
    pub fn insert(&mut self, key: impl Into<String>, value: ConfigValue) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Convenience for inserting a string setting.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.insert(key, ConfigValue::Setting(value.into()));
    }

    /// Convenience for inserting a nested group.
    pub fn group(&mut self, key: impl Into<String>, subtree: Self) {
        self.insert(key, ConfigValue::Group(subtree));
    }

    /// Looks a key up at this level only.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, ConfigValue)> for ConfigTree {
    fn from_iter<I: IntoIterator<Item = (String, ConfigValue)>>(iter: I) -> Self {
        let mut tree = Self::new();
        for (key, value) in iter {
            tree.insert(key, value);
        }
        tree
    }
}

// Manual serde impls: a `ConfigTree` is a plain map on the wire, but the
// in-memory representation must preserve document order.

impl Serialize for ConfigTree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ConfigTree {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TreeVisitor;

        impl<'de> Visitor<'de> for TreeVisitor {
            type Value = ConfigTree;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of settings and nested variant groups")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut tree = ConfigTree::new();
                while let Some((key, value)) = access.next_entry::<String, ConfigValue>()? {
                    tree.insert(key, value);
                }
                Ok(tree)
            }
        }

        deserializer.deserialize_map(TreeVisitor)
    }
}

// --- EXPANSION RESULT MODELS ---

/// The settings accumulated along one path through a configuration tree.
pub type ConfigSnapshot = HashMap<String, String>;

/// A command template after placeholder resolution, tagged with the tree
/// path (sequence of variant keys) that produced it.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RenderedCommand {
    /// The ordered variant keys from the tree root to the producing node.
    pub path: Vec<String>,
    /// The resolved command text; delayed placeholders are still present.
    pub text: String,
}

/// A build rule: an input specifier, an output specifier, and the name of
/// the command that transforms one into the other. Opaque at this layer;
/// nothing checks that the command name is registered.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    /// The input specifier (e.g. a source file).
    pub input: String,
    /// The output specifier (e.g. an object file).
    pub output: String,
    /// The name of the registered command this rule refers to.
    pub command: String,
}

// --- BUILD MANIFEST MODELS (What is read from the description file) ---

/// A single templated command and the configuration tree it is expanded
/// over, as written in the manifest.
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct CommandSpec {
    /// The command template, with `{name}` placeholders.
    pub template: String,
    /// The configuration variant tree driving expansion.
    pub config: ConfigTree,
}

/// Represents the deserialized structure of a `mason.toml` build manifest.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct BuildManifest {
    /// Templated commands, keyed by name.
    #[serde(default)]
    pub commands: HashMap<String, CommandSpec>,
    /// The ordered rule list.
    #[serde(default)]
    pub rules: Vec<Rule>,
}
