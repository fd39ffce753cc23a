// src/constants.rs

/// Placeholder names that the resolver must never substitute. They stay
/// literally in the rendered command so a build driver can bind them per
/// rule invocation.
pub const DELAYED_PLACEHOLDERS: &[&str] = &["input", "output"];

/// The default name of the build manifest file.
pub const MANIFEST_FILENAME: &str = "mason.toml";

/// The default output path for the rule graph JSON document.
pub const GRAPH_JSON_FILENAME: &str = "graph.json";

/// The default output path for the rule graph HTML page.
pub const GRAPH_HTML_FILENAME: &str = "graph.html";
