//! # Graph Export
//!
//! Serializes the rule table as a directed graph: one node per distinct
//! input/output specifier, one edge per rule with the command name as the
//! edge relation. The graph is written as a JSON document with a fixed
//! schema and, optionally, as a self-contained HTML page that embeds the
//! JSON in an interactive D3 force layout.
//!
//! This is a pure consumer of the [`BuildStore`]; it never feeds back into
//! command registration or rule handling.

use crate::core::store::BuildStore;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::{collections::BTreeMap, fs, path::Path};

/// The top-level JSON document: a list of graphs (this exporter always
/// emits exactly one).
#[derive(Serialize, Debug, Clone)]
pub struct GraphDocument {
    /// The serialized graphs.
    pub graphs: Vec<Graph>,
}

/// One directed graph in the document.
#[derive(Serialize, Debug, Clone)]
pub struct Graph {
    /// Always `true`; rules are directional.
    pub directed: bool,
    /// Free-form graph type tag.
    #[serde(rename = "type")]
    pub graph_type: String,
    /// Human-readable graph label.
    pub label: String,
    /// Free-form graph metadata.
    pub metadata: Map<String, Value>,
    /// Nodes keyed by specifier; sorted for stable output.
    pub nodes: BTreeMap<String, GraphNode>,
    /// One edge per rule, in rule-table order.
    pub edges: Vec<GraphEdge>,
}

/// A graph node: a file specifier appearing in at least one rule.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    /// Display label (the specifier itself).
    pub label: String,
    /// Free-form node metadata.
    pub metadata: Map<String, Value>,
}

/// A directed edge from a rule's input to its output.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    /// The input specifier.
    pub source: String,
    /// The command name of the rule.
    pub relation: String,
    /// The output specifier.
    pub target: String,
    /// Always `true`.
    pub directed: bool,
    /// Display label for the edge.
    pub label: String,
    /// Free-form edge metadata.
    pub metadata: Map<String, Value>,
}

/// The static HTML shell. `__GRAPH_DATA__` is replaced with the JSON
/// document at write time, producing a page with no external data fetch.
const HTML_TEMPLATE: &str = include_str!("graph_page.html");

/// The rule table of a [`BuildStore`] viewed as a directed graph.
#[derive(Debug, Clone)]
pub struct RuleGraph {
    nodes: BTreeMap<String, GraphNode>,
    edges: Vec<GraphEdge>,
}

impl RuleGraph {
    /// Builds the graph from the store's rule table. Specifiers appearing
    /// in multiple rules collapse into a single node; duplicate rules keep
    /// their duplicate edges.
    pub fn from_store(store: &BuildStore) -> Self {
        let mut nodes = BTreeMap::new();
        let mut edges = Vec::with_capacity(store.rules().len());

        for rule in store.rules() {
            for spec in [&rule.input, &rule.output] {
                nodes.entry(spec.clone()).or_insert_with(|| GraphNode {
                    label: spec.clone(),
                    metadata: Map::new(),
                });
            }
            edges.push(GraphEdge {
                source: rule.input.clone(),
                relation: rule.command.clone(),
                target: rule.output.clone(),
                directed: true,
                label: rule.command.clone(),
                metadata: Map::new(),
            });
        }

        log::debug!(
            "Rule graph has {} node(s) and {} edge(s)",
            nodes.len(),
            edges.len()
        );
        Self { nodes, edges }
    }

    /// Wraps the graph in the fixed document schema.
    pub fn to_document(&self, label: &str) -> GraphDocument {
        GraphDocument {
            graphs: vec![Graph {
                directed: true,
                graph_type: "build rules".to_string(),
                label: label.to_string(),
                metadata: Map::new(),
                nodes: self.nodes.clone(),
                edges: self.edges.clone(),
            }],
        }
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_string(&self, label: &str) -> Result<String> {
        serde_json::to_string_pretty(&self.to_document(label))
            .context("Failed to serialize rule graph to JSON")
    }

    /// Writes the JSON document to `path`.
    pub fn write_json(&self, path: &Path, label: &str) -> Result<()> {
        let json = self.to_json_string(label)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write graph JSON to '{}'", path.display()))?;
        log::debug!("Wrote rule graph JSON to '{}'", path.display());
        Ok(())
    }

    /// Writes a self-contained HTML page with the JSON document embedded.
    pub fn write_html(&self, path: &Path, label: &str) -> Result<()> {
        let json = self.to_json_string(label)?;
        let page = HTML_TEMPLATE.replace("__GRAPH_DATA__", &json);
        fs::write(path, page)
            .with_context(|| format!("Failed to write graph HTML to '{}'", path.display()))?;
        log::debug!("Wrote rule graph HTML to '{}'", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_store() -> BuildStore {
        let mut store = BuildStore::new();
        store.add_rule("Main.cpp", "Main.o", "compile");
        store.add_rule("Util.cpp", "Util.o", "compile");
        store.add_rule("Main.o", "app", "link");
        store.add_rule("Util.o", "app", "link");
        store
    }

    #[test]
    fn test_nodes_deduplicate_edges_do_not() {
        let mut store = sample_store();
        store.add_rule("Main.cpp", "Main.o", "compile"); // duplicate rule

        let graph = RuleGraph::from_store(&store);
        let doc = graph.to_document("test");
        let g = doc.graphs.first().unwrap();
        // Main.cpp, Main.o, Util.cpp, Util.o, app
        assert_eq!(g.nodes.len(), 5);
        assert_eq!(g.edges.len(), 5);
    }

    #[test]
    fn test_document_matches_schema() {
        let graph = RuleGraph::from_store(&sample_store());
        let json: Value = serde_json::from_str(&graph.to_json_string("deps").unwrap()).unwrap();

        let g = json
            .get("graphs")
            .and_then(Value::as_array)
            .and_then(|graphs| graphs.first())
            .unwrap();
        assert_eq!(g.get("directed"), Some(&Value::Bool(true)));
        assert_eq!(g.get("type").and_then(Value::as_str), Some("build rules"));
        assert_eq!(g.get("label").and_then(Value::as_str), Some("deps"));

        let node = g
            .get("nodes")
            .and_then(|n| n.get("Main.cpp"))
            .unwrap();
        assert_eq!(node.get("label").and_then(Value::as_str), Some("Main.cpp"));
        assert!(node.get("metadata").unwrap().as_object().unwrap().is_empty());

        let edge = g
            .get("edges")
            .and_then(Value::as_array)
            .and_then(|edges| edges.first())
            .unwrap();
        assert_eq!(edge.get("source").and_then(Value::as_str), Some("Main.cpp"));
        assert_eq!(edge.get("relation").and_then(Value::as_str), Some("compile"));
        assert_eq!(edge.get("target").and_then(Value::as_str), Some("Main.o"));
        assert_eq!(edge.get("directed"), Some(&Value::Bool(true)));
    }

    #[test]
    fn test_empty_rule_table_yields_empty_graph() {
        let graph = RuleGraph::from_store(&BuildStore::new());
        let doc = graph.to_document("empty");
        let g = doc.graphs.first().unwrap();
        assert!(g.nodes.is_empty());
        assert!(g.edges.is_empty());
    }

    #[test]
    fn test_write_html_embeds_the_document() {
        let dir = tempfile::tempdir().unwrap();
        let html_path = dir.path().join("graph.html");
        let json_path = dir.path().join("graph.json");

        let graph = RuleGraph::from_store(&sample_store());
        graph.write_json(&json_path, "deps").unwrap();
        graph.write_html(&html_path, "deps").unwrap();

        let html = std::fs::read_to_string(&html_path).unwrap();
        assert!(!html.contains("__GRAPH_DATA__"));
        assert!(html.contains("\"relation\": \"compile\""));
        assert!(html.contains("d3.forceSimulation"));

        let json = std::fs::read_to_string(&json_path).unwrap();
        let parsed: Value = serde_json::from_str(&json).unwrap();
        assert!(parsed.get("graphs").is_some());
    }
}
