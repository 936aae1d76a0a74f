//! JSON output formatter for machine processing
//!
//! Every node carries its identity, depth, all status flags and its
//! children in tree order, so the document is a lossless encoding of the tree.

use crate::domain::{Tree, TreeConfig, TreeNode, TrimReason};
use crate::output::OutputFormatter;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
#[derive(Debug, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

/// JSON representation of the full document
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Effective root identity
    root: String,
    /// Configuration the tree was built with
    config: &'a TreeConfig,
    /// Summary statistics
    summary: JsonSummary,
    /// The tree itself
    tree: JsonNode<'a>,
}

/// JSON representation of summary statistics
#[derive(Serialize, Default)]
struct JsonSummary {
    nodes: usize,
    direct_upgrades: usize,
    transitive_upgrades: usize,
    trimmed: usize,
    duplicates: usize,
}

/// JSON representation of a tree node
#[derive(Serialize)]
struct JsonNode<'a> {
    id: String,
    path: &'a str,
    version: &'a str,
    depth: usize,
    has_direct_upgrade: bool,
    update_version: Option<&'a str>,
    update_time: Option<DateTime<Utc>>,
    needs_transitive_upgrade: bool,
    indirect: bool,
    trimmed: bool,
    trim_reason: Option<TrimReason>,
    duplicate: bool,
    children: Vec<JsonNode<'a>>,
}

impl<'a> JsonNode<'a> {
    fn from_node(node: &'a TreeNode) -> Self {
        Self {
            id: node.identity.to_string(),
            path: &node.identity.path,
            version: &node.identity.version,
            depth: node.depth,
            has_direct_upgrade: node.has_direct_upgrade,
            update_version: node.upgrade.as_ref().map(|u| u.version.as_str()),
            update_time: node.upgrade.as_ref().and_then(|u| u.released_at),
            needs_transitive_upgrade: node.needs_transitive_upgrade,
            indirect: node.indirect,
            trimmed: node.is_trimmed(),
            trim_reason: node.trimmed,
            duplicate: node.is_duplicate(),
            children: node.children.iter().map(JsonNode::from_node).collect(),
        }
    }
}

impl JsonFormatter {
    fn summarize(tree: &Tree) -> JsonSummary {
        let mut summary = JsonSummary::default();
        tree.root.walk(&mut |node| {
            summary.nodes += 1;
            if node.has_direct_upgrade {
                summary.direct_upgrades += 1;
            }
            if node.needs_transitive_upgrade {
                summary.transitive_upgrades += 1;
            }
            if node.is_trimmed() {
                summary.trimmed += 1;
            }
            if node.is_duplicate() {
                summary.duplicates += 1;
            }
        });
        summary
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, tree: &Tree, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = JsonOutput {
            root: tree.root.identity.to_string(),
            config: &tree.config,
            summary: Self::summarize(tree),
            tree: JsonNode::from_node(&tree.root),
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}
