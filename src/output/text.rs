//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Tree branch glyphs per depth and sibling position
//! - Candidate version with semantic change type for upgradable modules
//! - A marker for modules whose requirement must be bumped
//! - Optional colors and trimmed-branch markers

use crate::domain::{Tree, TreeConfig, TreeNode, VersionChangeType};
use crate::output::OutputFormatter;
use colored::Colorize;
use std::io::Write;

const BRANCH: &str = "├─ ";
const LAST_BRANCH: &str = "└─ ";
const PIPE: &str = "│  ";
const SPACE: &str = "   ";
const TRIM_MARKER: &str = " ...";
const BUMP_MARKER: &str = "[update requirement]";
const NOTHING_TO_UPGRADE: &str = "nothing to upgrade";

fn colored_change_label(change: VersionChangeType) -> String {
    match change {
        VersionChangeType::Major => change.label().red().bold().to_string(),
        VersionChangeType::Minor => change.label().yellow().to_string(),
        VersionChangeType::Patch => change.label().green().to_string(),
        VersionChangeType::Commit => change.label().magenta().to_string(),
        VersionChangeType::Unknown => change.label().dimmed().to_string(),
    }
}

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Whether to use colors
    color: bool,
    /// Whether trimmed nodes get a marker
    visualize_trimmed: bool,
    /// Whether to report a tree without upgrades explicitly
    report_nothing: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(color: bool, visualize_trimmed: bool) -> Self {
        Self {
            color,
            visualize_trimmed,
            report_nothing: false,
        }
    }

    /// Create a text formatter matching a tree configuration
    pub fn from_config(config: &TreeConfig) -> Self {
        Self {
            color: config.colored,
            visualize_trimmed: config.visualize_trimmed,
            report_nothing: !config.show_all,
        }
    }

    /// Render the module identity, colored by status
    fn format_name(&self, node: &TreeNode) -> String {
        let name = node.identity.to_string();
        if !self.color {
            return name;
        }
        if node.has_direct_upgrade {
            name.yellow().bold().to_string()
        } else if node.needs_transitive_upgrade {
            name.cyan().to_string()
        } else {
            name
        }
    }

    /// Render one node line without branch glyphs
    fn format_label(&self, node: &TreeNode) -> String {
        let mut label = self.format_name(node);

        if let Some(candidate) = node.upgrade.as_ref().filter(|_| node.has_direct_upgrade) {
            let change = VersionChangeType::from_versions(&node.identity.version, &candidate.version);
            if self.color {
                label.push_str(&format!(
                    " {} {} [{}]",
                    "→".dimmed(),
                    candidate.version.bright_white().bold(),
                    colored_change_label(change)
                ));
            } else {
                label.push_str(&format!(" → {} [{}]", candidate.version, change.label()));
            }
        }

        if node.needs_transitive_upgrade {
            label.push(' ');
            if self.color {
                label.push_str(&BUMP_MARKER.cyan().to_string());
            } else {
                label.push_str(BUMP_MARKER);
            }
        }

        if self.visualize_trimmed && node.is_trimmed() {
            if self.color {
                label.push_str(&TRIM_MARKER.dimmed().to_string());
            } else {
                label.push_str(TRIM_MARKER);
            }
        }

        label
    }

    /// Write the children of a node, depth-first pre-order
    fn format_children(
        &self,
        node: &TreeNode,
        prefix: &str,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let count = node.children.len();
        for (index, child) in node.children.iter().enumerate() {
            let is_last = index + 1 == count;
            let (branch, continuation) = if is_last {
                (LAST_BRANCH, SPACE)
            } else {
                (BRANCH, PIPE)
            };
            let glyphs = if self.color {
                branch.dimmed().to_string()
            } else {
                branch.to_string()
            };

            writeln!(writer, "{}{}{}", prefix, glyphs, self.format_label(child))?;
            self.format_children(child, &format!("{}{}", prefix, continuation), writer)?;
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, tree: &Tree, writer: &mut dyn Write) -> std::io::Result<()> {
        writeln!(writer, "{}", self.format_label(&tree.root))?;
        self.format_children(&tree.root, "", writer)?;

        if self.report_nothing && tree.nothing_to_upgrade() {
            if self.color {
                writeln!(writer, "{}", NOTHING_TO_UPGRADE.green())?;
            } else {
                writeln!(writer, "{}", NOTHING_TO_UPGRADE)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ModuleIdentity, TrimReason, UpgradeCandidate};

    fn node(identity: &str, depth: usize, children: Vec<TreeNode>) -> TreeNode {
        let mut node = TreeNode::new(identity.parse::<ModuleIdentity>().unwrap(), depth);
        node.children = children;
        node
    }

    fn upgradable(mut node: TreeNode, version: &str) -> TreeNode {
        node.has_direct_upgrade = true;
        node.upgrade = Some(UpgradeCandidate::new(version));
        node
    }

    fn bump(mut node: TreeNode) -> TreeNode {
        node.needs_transitive_upgrade = true;
        node
    }

    fn render(formatter: &TextFormatter, tree: &Tree) -> String {
        let mut output = Vec::new();
        formatter.format(tree, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    fn sample_tree() -> Tree {
        let b = bump(node(
            "b@v1.0.0",
            1,
            vec![
                node("c@v1.0.0", 2, vec![]),
                upgradable(node("d@v1.2.0", 2, vec![]), "v1.3.0"),
            ],
        ));
        let mut e = node("e@v0.1.0", 1, vec![]);
        e.trimmed = Some(TrimReason::Depth);
        Tree::new(bump(node("a", 0, vec![b, e])), TreeConfig::default())
    }

    #[test]
    fn test_format_tree_glyphs() {
        let formatter = TextFormatter::new(false, true);
        let expected = "\
a [update requirement]
├─ b@v1.0.0 [update requirement]
│  ├─ c@v1.0.0
│  └─ d@v1.2.0 → v1.3.0 [minor]
└─ e@v0.1.0 ...
";
        assert_eq!(render(&formatter, &sample_tree()), expected);
    }

    #[test]
    fn test_trimmed_without_marker_looks_like_leaf() {
        let formatter = TextFormatter::new(false, false);
        let output = render(&formatter, &sample_tree());
        assert!(output.ends_with("└─ e@v0.1.0\n"));
        assert!(!output.contains("..."));
    }

    #[test]
    fn test_last_sibling_continuation_is_blank() {
        let tree = Tree::new(
            node(
                "a",
                0,
                vec![node("b", 1, vec![node("c", 2, vec![]), node("d", 2, vec![])])],
            ),
            TreeConfig::default(),
        );
        let output = render(&TextFormatter::new(false, true), &tree);
        assert_eq!(output, "a\n└─ b\n   ├─ c\n   └─ d\n");
    }

    #[test]
    fn test_nothing_to_upgrade_is_reported_when_filtering() {
        let config = TreeConfig::default().with_show_all(false);
        let formatter = TextFormatter::from_config(&config);
        let tree = Tree::new(node("a", 0, vec![]), config);
        assert_eq!(render(&formatter, &tree), "a\nnothing to upgrade\n");
    }

    #[test]
    fn test_nothing_to_upgrade_not_reported_when_showing_all() {
        let formatter = TextFormatter::from_config(&TreeConfig::default());
        let tree = Tree::new(node("a", 0, vec![node("b", 1, vec![])]), TreeConfig::default());
        assert!(!render(&formatter, &tree).contains(NOTHING_TO_UPGRADE));
    }

    #[test]
    fn test_colored_statuses_are_distinct() {
        colored::control::set_override(true);
        let formatter = TextFormatter::new(true, true);
        let direct = formatter.format_name(&upgradable(node("d@v1.0.0", 1, vec![]), "v1.0.1"));
        let transitive = formatter.format_name(&bump(node("b@v1.0.0", 1, vec![])));
        let plain = formatter.format_name(&node("c@v1.0.0", 1, vec![]));

        assert_ne!(direct, transitive);
        assert_ne!(direct, plain);
        assert_ne!(transitive, plain);
        assert!(direct.contains("d@v1.0.0"));
        assert!(transitive.contains("b@v1.0.0"));
        assert_eq!(plain, "c@v1.0.0");
    }

    #[test]
    fn test_change_type_label() {
        let formatter = TextFormatter::new(false, true);
        let label = formatter.format_label(&upgradable(node("x@v1.2.3", 1, vec![]), "v2.0.0"));
        assert_eq!(label, "x@v1.2.3 → v2.0.0 [major]");
    }
}
