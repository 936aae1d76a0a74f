//! Tree construction from the graph index
//!
//! The traversal keeps two pieces of build-scoped state:
//! - the set of ancestors on the current descent, to break cycles locally
//! - the nodes already expanded anywhere with the depth that was left below
//!   them, to drop repeated subtrees that would not show anything new

use super::index::{GraphIndex, NodeId};
use crate::domain::{BuildStats, Tree, TreeConfig, TreeNode, TrimReason};
use crate::error::DeptreeError;
use crate::registry::Registry;
use std::collections::{HashMap, HashSet};
use std::io::BufRead;

/// A visited node and whether the kept part of its subtree shows a direct upgrade
struct Visited {
    node: TreeNode,
    upgrade_in_subtree: bool,
}

/// Builds a bounded, de-duplicated tree from a graph index
pub struct TreeBuilder<'a> {
    graph: &'a GraphIndex,
    registry: &'a Registry,
    config: &'a TreeConfig,
    ancestors: HashSet<NodeId>,
    /// Expanded nodes and the largest depth budget they were expanded with
    expanded: HashMap<NodeId, usize>,
    stats: BuildStats,
}

impl<'a> TreeBuilder<'a> {
    /// Creates a builder over an already parsed graph
    pub fn new(graph: &'a GraphIndex, registry: &'a Registry, config: &'a TreeConfig) -> Self {
        Self {
            graph,
            registry,
            config,
            ancestors: HashSet::new(),
            expanded: HashMap::new(),
            stats: BuildStats::default(),
        }
    }

    /// Parses the edge stream and builds the tree in one go
    ///
    /// Returns the tree together with warnings for skipped graph lines.
    pub fn fill<R: BufRead>(
        reader: R,
        config: TreeConfig,
        registry: &Registry,
    ) -> Result<(Tree, Vec<String>), DeptreeError> {
        let graph = GraphIndex::parse(reader)?;
        let tree = TreeBuilder::new(&graph, registry, &config).build()?;
        Ok((tree, graph.warnings().to_vec()))
    }

    /// Resolves the root and builds the tree
    pub fn build(mut self) -> Result<Tree, DeptreeError> {
        let root = self.graph.resolve_root(&self.config.root)?;
        tracing::info!("building tree from {}", self.graph.identity(root));

        let root = self.visit(root, 0).node;

        self.stats.nodes = root.node_count();
        tracing::debug!(
            "tree has {} nodes ({} depth-trimmed, {} cycles, {} duplicates, {} omitted)",
            self.stats.nodes,
            self.stats.depth_trimmed,
            self.stats.cycles,
            self.stats.duplicates,
            self.stats.omitted
        );

        let mut tree = Tree::new(root, self.config.clone());
        tree.stats = self.stats;
        Ok(tree)
    }

    /// Creates the node for `id` and expands it unless it must be trimmed
    fn visit(&mut self, id: NodeId, depth: usize) -> Visited {
        let graph = self.graph;
        let status = self.registry.lookup(graph.identity(id));

        let mut node = TreeNode::new(graph.identity(id).clone(), depth);
        node.has_direct_upgrade = status.has_upgrade;
        node.upgrade = status.candidate;
        node.indirect = status.indirect;

        let graph_children = graph.children(id);
        let remaining = self.config.max_depth.saturating_sub(depth);
        let mut upgrade_below = false;

        if !graph_children.is_empty() {
            if self.ancestors.contains(&id) {
                node.trimmed = Some(TrimReason::Cycle);
                self.stats.cycles += 1;
            } else if depth >= self.config.max_depth {
                node.trimmed = Some(TrimReason::Depth);
                self.stats.depth_trimmed += 1;
            } else if self.already_covered(id, remaining) {
                node.trimmed = Some(TrimReason::Duplicate);
                self.stats.duplicates += 1;
            } else {
                self.ancestors.insert(id);
                for &child in graph_children {
                    let visited = self.visit(child, depth + 1);
                    if self.keeps(&visited) {
                        upgrade_below |= visited.upgrade_in_subtree;
                        node.children.push(visited.node);
                    } else {
                        self.stats.omitted += 1;
                    }
                }
                self.ancestors.remove(&id);
                self.expanded.insert(id, remaining);
            }
        }

        Visited {
            upgrade_in_subtree: node.has_direct_upgrade || upgrade_below,
            node,
        }
    }

    /// Returns true if an earlier expansion of `id` reached at least as deep
    ///
    /// A shallower occurrence has more depth left and is expanded again.
    fn already_covered(&self, id: NodeId, remaining: usize) -> bool {
        !self.config.show_dropped_child
            && self
                .expanded
                .get(&id)
                .is_some_and(|&covered| covered >= remaining)
    }

    /// Current modules are hidden unless `show_all` is set
    ///
    /// A dropped branch only counts for its own upgrade, its subtree is shown
    /// where it was expanded.
    fn keeps(&self, visited: &Visited) -> bool {
        self.config.show_all || visited.upgrade_in_subtree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ModuleIdentity;
    use crate::registry::UpgradeRecord;

    fn id(s: &str) -> ModuleIdentity {
        s.parse().unwrap()
    }

    fn build(edges: &str, upgradable: &[&str], config: TreeConfig) -> Tree {
        let registry = Registry::from_records(
            upgradable
                .iter()
                .map(|path| UpgradeRecord::new(*path, "v1.0.0").with_update("v1.1.0")),
        );
        let (tree, _) = TreeBuilder::fill(edges.as_bytes(), config, &registry).unwrap();
        tree
    }

    fn names(node: &TreeNode) -> Vec<String> {
        node.children
            .iter()
            .map(|c| c.identity.to_string())
            .collect()
    }

    #[test]
    fn test_build_simple_tree() {
        let tree = build("A B\nB C\nB D\n", &["D"], TreeConfig::default());
        assert_eq!(tree.root.identity, id("A"));
        assert_eq!(names(&tree.root), vec!["B"]);
        let b = &tree.root.children[0];
        assert_eq!(names(b), vec!["C", "D"]);
        assert!(!b.children[0].has_direct_upgrade);
        assert!(b.children[1].has_direct_upgrade);
        assert_eq!(b.children[1].upgrade.as_ref().unwrap().version, "v1.1.0");
        assert_eq!(b.children[1].depth, 2);
        assert_eq!(tree.stats.nodes, 4);
    }

    #[test]
    fn test_cycle_is_trimmed() {
        let tree = build("A B\nB A\n", &[], TreeConfig::default().with_root("A"));
        let b = &tree.root.children[0];
        assert_eq!(names(b), vec!["A"]);
        let repeated = &b.children[0];
        assert_eq!(repeated.trimmed, Some(TrimReason::Cycle));
        assert!(repeated.children.is_empty());
        assert_eq!(repeated.depth, 2);
        assert_eq!(tree.stats.cycles, 1);
    }

    #[test]
    fn test_self_reference_is_trimmed() {
        let tree = build("R A\nA A\n", &[], TreeConfig::default());
        let a = &tree.root.children[0];
        assert_eq!(names(a), vec!["A"]);
        assert_eq!(a.children[0].trimmed, Some(TrimReason::Cycle));
    }

    #[test]
    fn test_depth_limit() {
        let tree = build(
            "a b\nb c\nc d\nd e\ne f\n",
            &[],
            TreeConfig::default().with_max_depth(3),
        );
        let d = &tree.root.children[0].children[0].children[0];
        assert_eq!(d.identity, id("d"));
        assert_eq!(d.depth, 3);
        assert_eq!(d.trimmed, Some(TrimReason::Depth));
        assert!(d.children.is_empty());
        assert_eq!(tree.stats.depth_trimmed, 1);
    }

    #[test]
    fn test_leaf_at_depth_limit_is_not_trimmed() {
        let tree = build("a b\nb c\n", &[], TreeConfig::default().with_max_depth(2));
        let c = &tree.root.children[0].children[0];
        assert_eq!(c.depth, 2);
        assert!(!c.is_trimmed());
    }

    #[test]
    fn test_duplicate_subtree_is_dropped() {
        let tree = build("a b\na c\nb d\nc d\nd e\n", &[], TreeConfig::default());
        let first = &tree.root.children[0].children[0];
        let second = &tree.root.children[1].children[0];
        assert_eq!(names(first), vec!["e"]);
        assert!(!first.is_trimmed());
        assert!(second.is_duplicate());
        assert!(second.children.is_empty());
        assert_eq!(tree.stats.duplicates, 1);
    }

    #[test]
    fn test_duplicate_subtree_is_repeated_when_forced() {
        let tree = build(
            "a b\na c\nb d\nc d\nd e\n",
            &[],
            TreeConfig::default().with_show_dropped_child(true),
        );
        let first = &tree.root.children[0].children[0];
        let second = &tree.root.children[1].children[0];
        assert_eq!(names(first), vec!["e"]);
        assert_eq!(names(second), vec!["e"]);
        assert_eq!(tree.stats.duplicates, 0);
    }

    #[test]
    fn test_repeated_leaf_is_not_a_duplicate() {
        let tree = build("a b\na c\nb x\nc x\n", &[], TreeConfig::default());
        let second = &tree.root.children[1].children[0];
        assert_eq!(second.identity, id("x"));
        assert!(!second.is_trimmed());
    }

    #[test]
    fn test_upgrades_only_omits_current_branches() {
        let tree = build(
            "A B\nA C\nB D\nC E\n",
            &["D"],
            TreeConfig::default().with_show_all(false),
        );
        assert_eq!(names(&tree.root), vec!["B"]);
        assert_eq!(names(&tree.root.children[0]), vec!["D"]);
        assert_eq!(tree.stats.omitted, 2);
    }

    #[test]
    fn test_upgrades_only_without_upgrades_keeps_root() {
        let tree = build(
            "A B\nB C\n",
            &[],
            TreeConfig::default().with_show_all(false),
        );
        assert_eq!(tree.root.identity, id("A"));
        assert!(tree.root.children.is_empty());
    }

    #[test]
    fn test_upgrades_only_drops_parent_linked_only_through_duplicate() {
        let tree = build(
            "a b\na c\nb d\nc d\nd e\n",
            &["e"],
            TreeConfig::default().with_show_all(false),
        );
        assert_eq!(names(&tree.root), vec!["b"]);
        let d = &tree.root.children[0].children[0];
        assert_eq!(names(d), vec!["e"]);
        assert_eq!(tree.stats.duplicates, 1);
        assert_eq!(tree.stats.omitted, 2);
    }

    #[test]
    fn test_upgrades_only_keeps_upgradable_duplicate() {
        let tree = build(
            "a b\na c\nb d\nc d\nd e\n",
            &["d"],
            TreeConfig::default().with_show_all(false),
        );
        assert_eq!(names(&tree.root), vec!["b", "c"]);
        let dropped = &tree.root.children[1].children[0];
        assert!(dropped.is_duplicate());
        assert!(dropped.has_direct_upgrade);
    }

    #[test]
    fn test_shallower_occurrence_is_expanded_again() {
        let tree = build(
            "a b\nb c\nc d\nd e\ne f@v1.0.0\na d\n",
            &["f"],
            TreeConfig::default().with_max_depth(4),
        );
        let deep = &tree.root.children[0].children[0].children[0];
        assert_eq!(deep.identity, id("d"));
        assert_eq!(deep.children[0].trimmed, Some(TrimReason::Depth));

        let shallow = &tree.root.children[1];
        assert_eq!(shallow.identity, id("d"));
        assert!(!shallow.is_trimmed());
        let e = &shallow.children[0];
        assert_eq!(names(e), vec!["f@v1.0.0"]);
        assert!(e.children[0].has_direct_upgrade);
        assert_eq!(tree.stats.duplicates, 0);
    }

    #[test]
    fn test_shallower_occurrence_shows_upgrade_when_filtering() {
        let tree = build(
            "a b\nb c\nc d\nd e\ne f@v1.0.0\na d\n",
            &["f"],
            TreeConfig::default().with_max_depth(4).with_show_all(false),
        );
        assert_eq!(names(&tree.root), vec!["d"]);
        assert_eq!(names(&tree.root.children[0]), vec!["e"]);
    }

    #[test]
    fn test_deeper_occurrence_stays_a_duplicate() {
        let tree = build(
            "a d\na b\nb c\nc d\nd e\ne f\n",
            &[],
            TreeConfig::default().with_max_depth(4),
        );
        let deep = &tree.root.children[1].children[0].children[0];
        assert_eq!(deep.identity, id("d"));
        assert!(deep.is_duplicate());
        assert_eq!(tree.stats.duplicates, 1);
    }

    #[test]
    fn test_upgrades_only_drops_duplicate_of_current_subtree() {
        let tree = build(
            "a b\na c\nb d\nc d\nd e\nb u\n",
            &["u"],
            TreeConfig::default().with_show_all(false),
        );
        assert_eq!(names(&tree.root), vec!["b"]);
        assert_eq!(names(&tree.root.children[0]), vec!["u"]);
    }

    #[test]
    fn test_unknown_root_fails() {
        let registry = Registry::default();
        let err = TreeBuilder::fill(
            "a b\n".as_bytes(),
            TreeConfig::default().with_root("zzz"),
            &registry,
        )
        .unwrap_err();
        assert!(matches!(err, DeptreeError::UnknownRoot { .. }));
    }

    #[test]
    fn test_fill_returns_graph_warnings() {
        let registry = Registry::default();
        let (_, warnings) =
            TreeBuilder::fill("a b\nbroken\n".as_bytes(), TreeConfig::default(), &registry)
                .unwrap();
        assert_eq!(warnings.len(), 1);
    }
}
