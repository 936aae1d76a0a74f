//! Dependency tree structures

use super::ModuleIdentity;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Default maximum tree depth
pub const DEFAULT_MAX_DEPTH: usize = 5;

/// Why a node's expansion was stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrimReason {
    /// The node sits at the configured maximum depth
    Depth,
    /// The node is already an ancestor on the current path
    Cycle,
    /// The node was already expanded elsewhere with at least as much depth left
    Duplicate,
}

impl TrimReason {
    /// Get the plain label
    pub fn label(&self) -> &'static str {
        match self {
            TrimReason::Depth => "depth",
            TrimReason::Cycle => "cycle",
            TrimReason::Duplicate => "duplicate",
        }
    }
}

/// A newer version known for a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeCandidate {
    /// The candidate version
    pub version: String,
    /// When the candidate was published, if known
    pub released_at: Option<DateTime<Utc>>,
}

impl UpgradeCandidate {
    /// Creates a candidate without release time
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            released_at: None,
        }
    }

    /// Sets the release time (builder pattern)
    pub fn with_released_at(mut self, released_at: Option<DateTime<Utc>>) -> Self {
        self.released_at = released_at;
        self
    }
}

/// One occurrence of a module in the tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub identity: ModuleIdentity,
    /// Children in edge discovery order
    pub children: Vec<TreeNode>,
    /// Root is depth 0
    pub depth: usize,
    /// Set from the registry when the node is constructed
    pub has_direct_upgrade: bool,
    /// Candidate version when `has_direct_upgrade` is set
    pub upgrade: Option<UpgradeCandidate>,
    /// Set by the propagator
    pub needs_transitive_upgrade: bool,
    /// The module is only an indirect requirement of the main module
    pub indirect: bool,
    /// Set when expansion was stopped although the graph has further children
    pub trimmed: Option<TrimReason>,
}

impl TreeNode {
    /// Creates a childless node without any status
    pub fn new(identity: ModuleIdentity, depth: usize) -> Self {
        Self {
            identity,
            children: Vec::new(),
            depth,
            has_direct_upgrade: false,
            upgrade: None,
            needs_transitive_upgrade: false,
            indirect: false,
            trimmed: None,
        }
    }

    /// Returns true if expansion of this node was stopped
    pub fn is_trimmed(&self) -> bool {
        self.trimmed.is_some()
    }

    /// Returns true if this node is a dropped branch
    pub fn is_duplicate(&self) -> bool {
        self.trimmed == Some(TrimReason::Duplicate)
    }

    /// Returns true if the node or anything below must change
    pub fn is_affected(&self) -> bool {
        self.has_direct_upgrade || self.needs_transitive_upgrade
    }

    /// Depth-first pre-order walk over this node and its descendants
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a TreeNode)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    /// Number of nodes in this subtree, including this one
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeNode::node_count).sum::<usize>()
    }
}

/// Configuration used to build and render a tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeConfig {
    /// Requested root identity, empty to detect the top of the graph
    pub root: String,
    /// Maximum depth, nodes at this depth are not expanded
    pub max_depth: usize,
    /// Keep modules without any upgrade in their subtree
    pub show_all: bool,
    /// Re-expand subtrees that were already expanded elsewhere
    pub show_dropped_child: bool,
    /// Mark trimmed nodes in text output
    pub visualize_trimmed: bool,
    /// Colorize text output
    pub colored: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            root: String::new(),
            max_depth: DEFAULT_MAX_DEPTH,
            show_all: true,
            show_dropped_child: false,
            visualize_trimmed: true,
            colored: false,
        }
    }
}

impl TreeConfig {
    /// Sets the root identity (builder pattern)
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the maximum depth (builder pattern)
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets whether current modules are shown (builder pattern)
    pub fn with_show_all(mut self, show_all: bool) -> Self {
        self.show_all = show_all;
        self
    }

    /// Sets whether duplicate subtrees are re-expanded (builder pattern)
    pub fn with_show_dropped_child(mut self, show_dropped_child: bool) -> Self {
        self.show_dropped_child = show_dropped_child;
        self
    }

    /// Sets whether trimmed nodes are marked (builder pattern)
    pub fn with_visualize_trimmed(mut self, visualize_trimmed: bool) -> Self {
        self.visualize_trimmed = visualize_trimmed;
        self
    }

    /// Sets whether output is colorized (builder pattern)
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }
}

/// Counters collected while building a tree
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    pub nodes: usize,
    pub depth_trimmed: usize,
    pub cycles: usize,
    pub duplicates: usize,
    pub omitted: usize,
}

/// A built dependency tree with the configuration that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tree {
    pub root: TreeNode,
    pub config: TreeConfig,
    pub stats: BuildStats,
}

impl Tree {
    /// Creates a tree from its root node
    pub fn new(root: TreeNode, config: TreeConfig) -> Self {
        Self {
            root,
            config,
            stats: BuildStats::default(),
        }
    }

    /// Returns true if no node in the tree needs an upgrade
    ///
    /// Only meaningful once status has been propagated.
    pub fn nothing_to_upgrade(&self) -> bool {
        !self.root.is_affected()
    }

    /// Identities of all nodes carrying a direct upgrade, in pre-order
    pub fn direct_upgrades(&self) -> Vec<&ModuleIdentity> {
        let mut found = Vec::new();
        self.root.walk(&mut |node| {
            if node.has_direct_upgrade {
                found.push(&node.identity);
            }
        });
        found
    }
}
