//! Upward propagation of upgrade status
//!
//! One post-order pass marks every ancestor of an upgradable node as needing
//! to bump its own requirement.

use crate::domain::{Tree, TreeNode};

/// Sets `needs_transitive_upgrade` on every node of the tree
///
/// Flags are recomputed from the children, so repeated calls give the same
/// result on an unmodified tree.
pub fn adjust(tree: &mut Tree) {
    let needs = adjust_node(&mut tree.root);
    tracing::info!(
        "status propagated, root {}",
        if needs {
            "needs an update"
        } else {
            "is up to date"
        }
    );
}

/// Returns the node's own `needs_transitive_upgrade` after visiting its children
fn adjust_node(node: &mut TreeNode) -> bool {
    let mut needs = false;
    for child in &mut node.children {
        let child_needs = adjust_node(child);
        needs |= child.has_direct_upgrade || child_needs;
    }
    node.needs_transitive_upgrade = needs;
    needs
}
