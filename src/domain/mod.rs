//! Core domain models for deptree
//!
//! This module contains the fundamental types used throughout the application:
//! - Module identities as they appear in `go mod graph`
//! - Go version comparison and change classification
//! - Tree nodes, build configuration and the finished tree

mod identity;
mod tree;
pub mod version;

pub use identity::ModuleIdentity;
pub use tree::{
    BuildStats, Tree, TreeConfig, TreeNode, TrimReason, UpgradeCandidate, DEFAULT_MAX_DEPTH,
};
pub use version::VersionChangeType;
