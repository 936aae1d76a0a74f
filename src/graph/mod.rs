//! Dependency graph handling
//!
//! This module provides:
//! - Parsing of the `go mod graph` edge list into an adjacency index
//! - Root resolution (explicit or top of the graph)
//! - Cycle-safe, depth-bounded tree construction with duplicate suppression

mod builder;
mod index;

pub use builder::TreeBuilder;
pub use index::{GraphIndex, NodeId};
