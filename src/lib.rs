//! deptree - Go module dependency tree library
//!
//! This library builds a dependency tree from `go mod graph` and
//! `go list -u -m -json all` output and marks:
//! - Modules with a newer version available
//! - Modules whose requirements must be bumped for a transitive upgrade

pub mod cli;
pub mod domain;
pub mod error;
pub mod graph;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod propagate;
pub mod registry;
pub mod source;
