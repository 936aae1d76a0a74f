//! Output formatting for the annotated dependency tree
//!
//! This module provides:
//! - Text output: an indented tree, optionally colorized
//! - JSON output: a lossless structured document for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{Tree, TreeConfig};
use crate::error::DeptreeError;
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable tree
    #[default]
    Tree,
    /// JSON output for machine processing
    Json,
}

impl OutputFormat {
    /// Create the format from CLI arguments
    pub fn from_cli(json: bool) -> Self {
        if json {
            OutputFormat::Json
        } else {
            OutputFormat::Tree
        }
    }
}

/// Trait for output formatters
///
/// Formatters only read the tree; the only failure is the writer's.
pub trait OutputFormatter {
    /// Format and write the tree
    fn format(&self, tree: &Tree, writer: &mut dyn Write) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(format: OutputFormat, config: &TreeConfig) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Tree => Box::new(TextFormatter::from_config(config)),
        OutputFormat::Json => Box::new(JsonFormatter::new()),
    }
}

/// Print the tree in the requested format
pub fn print(tree: &Tree, format: OutputFormat, writer: &mut dyn Write) -> Result<(), DeptreeError> {
    let formatter = create_formatter(format, &tree.config);
    formatter.format(tree, writer).map_err(DeptreeError::output)?;
    writer.flush().map_err(DeptreeError::output)
}
