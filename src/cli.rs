//! CLI argument parsing module for deptree

use crate::domain::{TreeConfig, DEFAULT_MAX_DEPTH};
use crate::error::ConfigError;
use crate::output::OutputFormat;
use crate::source::InputSource;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Go module dependency tree with upgrade propagation
#[derive(Parser, Debug, Clone)]
#[command(
    name = "deptree",
    version,
    about = "Show which Go modules can be upgraded and which requirements must be bumped"
)]
pub struct CliArgs {
    /// Root module (`path` or `path@version`), default: top of the graph
    pub root: Option<String>,

    // Tree options
    /// Maximum depth of dependencies
    #[arg(short, long, default_value_t = DEFAULT_MAX_DEPTH as u64, value_parser = clap::value_parser!(u64).range(1..))]
    pub depth: u64,

    /// Show only modules with an upgrade somewhere below them
    #[arg(short, long)]
    pub upgrades_only: bool,

    /// Expand every occurrence of a repeated child branch (can be very slow)
    #[arg(short, long)]
    pub force: bool,

    /// Do not mark trimmed branches with '...'
    #[arg(long)]
    pub no_trim_marker: bool,

    // Output options
    /// Mark upgrade candidates and affected requirements with colors
    #[arg(short, long)]
    pub color: bool,

    /// Print JSON instead of a tree
    #[arg(long)]
    pub json: bool,

    // Input options
    /// File created by 'go mod graph', '-' for stdin (default: run go mod graph)
    #[arg(long, value_name = "FILE")]
    pub graph: Option<PathBuf>,

    /// File created by 'go list -u -m -json all', '-' for stdin (default: run go list)
    #[arg(long, value_name = "FILE")]
    pub upgrade: Option<PathBuf>,

    /// Directory of the Go module when running go commands
    #[arg(short = 'C', long, default_value = ".")]
    pub dir: PathBuf,

    /// Be more verbose (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl CliArgs {
    /// Build the tree configuration from the flags
    pub fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            root: self.root.clone().unwrap_or_default(),
            max_depth: usize::try_from(self.depth).unwrap_or(usize::MAX),
            show_all: !self.upgrades_only,
            show_dropped_child: self.force,
            visualize_trimmed: !self.no_trim_marker,
            colored: self.color,
        }
    }

    /// Selected output format
    pub fn output_format(&self) -> OutputFormat {
        OutputFormat::from_cli(self.json)
    }

    /// Source of the edge list
    pub fn graph_source(&self) -> InputSource {
        InputSource::from_arg(self.graph.as_deref())
    }

    /// Source of the upgrade listing
    pub fn upgrade_source(&self) -> InputSource {
        InputSource::from_arg(self.upgrade.as_deref())
    }

    /// Check option combinations clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.graph_source() == InputSource::Stdin && self.upgrade_source() == InputSource::Stdin
        {
            return Err(ConfigError::ConflictingOptions {
                message: "--graph - and --upgrade - cannot both read standard input".to_string(),
            });
        }

        let needs_dir = self.graph_source() == InputSource::GoCommand
            || self.upgrade_source() == InputSource::GoCommand;
        if needs_dir && !self.dir.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: self.dir.clone(),
                message: "not a directory".to_string(),
            });
        }

        Ok(())
    }
}
