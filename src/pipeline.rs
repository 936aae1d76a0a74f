//! Pipeline driver coordinating the whole run
//!
//! This module provides:
//! - Workflow coordination: registry fill → tree fill → propagate → print
//! - Input acquisition from files, stdin or the go toolchain
//! - Collection of per-record warnings for reporting

use crate::cli::CliArgs;
use crate::domain::{Tree, TreeConfig};
use crate::error::{AppError, DeptreeError};
use crate::graph::TreeBuilder;
use crate::output::print;
use crate::progress::Progress;
use crate::propagate::adjust;
use crate::registry::Registry;
use crate::source::{open_graph, read_upgrade_listing, GoToolRunner};
use std::io::{BufRead, Write};

/// Result of running the pipeline
#[derive(Debug)]
pub struct Report {
    /// The annotated tree
    pub tree: Tree,
    /// Warnings for skipped listing records and graph lines
    pub warnings: Vec<String>,
}

/// Run the core phases on already acquired inputs
///
/// Each phase completes before the next starts. Nothing is printed here, so
/// a fatal error never leaves partial output behind.
pub fn run_pipeline<R: BufRead>(
    upgrade_listing: &[u8],
    graph: R,
    config: TreeConfig,
) -> Result<Report, DeptreeError> {
    let registry = Registry::fill(upgrade_listing)?;
    tracing::info!("upgrade listing loaded");

    let (mut tree, graph_warnings) = TreeBuilder::fill(graph, config, &registry)?;
    tracing::info!("tree built");

    adjust(&mut tree);

    let mut warnings = registry.warnings().to_vec();
    warnings.extend(graph_warnings);
    Ok(Report { tree, warnings })
}

/// Acquire inputs as configured on the command line, run and print
pub fn run_from_cli<G: GoToolRunner>(
    args: &CliArgs,
    runner: &G,
    writer: &mut dyn Write,
) -> Result<Report, AppError> {
    args.validate()?;

    let mut progress = Progress::for_stderr();
    let listing = read_upgrade_listing(&args.upgrade_source(), runner, &args.dir, &mut progress)?;
    let graph = open_graph(&args.graph_source(), runner, &args.dir, &mut progress)?;

    let report = run_pipeline(&listing, graph, args.tree_config())?;
    print(&report.tree, args.output_format(), writer)?;
    tracing::info!("finished");

    Ok(report)
}
