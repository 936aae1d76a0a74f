//! deptree - Go module dependency tree CLI tool
//!
//! Shows which Go modules can be upgraded and which requirements have to
//! be bumped along the way.

use clap::Parser;
use deptree::cli::CliArgs;
use deptree::pipeline::run_from_cli;
use deptree::source::SystemGo;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logging(args.verbose);

    if args.color {
        colored::control::set_override(true);
    }

    // Run the main logic and handle errors
    match run(args) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Route tracing output to stderr, `RUST_LOG` wins over `-v`
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("deptree={}", level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

/// Main application logic
fn run(args: CliArgs) -> anyhow::Result<ExitCode> {
    tracing::info!("deptree v{}", env!("CARGO_PKG_VERSION"));

    let runner = SystemGo::new();
    let mut stdout = io::stdout().lock();
    let report = run_from_cli(&args, &runner, &mut stdout)?;
    stdout.flush()?;

    if !report.warnings.is_empty() {
        tracing::info!("{} input entries were skipped", report.warnings.len());
    }

    Ok(ExitCode::SUCCESS)
}
