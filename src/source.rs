//! Acquisition of the raw inputs
//!
//! This module provides:
//! - Reading the upgrade listing and the edge list from files or stdin
//! - Running `go list -u -m -json all` and `go mod graph` when no file is given

use crate::error::InputError;
use crate::progress::Progress;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor, Read};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Arguments of the command producing the upgrade listing
pub const GO_LIST_ARGS: &[&str] = &["list", "-u", "-m", "-json", "all"];

/// Arguments of the command producing the edge list
pub const GO_GRAPH_ARGS: &[&str] = &["mod", "graph"];

/// Where a raw input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Read from a file
    File(PathBuf),
    /// Read from standard input
    Stdin,
    /// Run the go command in the working directory
    GoCommand,
}

impl InputSource {
    /// Interpret a CLI value: absent runs go, `-` is stdin, anything else a file
    pub fn from_arg(arg: Option<&Path>) -> Self {
        match arg {
            None => InputSource::GoCommand,
            Some(path) if path.as_os_str() == "-" => InputSource::Stdin,
            Some(path) => InputSource::File(path.to_path_buf()),
        }
    }
}

/// Trait for running go commands
pub trait GoToolRunner {
    /// Run `go` with the given arguments in the specified directory
    fn run(&self, args: &[&str], working_dir: &Path) -> io::Result<Output>;
}

/// Default runner that executes the installed go binary
#[derive(Debug, Default)]
pub struct SystemGo;

impl SystemGo {
    /// Create a new system go runner
    pub fn new() -> Self {
        Self
    }
}

impl GoToolRunner for SystemGo {
    fn run(&self, args: &[&str], working_dir: &Path) -> io::Result<Output> {
        Command::new("go").args(args).current_dir(working_dir).output()
    }
}

/// Run a go command and return its stdout
fn run_go<R: GoToolRunner>(
    runner: &R,
    args: &[&str],
    working_dir: &Path,
    progress: &mut Progress,
) -> Result<Vec<u8>, InputError> {
    let command = format!("go {}", args.join(" "));
    tracing::info!("running '{}' in {}", command, working_dir.display());

    progress.wait_for(&command);
    let result = runner.run(args, working_dir);
    progress.done();

    let output = result.map_err(|e| InputError::spawn_error(&command, e))?;
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(InputError::command_failed(command, stderr));
    }
    Ok(output.stdout)
}

fn read_file(path: &Path) -> Result<Vec<u8>, InputError> {
    tracing::info!("using file {}", path.display());
    std::fs::read(path).map_err(|e| InputError::read_error(path, e))
}

fn read_stdin() -> Result<Vec<u8>, InputError> {
    let mut buffer = Vec::new();
    io::stdin()
        .lock()
        .read_to_end(&mut buffer)
        .map_err(|source| InputError::StdinError { source })?;
    Ok(buffer)
}

/// Acquire the upgrade listing
pub fn read_upgrade_listing<R: GoToolRunner>(
    source: &InputSource,
    runner: &R,
    working_dir: &Path,
    progress: &mut Progress,
) -> Result<Vec<u8>, InputError> {
    let content = match source {
        InputSource::File(path) => read_file(path)?,
        InputSource::Stdin => read_stdin()?,
        InputSource::GoCommand => run_go(runner, GO_LIST_ARGS, working_dir, progress)?,
    };
    tracing::info!("upgrade content retrieved ({} bytes)", content.len());
    Ok(content)
}

/// Open the edge list as a buffered reader
pub fn open_graph<R: GoToolRunner>(
    source: &InputSource,
    runner: &R,
    working_dir: &Path,
    progress: &mut Progress,
) -> Result<Box<dyn BufRead>, InputError> {
    let reader: Box<dyn BufRead> = match source {
        InputSource::File(path) => {
            tracing::info!("using graph file {}", path.display());
            let file = File::open(path).map_err(|e| InputError::read_error(path, e))?;
            Box::new(BufReader::new(file))
        }
        InputSource::Stdin => Box::new(BufReader::new(io::stdin())),
        InputSource::GoCommand => {
            let content = run_go(runner, GO_GRAPH_ARGS, working_dir, progress)?;
            Box::new(Cursor::new(content))
        }
    };
    tracing::info!("graph content retrieved");
    Ok(reader)
}
