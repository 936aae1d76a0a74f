//! Application error types using thiserror
//!
//! Error hierarchy:
//! - DeptreeError: Failures of the tree pipeline (listing, graph, root, output)
//! - InputError: Failures acquiring the raw inputs (files, stdin, go commands)
//! - ConfigError: Option combinations the CLI cannot express

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Tree pipeline errors
    #[error(transparent)]
    Deptree(#[from] DeptreeError),

    /// Input acquisition errors
    #[error(transparent)]
    Input(#[from] InputError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while building and printing the tree
#[derive(Error, Debug)]
pub enum DeptreeError {
    /// The upgrade listing as a whole is not usable
    #[error("failed to parse upgrade listing: {message}")]
    Parse { message: String },

    /// No usable edge in the graph
    #[error("dependency graph contains no usable edge")]
    EmptyGraph,

    /// The edge stream could not be read
    #[error("failed to read dependency graph: {source}")]
    GraphRead {
        #[source]
        source: std::io::Error,
    },

    /// The root module cannot be inferred
    #[error("cannot determine root module: {}", describe_candidates(.candidates))]
    RootAmbiguous { candidates: Vec<String> },

    /// The explicitly requested root does not occur in the graph
    #[error("root module '{root}' not found in dependency graph")]
    UnknownRoot { root: String },

    /// The output sink rejected a write
    #[error("failed to write output: {source}")]
    Output {
        #[source]
        source: std::io::Error,
    },
}

fn describe_candidates(candidates: &[String]) -> String {
    if candidates.is_empty() {
        "every module is required by another one".to_string()
    } else {
        format!(
            "{} candidates ({}), pass one as ROOT",
            candidates.len(),
            candidates.join(", ")
        )
    }
}

/// Errors related to acquiring raw input
#[derive(Error, Debug)]
pub enum InputError {
    /// Failed to read an input file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read standard input
    #[error("failed to read standard input: {source}")]
    StdinError {
        #[source]
        source: std::io::Error,
    },

    /// The go command could not be started
    #[error("failed to execute '{command}': {source}")]
    SpawnError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The go command exited with a failure
    #[error("'{command}' failed: {stderr}")]
    CommandFailed { command: String, stderr: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },
}

impl DeptreeError {
    /// Creates a new Parse error
    pub fn parse(message: impl Into<String>) -> Self {
        DeptreeError::Parse {
            message: message.into(),
        }
    }

    /// Creates a new GraphRead error
    pub fn graph_read(source: std::io::Error) -> Self {
        DeptreeError::GraphRead { source }
    }

    /// Creates a new UnknownRoot error
    pub fn unknown_root(root: impl Into<String>) -> Self {
        DeptreeError::UnknownRoot { root: root.into() }
    }

    /// Creates a new Output error
    pub fn output(source: std::io::Error) -> Self {
        DeptreeError::Output { source }
    }
}

impl InputError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        InputError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new SpawnError
    pub fn spawn_error(command: impl Into<String>, source: std::io::Error) -> Self {
        InputError::SpawnError {
            command: command.into(),
            source,
        }
    }

    /// Creates a new CommandFailed error
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        InputError::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }
}
