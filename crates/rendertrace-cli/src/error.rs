//! Error types for the rendertrace CLI.
//!
//! `CliError` is what commands return. Domain errors convert into it with
//! `#[from]`, and `main` turns it into a miette report.

use std::path::PathBuf;

use rendertrace_graph::{AnalyzeError, MetadataError};
use thiserror::Error;
use uuid::Uuid;

use crate::job::JobStatus;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or validation failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The analysis core rejected the run
    #[error("Analysis error: {0}")]
    Analyze(#[from] AnalyzeError),

    /// Repository URL could not be interpreted
    #[error("{0}\n\nHint: Pass a URL of the form https://github.com/<owner>/<repo>")]
    Metadata(#[from] MetadataError),

    /// A job transition was rejected
    #[error("Job error: {0}")]
    Job(#[from] JobError),

    /// The input path is neither a directory nor a supported archive
    #[error("Unsupported input: {}\n\nHint: Pass a directory or a .tar.gz / .tgz archive", .0.display())]
    UnsupportedInput(PathBuf),

    /// No eligible source files were found
    #[error("No source files found in {}\n\nHint: Check [source] extensions and excluded_dirs", .0.display())]
    NoSources(PathBuf),

    /// Analysis did not finish in time
    #[error("Analysis timed out after {0}s\n\nHint: Raise --timeout-secs for large projects")]
    Timeout(u64),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Directory traversal errors
    #[error("Failed to walk source directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Background task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file doesn't exist
    #[error("Config file not found: {}\n\nHint: Create rendertrace.toml or pass an existing --config <path>", .0.display())]
    NotFound(PathBuf),

    /// Merged configuration failed to deserialize
    #[error("Invalid configuration: {0}\n\nHint: Check rendertrace.toml and RENDERTRACE_* variables")]
    Invalid(#[from] Box<figment::Error>),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },

    /// Effective configuration could not be rendered
    #[error("Failed to render configuration: {0}")]
    Render(#[from] toml::ser::Error),
}

/// Rejected job state changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JobError {
    #[error("job {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: Uuid,
        from: JobStatus,
        to: JobStatus,
    },

    #[error("job {id} progress cannot go from {from}% back to {to}%")]
    ProgressRegression { id: Uuid, from: u8, to: u8 },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert a CLI error into a miette report for `main`.
pub fn cli_error_to_miette(err: CliError) -> miette::Report {
    match err {
        CliError::Analyze(e) => miette::Report::new(e),
        CliError::Metadata(e) => miette::Report::new(e),
        other => miette::miette!("{}", other),
    }
}
