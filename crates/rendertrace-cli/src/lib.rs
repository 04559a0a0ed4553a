//! rendertrace CLI - local front end for the component graph analyzer.
//!
//! The binary plays every collaborator role around `rendertrace-graph` for a
//! single machine: it gathers sources from a directory or a GitHub-style
//! tarball, tracks the run as a job, enforces a timeout, and persists the
//! resulting graph next to the job record.
//!
//! # Architecture
//!
//! - [`cli`] - clap definitions
//! - [`config`] - layered configuration with figment
//! - [`source`] - directory and archive gathering
//! - [`job`] - job status and progress transitions
//! - [`store`] - graph and job persistence
//! - [`commands`] - `analyze` and `config`
//! - [`logger`] / [`ui`] - tracing setup and terminal output
//!
//! # Example
//!
//! ```rust,no_run
//! use rendertrace_cli::{error::Result, logger};
//!
//! fn main() -> Result<()> {
//!     logger::init_logger(false, false, false);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod job;
pub mod logger;
pub mod source;
pub mod store;
pub mod ui;

pub use config::{OutputConfig, RendertraceConfig};
pub use error::{CliError, ConfigError, JobError, Result};
pub use job::{Job, JobStatus, Stage};
pub use store::GraphStore;
