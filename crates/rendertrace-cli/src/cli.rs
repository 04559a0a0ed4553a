//! Command-line interface definition.
//!
//! - `rendertrace analyze <PATH>` - build and persist a component graph
//! - `rendertrace config` - print the effective configuration

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Default analysis timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// rendertrace - component dependency graphs for React projects
#[derive(Parser, Debug)]
#[command(
    name = "rendertrace",
    version,
    about = "Component dependency graphs for React projects",
    long_about = "rendertrace statically analyzes React/JSX/TypeScript sources and writes a\n\
                  graph of components, contexts, and the props, state, import and context\n\
                  relationships between them."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a project directory or tarball
    ///
    /// Gathers eligible sources, builds the component graph, and writes
    /// `<job_id>.json` plus `<job_id>.job.json` to the output directory.
    Analyze(AnalyzeArgs),

    /// Print the effective configuration as TOML
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Project directory or .tar.gz / .tgz archive
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// GitHub URL recorded in the graph metadata
    ///
    /// The project name defaults to the repository name.
    #[arg(long, value_name = "URL")]
    pub repository_url: Option<String>,

    /// Commit hash or ref recorded in the graph metadata
    #[arg(long, value_name = "REV")]
    pub revision: Option<String>,

    /// Project name recorded in the graph metadata
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Output directory (overrides [output] dir)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Abort the analysis after this many seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS, value_name = "SECS")]
    pub timeout_secs: u64,

    /// Worker threads for per-file analysis (overrides [analyzer] max_parallelism)
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    pub jobs: Option<u64>,

    /// Config file (defaults to ./rendertrace.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write compact instead of pretty JSON
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Config file (defaults to ./rendertrace.toml when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
