//! rendertrace CLI - component graphs for React projects.
//!
//! Parses arguments, initializes logging, and dispatches to a command.

use clap::Parser;
use miette::Result;
use rendertrace_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => {
            commands::analyze_execute(analyze_args, args.quiet).await
        }
        cli::Command::Config(config_args) => commands::config_execute(config_args).await,
    };

    result.map_err(error::cli_error_to_miette)
}
