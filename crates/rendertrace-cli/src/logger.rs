//! Logging setup for the rendertrace CLI.
//!
//! Verbosity comes from `--verbose` / `--quiet`, otherwise from `RUST_LOG`,
//! falling back to info level for the rendertrace crates.

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const VERBOSE_FILTER: &str = "rendertrace=debug,rendertrace_graph=debug,rendertrace_cli=debug";
const QUIET_FILTER: &str = "rendertrace=error,rendertrace_graph=error,rendertrace_cli=error";
const DEFAULT_FILTER: &str = "rendertrace=info,rendertrace_graph=info,rendertrace_cli=info";

/// Install the global tracing subscriber.
///
/// Must be called once, before any events are emitted. `verbose` wins over
/// `quiet`. Events go to stderr so stdout stays usable for command output.
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Install the global tracing subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
