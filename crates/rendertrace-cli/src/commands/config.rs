//! Config command implementation.

use crate::cli::ConfigArgs;
use crate::config::RendertraceConfig;
use crate::error::Result;

/// Print the merged configuration (defaults, file, environment) as TOML.
pub async fn execute(args: ConfigArgs) -> Result<()> {
    let config = RendertraceConfig::load(args.config.as_deref())?;
    config.validate()?;
    print!("{}", config.to_toml()?);
    Ok(())
}
