//! Layered configuration for the CLI.
//!
//! Priority, lowest first: built-in defaults, `rendertrace.toml` (or the file
//! given with `--config`), `RENDERTRACE_*` environment variables, CLI flags.
//! Environment keys nest with a double underscore, e.g.
//! `RENDERTRACE_OUTPUT__PRETTY=false` or `RENDERTRACE_ANALYZER__MAX_PARALLELISM=2`.

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format as _, Serialized, Toml},
};
use rendertrace_graph::{AnalyzerConfig, SourceFilter};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "rendertrace.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "RENDERTRACE_";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving `<job_id>.json` and `<job_id>.job.json`.
    pub dir: PathBuf,
    /// Pretty-print the graph JSON.
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("rendertrace-out"),
            pretty: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendertraceConfig {
    pub analyzer: AnalyzerConfig,
    pub source: SourceFilter,
    pub output: OutputConfig,
}

impl RendertraceConfig {
    /// Merge defaults, the config file and the environment.
    ///
    /// An explicit `config_path` must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        Self::figment(config_path)?
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)).into())
    }

    pub fn figment(config_path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(Self::default()));

        let config_file = match config_path {
            Some(path) if !path.exists() => {
                return Err(ConfigError::NotFound(path.to_path_buf()).into());
            }
            Some(path) => Some(path.to_path_buf()),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                default_path.exists().then(|| default_path.to_path_buf())
            }
        };

        if let Some(path) = config_file {
            figment = figment.merge(Toml::file(path));
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    /// Render the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Render(e).into())
    }

    pub fn validate(&self) -> Result<()> {
        if self.source.extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "source.extensions".to_string(),
                value: "[]".to_string(),
                hint: "List at least one extension, e.g. [\"tsx\", \"jsx\"]".to_string(),
            }
            .into());
        }
        if self.analyzer.max_parallelism == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "analyzer.max_parallelism".to_string(),
                value: "0".to_string(),
                hint: "Use a positive thread count or remove the key".to_string(),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rendertrace_graph::HookCategory;

    #[test]
    fn test_defaults_without_file() {
        figment::Jail::expect_with(|_jail| {
            let config = RendertraceConfig::load(None).unwrap();
            assert_eq!(config, RendertraceConfig::default());
            assert!(config.output.pretty);
            Ok(())
        });
    }

    #[test]
    fn test_file_then_env_layering() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "rendertrace.toml",
                r#"
                [analyzer]
                max_parallelism = 2

                [analyzer.hooks]
                useSelector = "selector"

                [analyzer.path_aliases]
                "@/" = "src/"

                [source]
                excluded_dirs = ["vendor"]

                [output]
                dir = "graphs"
                pretty = true
                "#,
            )?;
            jail.set_env("RENDERTRACE_OUTPUT__PRETTY", "false");

            let config = RendertraceConfig::load(None).unwrap();
            assert_eq!(config.analyzer.max_parallelism, Some(2));
            assert_eq!(
                config.analyzer.hook_category("useSelector"),
                Some(HookCategory::Selector)
            );
            assert_eq!(config.analyzer.hook_category("useState"), Some(HookCategory::State));
            assert_eq!(config.analyzer.path_aliases["@/"], "src/");
            assert_eq!(config.source.excluded_dirs, vec!["vendor"]);
            assert_eq!(config.source.extensions, SourceFilter::default().extensions);
            assert_eq!(config.output.dir, PathBuf::from("graphs"));
            assert!(!config.output.pretty);
            Ok(())
        });
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        figment::Jail::expect_with(|_jail| {
            assert!(RendertraceConfig::load(Some(Path::new("nope.toml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let mut config = RendertraceConfig::default();
        config.analyzer.max_parallelism = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rendered_toml_has_sections() {
        let text = RendertraceConfig::default().to_toml().unwrap();
        assert!(text.contains("[analyzer]"));
        assert!(text.contains("[source]"));
        assert!(text.contains("[output]"));

        let back: RendertraceConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, RendertraceConfig::default());
    }
}
