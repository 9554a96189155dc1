//! Configuration for the kdspace CLI
//!
//! Settings are read from TOML. Lookup order: `--config PATH`, then
//! `<config dir>/kdspace/config.toml`, then built-in defaults. Command-line
//! flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CliError, CliResult};

/// Which index variant answers queries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    #[value(name = "kdtree")]
    KdTree,
    Brute,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::KdTree => write!(f, "kdtree"),
            Backend::Brute => write!(f, "brute"),
        }
    }
}

/// How command results are printed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Top-level CLI configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Query settings
    pub query: QueryConfig,
    /// Output settings
    pub output: OutputConfig,
}

/// Query configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    /// Index variant used by `nearest` and `range`
    pub backend: Backend,
    /// Queries per side of the `verify` grid
    pub grid: usize,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            grid: 16,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl CliConfig {
    /// Load configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> CliResult<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to TOML
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Default config file location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("kdspace").join("config.toml"))
    }

    /// Load from an explicit path, else the default location, else defaults
    ///
    /// An explicit path must exist; a missing default file is not an error.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => {
                    tracing::debug!("no config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path)?;
        let config = Self::from_toml(&content)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> CliResult<()> {
        if self.query.grid < 2 {
            return Err(CliError::InvalidConfig(format!(
                "query.grid must be at least 2, got {}",
                self.query.grid
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.query.backend, Backend::KdTree);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_full_config() {
        let config = CliConfig::from_toml(
            r#"
            [query]
            backend = "brute"
            grid = 4

            [output]
            format = "json"
            "#,
        )
        .unwrap();

        assert_eq!(config.query.backend, Backend::Brute);
        assert_eq!(config.query.grid, 4);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = CliConfig::from_toml("[output]\nformat = \"json\"\n").unwrap();
        assert_eq!(config.query, QueryConfig::default());
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = CliConfig::default();
        config.query.grid = 9;
        let toml = config.to_toml().unwrap();
        assert_eq!(CliConfig::from_toml(&toml).unwrap(), config);
    }

    #[test]
    fn test_invalid_grid() {
        let err = CliConfig::from_toml("[query]\ngrid = 1\n").unwrap_err();
        assert!(matches!(err, CliError::InvalidConfig(_)));
    }

    #[test]
    fn test_unknown_backend() {
        let err = CliConfig::from_toml("[query]\nbackend = \"quadtree\"\n").unwrap_err();
        assert!(matches!(err, CliError::ConfigParse(_)));
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[query]\ngrid = 3\n").unwrap();

        let config = CliConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.query.grid, 3);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(Some(dir.path().join("nope.toml").as_path())).unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }
}
