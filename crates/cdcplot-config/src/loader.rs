//! Configuration loading utilities

use crate::{Config, ConfigValidator};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_VAR: &str = "CDCPLOT_CONFIG";
/// Configuration file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "cdcplot.yaml";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{}': {source}", path.display())]
    IoError {
        /// File that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationError(Vec<String>),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        /// Name of the offending variable
        var: String,
        /// Why the value was rejected
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for cdcplot_common::CdcPlotError {
    fn from(err: ConfigError) -> Self {
        cdcplot_common::CdcPlotError::config_with_source(err.to_string(), err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let config = Self::read_file(path.as_ref())?;
        Self::finish(config, |key| env::var(key).ok())
    }

    /// Load configuration from `$CDCPLOT_CONFIG`, else `./cdcplot.yaml`, else defaults.
    pub fn load() -> cdcplot_common::Result<Config> {
        Ok(Self::load_with_source()?.0)
    }

    /// Like [`ConfigLoader::load`], also returning the file that was read, if any.
    pub fn load_with_source() -> cdcplot_common::Result<(Config, Option<PathBuf>)> {
        match Self::locate() {
            Some(path) => {
                let config = Self::load_config(&path)?;
                Ok((config, Some(path)))
            }
            None => {
                debug!("No configuration file found, using built-in defaults");
                let config = Self::finish(Config::default(), |key| env::var(key).ok())?;
                Ok((config, None))
            }
        }
    }

    /// The configuration file a load would read: `$CDCPLOT_CONFIG` if set,
    /// else `./cdcplot.yaml` if it exists.
    pub fn locate() -> Option<PathBuf> {
        env::var_os(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .or_else(|| Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|path| path.exists()))
    }

    /// Parse YAML text into a configuration without overrides or validation.
    pub fn parse_str(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn read_file(path: &Path) -> Result<Config, ConfigError> {
        info!("Loading configuration from '{}'", path.display());
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_str(&content)
    }

    fn finish(
        mut config: Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Config, ConfigError> {
        Self::apply_overrides(&mut config, lookup)?;
        ConfigValidator::validate(&config)?;
        Ok(config)
    }

    /// Apply `CDCPLOT_*` overrides, reading variables through `lookup`.
    pub fn apply_overrides(
        config: &mut Config,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(url) = lookup("CDCPLOT_URL") {
            config.source.url = url;
        }

        if let Some(path) = lookup("CDCPLOT_CSV_PATH") {
            config.source.csv_path = PathBuf::from(path);
        }

        if let Some(path) = lookup("CDCPLOT_OUTPUT") {
            config.render.output_path = PathBuf::from(path);
        }

        if let Some(show) = lookup("CDCPLOT_SHOW") {
            config.render.show = parse_bool(&show).ok_or_else(|| ConfigError::EnvParseError {
                var: "CDCPLOT_SHOW".to_string(),
                source: format!("expected true/false, got '{show}'").into(),
            })?;
        }

        if let Some(level) = lookup("CDCPLOT_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = ConfigLoader::parse_str("render:\n  show: false\n").unwrap();
        assert!(!config.render.show);
        assert_eq!(config.render.dpi, 300);
        assert_eq!(config.source, crate::SourceConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::default();
        let lookup = lookup_from(&[
            ("CDCPLOT_URL", "http://localhost:8080/rows.csv"),
            ("CDCPLOT_CSV_PATH", "data/rows.csv"),
            ("CDCPLOT_OUTPUT", "out/chart.png"),
            ("CDCPLOT_SHOW", "no"),
            ("CDCPLOT_LOG_LEVEL", "debug"),
        ]);

        ConfigLoader::apply_overrides(&mut config, lookup).unwrap();

        assert_eq!(config.source.url, "http://localhost:8080/rows.csv");
        assert_eq!(config.source.csv_path, PathBuf::from("data/rows.csv"));
        assert_eq!(config.render.output_path, PathBuf::from("out/chart.png"));
        assert!(!config.render.show);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_invalid_show_override() {
        let mut config = Config::default();
        let err = ConfigLoader::apply_overrides(&mut config, lookup_from(&[("CDCPLOT_SHOW", "maybe")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvParseError { ref var, .. } if var == "CDCPLOT_SHOW"));
    }

    #[test]
    fn test_no_overrides_is_identity() {
        let mut config = Config::default();
        ConfigLoader::apply_overrides(&mut config, |_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" 0 "), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
