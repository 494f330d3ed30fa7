//! Engine configuration.
//!
//! Supports loading configuration from:
//! 1. A YAML file
//! 2. Environment variables (with `QPE_` prefix)
//!
//! Precedence (highest to lowest): environment, file, defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Largest counting register the engine will ever build.
pub const MAX_PRECISION: u32 = 16;

/// Engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Ceiling on the number of counting qubits, at most [`MAX_PRECISION`].
    #[serde(default = "default_max_precision")]
    pub max_precision: u32,

    /// Shots used when a request does not specify any.
    #[serde(default = "default_measurements")]
    pub default_measurements: u32,

    /// Attach the full outcome histogram to every result.
    #[serde(default = "default_true")]
    pub include_histogram: bool,
}

fn default_max_precision() -> u32 {
    MAX_PRECISION
}

fn default_measurements() -> u32 {
    1000
}

fn default_true() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_precision: default_max_precision(),
            default_measurements: default_measurements(),
            include_histogram: true,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if given, then apply environment overrides.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.merge_env()
    }

    /// Apply `QPE_*` environment variables on top of this configuration.
    pub fn merge_env(self) -> Result<Self, ConfigError> {
        self.merge_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup.
    ///
    /// Only keys the lookup returns override existing values. A value that
    /// does not parse is an error rather than being skipped.
    pub fn merge_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("QPE_MAX_PRECISION") {
            self.max_precision = parse_var("QPE_MAX_PRECISION", &v)?;
        }
        if let Some(v) = lookup("QPE_DEFAULT_MEASUREMENTS") {
            self.default_measurements = parse_var("QPE_DEFAULT_MEASUREMENTS", &v)?;
        }
        if let Some(v) = lookup("QPE_INCLUDE_HISTOGRAM") {
            self.include_histogram = parse_var("QPE_INCLUDE_HISTOGRAM", &v)?;
        }
        self.validate()?;
        debug!(config = ?self, "engine configuration resolved");
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_precision == 0 || self.max_precision > MAX_PRECISION {
            return Err(ConfigError::Validation(format!(
                "max_precision must lie in 1..={MAX_PRECISION}, got {}",
                self.max_precision
            )));
        }
        if self.default_measurements == 0 {
            return Err(ConfigError::Validation(
                "default_measurements must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Parse(format!("{key}: cannot parse '{value}'")))
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(String),

    /// The file or a variable could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is out of range.
    #[error("Validation error: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.max_precision, 16);
        assert_eq!(config.default_measurements, 1000);
        assert!(config.include_histogram);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = EngineConfig::from_yaml("max_precision: 8\n").unwrap();
        assert_eq!(config.max_precision, 8);
        assert_eq!(config.default_measurements, 1000);
    }

    #[test]
    fn test_yaml_rejects_unknown_and_out_of_range() {
        assert!(matches!(
            EngineConfig::from_yaml("max_precison: 8\n"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("max_precision: 17\n"),
            Err(ConfigError::Validation(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml("default_measurements: 0\n"),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_precision: 6\ninclude_histogram: true").unwrap();

        let config = EngineConfig::from_file(file.path())
            .unwrap()
            .merge_overrides(vars(&[
                ("QPE_MAX_PRECISION", "4"),
                ("QPE_INCLUDE_HISTOGRAM", "false"),
            ]))
            .unwrap();

        assert_eq!(config.max_precision, 4);
        assert!(!config.include_histogram);
        assert_eq!(config.default_measurements, 1000);
    }

    #[test]
    fn test_bad_override_is_an_error() {
        let result = EngineConfig::default().merge_overrides(vars(&[("QPE_MAX_PRECISION", "lots")]));
        assert!(matches!(result, Err(ConfigError::Parse(_))));

        let result = EngineConfig::default().merge_overrides(vars(&[("QPE_MAX_PRECISION", "0")]));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            EngineConfig::from_file("/nonexistent/qpe.yaml"),
            Err(ConfigError::Io(_))
        ));
    }
}
