//! Configuration file handling
//!
//! Settings here are defaults for every test binary on the machine;
//! command-line flags given to a single binary override them.

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::{Error, Result};
use crate::report::ColorMode;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Console report settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings
    #[serde(default)]
    pub log: LogConfig,
}

/// Console report configuration
#[derive(Debug, Deserialize, Default)]
pub struct OutputConfig {
    /// Whether to colour the report
    #[serde(default)]
    pub color: ColorMode,
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LogConfig {
    /// `EnvFilter` directive used when `XTEST_LOG` is not set
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "xtest=warn".to_string()
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
            tracing::debug!(path = %path.display(), "no config file, using defaults");
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::file_read(path, &e))?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.output.color, ColorMode::Auto);
        assert_eq!(config.log.filter, "xtest=warn");
    }

    #[test]
    fn test_parse_color_and_filter() {
        let config = Config::parse(
            r#"
            [output]
            color = "no"

            [log]
            filter = "xtest=debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.output.color, ColorMode::No);
        assert_eq!(config.log.filter, "xtest=debug");
    }

    #[test]
    fn test_color_accepts_truthy_spellings() {
        let config = Config::parse("[output]\ncolor = \"T\"\n").unwrap();
        assert_eq!(config.output.color, ColorMode::Yes);
    }

    #[test]
    fn test_invalid_toml_is_config_parse_error() {
        let err = Config::parse("[output\ncolor = ").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[output]\ncolor = \"yes\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.output.color, ColorMode::Yes);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::FileRead { .. }));
    }
}
