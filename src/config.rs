use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};
use crate::scanner::DEFAULT_DEPTH_LIMIT;

/// Output formats understood by `scan`
pub const OUTPUT_FORMATS: &[&str] = &["listing", "tree", "json"];

/// Child orderings understood by `scan`
pub const SORT_ORDERS: &[&str] = &["none", "name", "size"];

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scanner: ScannerConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    /// Resolve symbolic links to their targets
    pub follow_symlinks: bool,
    /// Abort when entries nest deeper than this
    pub depth_limit: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: listing, tree, json
    pub format: String,
    /// Child order: none, name, size
    pub sort: String,
    /// Show direct file counts in tree output
    pub show_counts: bool,
    /// Deepest level shown in tree output
    pub max_depth: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_symlinks: true,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "listing".to_string(),
            sort: "none".to_string(),
            show_counts: true,
            max_depth: 3,
        }
    }
}

impl Config {
    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the per-user config file is
    /// read when present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path().filter(|p| p.is_file()) {
                Some(path) => path,
                None => {
                    tracing::debug!("No config file found, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ParseError {
                path: path.clone(),
                source,
            })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded config file");
        Ok(config)
    }

    /// `$XDG_CONFIG_HOME/dirtally/config.toml` or the platform equivalent
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("dirtally").join("config.toml"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.scanner.depth_limit == 0 {
            return Err(ConfigError::Invalid(
                "scanner.depth_limit must be greater than 0".to_string(),
            ));
        }

        if !OUTPUT_FORMATS.contains(&self.output.format.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "output.format must be one of {}, got '{}'",
                OUTPUT_FORMATS.join(", "),
                self.output.format
            )));
        }

        if !SORT_ORDERS.contains(&self.output.sort.to_lowercase().as_str()) {
            return Err(ConfigError::Invalid(format!(
                "output.sort must be one of {}, got '{}'",
                SORT_ORDERS.join(", "),
                self.output.sort
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output.format, "listing");
        assert!(config.scanner.follow_symlinks);
    }

    #[test]
    fn config_serializes_to_toml() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[scanner]"));
        assert!(toml_str.contains("[output]"));
    }

    #[test]
    fn zero_depth_limit_is_rejected() {
        let mut config = Config::default();
        config.scanner.depth_limit = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let mut config = Config::default();
        config.output.format = "xml".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("xml"));
    }

    #[test]
    fn format_and_sort_are_case_insensitive() {
        let mut config = Config::default();
        config.output.format = "Tree".to_string();
        config.output.sort = "SIZE".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn default_path_is_under_config_dir() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("dirtally/config.toml"));
        }
    }
}
