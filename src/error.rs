use std::path::PathBuf;
use thiserror::Error;

/// Core library errors
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Not a readable directory: {0}")]
    InvalidDirectory(PathBuf),

    #[error("Cannot list directory '{path}': {source}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error at path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory nesting exceeds {limit} levels at '{path}'")]
    DepthLimitExceeded { path: PathBuf, limit: usize },

    #[error("Scan cancelled")]
    Cancelled,
}

impl TallyError {
    /// True when a directory's contents could not be enumerated.
    pub fn is_listing_failure(&self) -> bool {
        matches!(
            self,
            TallyError::Listing { .. } | TallyError::DepthLimitExceeded { .. }
        )
    }

    /// Path the failure is attached to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            TallyError::InvalidDirectory(path)
            | TallyError::Listing { path, .. }
            | TallyError::Io { path, .. }
            | TallyError::DepthLimitExceeded { path, .. } => Some(path),
            TallyError::Config(_) | TallyError::Cancelled => None,
        }
    }
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, TallyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ConfigError::Invalid("depth_limit must be greater than 0".into());
        assert!(err.to_string().contains("depth_limit"));

        let err = TallyError::InvalidDirectory(PathBuf::from("/missing"));
        assert_eq!(err.to_string(), "Not a readable directory: /missing");
    }

    #[test]
    fn error_conversion() {
        let config_err = ConfigError::Invalid("test".into());
        let tally_err: TallyError = config_err.into();
        assert!(matches!(tally_err, TallyError::Config(_)));
    }

    #[test]
    fn listing_failures_carry_path() {
        let err = TallyError::Listing {
            path: PathBuf::from("/locked"),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert!(err.is_listing_failure());
        assert_eq!(err.path(), Some(std::path::Path::new("/locked")));

        let err = TallyError::DepthLimitExceeded {
            path: PathBuf::from("/deep"),
            limit: 4,
        };
        assert!(err.is_listing_failure());

        assert!(!TallyError::Cancelled.is_listing_failure());
        assert!(TallyError::Cancelled.path().is_none());
    }
}
