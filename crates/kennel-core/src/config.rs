//! Engine configuration.
//!
//! Loaded from TOML. Every key is optional; missing keys take the defaults
//! below, unknown keys are rejected.
//!
//! ```toml
//! max_row_bytes = 65536
//! enforce_relations = true
//! ```

use crate::error::{ErrorClass, ErrorOrigin, InternalError};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error as ThisError;

/// Max serialized bytes for a single row when no config overrides it.
pub const DEFAULT_MAX_ROW_BYTES: u32 = 4 * 1024 * 1024;

///
/// DbConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    /// Upper bound on one encoded row.
    pub max_row_bytes: u32,

    /// Check strong relations on save and block deletes of referenced rows.
    pub enforce_relations: bool,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            max_row_bytes: DEFAULT_MAX_ROW_BYTES,
            enforce_relations: true,
        }
    }
}

impl DbConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse, and validate a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_row_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_row_bytes must be greater than zero".into(),
            ));
        }

        Ok(())
    }
}

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for InternalError {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Unsupported, ErrorOrigin::Config, err.to_string())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        let config = DbConfig::from_toml_str("").expect("empty config");

        assert_eq!(config, DbConfig::default());
        assert!(config.enforce_relations);
    }

    #[test]
    fn keys_override_defaults() {
        let config = DbConfig::from_toml_str("max_row_bytes = 512\nenforce_relations = false\n")
            .expect("config");

        assert_eq!(config.max_row_bytes, 512);
        assert!(!config.enforce_relations);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = DbConfig::from_toml_str("cache_size = 3").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn zero_row_limit_is_invalid() {
        let err = DbConfig::from_toml_str("max_row_bytes = 0").unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
        let err: InternalError = err.into();
        assert_eq!(err.origin, ErrorOrigin::Config);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "max_row_bytes = 1024").expect("write config");

        let config = DbConfig::from_path(file.path()).expect("config");
        assert_eq!(config.max_row_bytes, 1024);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = DbConfig::from_path("/nonexistent/kennel.toml").unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
