//! Core configuration loaded from TOML.
//!
//! # Responsibility
//! - Describe where the data file lives and how logging is set up.
//! - Provide defaults so an empty or missing config file is usable.
//!
//! # Invariants
//! - `validate()` runs on every load path before a config is returned.

use crate::logging::{default_log_level, normalize_level};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Data file used when the config does not name one.
pub const DEFAULT_DATA_FILE: &str = "data/modbook.json";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(toml::de::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        Self::Parse(value)
    }
}

/// Logging section of the config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    /// Absolute directory for rolling log files; `None` disables file logs.
    pub dir: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

/// Top-level core configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    pub data_file: PathBuf,
    pub log: LogSettings,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from(DEFAULT_DATA_FILE),
            log: LogSettings::default(),
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: CoreConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml_str(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_file cannot be empty".to_string()));
        }
        normalize_level(&self.log.level).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if let Some(dir) = &self.log.dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log.dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_DATA_FILE};
    use std::path::PathBuf;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.data_file, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.log.dir, None);
    }

    #[test]
    fn parses_all_fields() {
        let config = CoreConfig::from_toml_str(
            r#"
            data_file = "/tmp/modbook/book.json"

            [log]
            level = "WARN"
            dir = "/tmp/modbook/logs"
            "#,
        )
        .unwrap();
        assert_eq!(config.data_file, PathBuf::from("/tmp/modbook/book.json"));
        assert_eq!(config.log.level, "WARN");
        assert_eq!(config.log.dir, Some(PathBuf::from("/tmp/modbook/logs")));
    }

    #[test]
    fn rejects_unknown_level_and_relative_log_dir() {
        let err = CoreConfig::from_toml_str("[log]\nlevel = \"loud\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("loud")));

        let err = CoreConfig::from_toml_str("[log]\ndir = \"logs\"\n").unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn reports_toml_syntax_errors() {
        let err = CoreConfig::from_toml_str("data_file = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
