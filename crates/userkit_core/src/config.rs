//! Runtime configuration for userkit entry points.
//!
//! # Responsibility
//! - Load settings from an optional TOML file.
//! - Layer `USERKIT_*` environment overrides on top.
//!
//! # Invariants
//! - Every field has a default, so an empty file is a valid config.
//! - `validate()` runs after all layers are applied.

use crate::db::DEFAULT_DB_FILE_NAME;
use crate::logging::{default_log_level, normalize_log_level};
use crate::weather::DEFAULT_WEATHER_BASE_URL;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const ENV_DB_PATH: &str = "USERKIT_DB_PATH";
pub const ENV_WEATHER_URL: &str = "USERKIT_WEATHER_URL";
pub const ENV_LOG_LEVEL: &str = "USERKIT_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "USERKIT_LOG_DIR";

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
            Self::Parse(err) => write!(f, "failed to parse config: {err}"),
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

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub weather_base_url: String,
    pub log_level: String,
    /// File logging stays off when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML file. A missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Applies `USERKIT_*` overrides read through `lookup`.
    ///
    /// Pass `|key| std::env::var(key).ok()` for the process environment.
    /// Blank values are ignored.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(ENV_DB_PATH) {
            self.database_path = PathBuf::from(value);
        }
        if let Some(value) = read(ENV_WEATHER_URL) {
            self.weather_base_url = value;
        }
        if let Some(value) = read(ENV_LOG_LEVEL) {
            self.log_level = value;
        }
        if let Some(value) = read(ENV_LOG_DIR) {
            self.log_dir = Some(PathBuf::from(value));
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.database_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid(
                "database_path cannot be empty".to_string(),
            ));
        }

        let url = url::Url::parse(&self.weather_base_url).map_err(|err| {
            ConfigError::Invalid(format!(
                "weather_base_url `{}` is not a url: {err}",
                self.weather_base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Invalid(format!(
                "weather_base_url must use http or https, got `{}`",
                url.scheme()
            )));
        }

        normalize_log_level(&self.log_level)
            .map_err(|err| ConfigError::Invalid(format!("log_level: {err}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{
        AppConfig, ConfigError, ENV_DB_PATH, ENV_LOG_DIR, ENV_LOG_LEVEL, ENV_WEATHER_URL,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn empty_document_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_path, PathBuf::from("users.db"));
        assert_eq!(config.weather_base_url, "https://api.weather.com/v1");
        config.validate().unwrap();
    }

    #[test]
    fn toml_fields_override_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            database_path = "/var/lib/userkit/people.db"
            log_level = "warn"
            "#,
        )
        .unwrap();
        assert_eq!(
            config.database_path,
            PathBuf::from("/var/lib/userkit/people.db")
        );
        assert_eq!(config.log_level, "warn");
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = AppConfig::from_toml_str("databse_path = \"typo.db\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_win_and_blank_values_are_ignored() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DB_PATH, "/tmp/override.db"),
            (ENV_WEATHER_URL, "  "),
            (ENV_LOG_DIR, "/tmp/userkit-logs"),
        ]);

        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| env.get(key).map(|value| value.to_string()));

        assert_eq!(config.database_path, PathBuf::from("/tmp/override.db"));
        assert_eq!(config.weather_base_url, "https://api.weather.com/v1");
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/userkit-logs")));
    }

    #[test]
    fn validate_rejects_non_http_base_url_and_empty_db_path() {
        let config = AppConfig {
            weather_base_url: "ftp://weather.example".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let config = AppConfig {
            database_path: PathBuf::new(),
            ..AppConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn validate_rejects_unknown_log_level_from_env() {
        let mut config = AppConfig::default();
        config.apply_env_overrides(|key| (key == ENV_LOG_LEVEL).then(|| "loud".to_string()));

        assert!(config.log_dir.is_none());
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("loud"));

        config.log_level = "WARNING".to_string();
        config.validate().unwrap();
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
