// File: ./src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::model::DEFAULT_NAMESPACE_TITLE;
use crate::storage::ImportStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use strum::{Display, EnumIter, EnumString};

fn default_true() -> bool {
    true
}

fn default_namespace_title() -> String {
    DEFAULT_NAMESPACE_TITLE.to_string()
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct Config {
    #[serde(default = "default_namespace_title")]
    pub namespace_title: String,
    #[serde(default)]
    pub log_level: LogLevel,
    #[serde(default = "default_true")]
    pub pretty_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            namespace_title: default_namespace_title(),
            log_level: LogLevel::default(),
            pretty_output: true,
        }
    }
}

impl Config {
    /// Reads `config.toml` from the context's config dir. A missing file is
    /// reported as "Config file not found".
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    /// Like `load`, but a missing file yields the defaults. Other failures
    /// (unreadable file, bad TOML) are still errors.
    pub fn load_or_default(ctx: &dyn AppContext) -> Result<Self> {
        match Self::load(ctx) {
            Ok(config) => Ok(config),
            Err(e) if Self::is_missing_config_error(&e) => {
                log::debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Whether an error from `load` means the config file does not exist,
    /// either through the explicit message or an IO NotFound in the chain.
    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }

        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        ImportStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            ImportStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::TestContext;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: Config = toml::from_str("log_level = \"debug\"").unwrap();
        assert_eq!(config.namespace_title, DEFAULT_NAMESPACE_TITLE);
        assert_eq!(config.log_level, LogLevel::Debug);
        assert!(config.pretty_output);
    }

    #[test]
    fn test_missing_config_detection() {
        let ctx = TestContext::new();
        let err = Config::load(&ctx).unwrap_err();
        assert!(Config::is_missing_config_error(&err));
        assert_eq!(Config::load_or_default(&ctx).unwrap(), Config::default());
    }

    #[test]
    fn test_bad_toml_is_not_missing() {
        let ctx = TestContext::new();
        fs::write(ctx.get_config_file_path().unwrap(), "namespace_title = [").unwrap();
        let err = Config::load(&ctx).unwrap_err();
        assert!(!Config::is_missing_config_error(&err));
        assert!(Config::load_or_default(&ctx).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let ctx = TestContext::new();
        let config = Config {
            namespace_title: "From TickTick (2024)".to_string(),
            log_level: LogLevel::Warn,
            pretty_output: false,
        };
        config.save(&ctx).unwrap();
        assert_eq!(Config::load(&ctx).unwrap(), config);
    }

    #[test]
    fn test_log_level_names() {
        for level in LogLevel::iter() {
            assert_eq!(LogLevel::from_str(&level.to_string()).unwrap(), level);
        }
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::Warn.to_filter(), log::LevelFilter::Warn);
    }
}
