//! Session settings from `config.toml`.
//!
//! Looked up at `<config dir>/phosphor-ict/config.toml` unless a path is
//! given on the command line. Every field is optional.

use std::path::{Path, PathBuf};

use log::LevelFilter;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub log_level: String,
    pub stop_on_failure: bool,
    pub sim: SimConfig,
}

/// Simulated target behaviour, mostly for rehearsing failure reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// Replaces the family's nominal interrupt period.
    pub interrupt_period_ms: Option<u32>,
    /// Fail the Nth write (1-based).
    pub fail_write_at: Option<usize>,
    /// Keep the interrupt asserted while masked.
    pub assert_while_masked: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            stop_on_failure: false,
            sim: SimConfig::default(),
        }
    }
}

impl Config {
    /// Log level named in the file; unrecognised names fall back to `warn`.
    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::Warn)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(path, e) => write!(f, "{}: {e}", path.display()),
            Self::Parse(path, e) => write!(f, "{}: {e}", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("phosphor-ict").join("config.toml"))
}

/// Load an explicit config file, or the default one if it exists.
pub fn load(explicit: Option<&Path>) -> Result<Config, ConfigError> {
    match explicit {
        Some(path) => read(path),
        None => match default_path() {
            Some(path) if path.is_file() => read(&path),
            _ => Ok(Config::default()),
        },
    }
}

fn read(path: &Path) -> Result<Config, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
    parse(&text).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))
}

pub fn parse(text: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(text)
}
