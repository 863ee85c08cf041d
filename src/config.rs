use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{DEFAULT_ARTIFICIAL_DELAY, DEFAULT_BASE_URL, DEFAULT_LOG_FILE};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV_VAR: &str = "COURIER_CONFIG";

/// User settings, read once at startup
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pause after each response so the waiting state can be seen
    pub artificial_delay_ms: u64,
    /// Overall request timeout; `None` keeps the transport default
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: String,
    /// Host the seeded example queries point at
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            artificial_delay_ms: DEFAULT_ARTIFICIAL_DELAY.as_millis() as u64,
            request_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            log_level: String::from("info"),
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}

impl Config {
    /// Load from `$COURIER_CONFIG`, else `~/.courier/config.yaml`.
    ///
    /// A missing file means defaults; a file that does not parse is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var_os(CONFIG_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(default_config_path);
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }

    pub fn artificial_delay(&self) -> Duration {
        Duration::from_millis(self.artificial_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Parsed log level, falling back to INFO on unknown names
    pub fn tracing_level(&self) -> tracing::Level {
        self.log_level.parse().unwrap_or(tracing::Level::INFO)
    }
}

fn default_config_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".courier")
        .join("config.yaml")
}
