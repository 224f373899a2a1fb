use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::tui::theme::ThemeConfig;

/// Written by `eventboard init` when no config file exists yet.
pub const DEFAULT_CONFIG: &str = r#"# eventboard configuration

# Start the dashboard with the two sample events.
seed_sample_events = true

# Input poll interval in milliseconds.
tick_rate_ms = 250

[log]
# Overridden by the EVENTBOARD_LOG environment variable.
level = "info"

[theme]
# Named colours ("cyan", "dark_gray", ...) or "rgb(R,G,B)".
# task_done = "green"
# task_open = "dark_gray"
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Whether the dashboard starts with sample events. Default: true
    #[serde(default = "default_true")]
    pub seed_sample_events: bool,

    /// Input poll interval. Default: 250
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            seed_sample_events: true,
            tick_rate_ms: default_tick_rate_ms(),
            log: LogConfig::default(),
            theme: ThemeConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// `tracing` filter directive, e.g. "info" or "eventboard=debug".
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Returns the base eventboard config directory: ~/.eventboard/
pub fn base_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(".eventboard"))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("config.toml"))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(base_dir()?.join("eventboard.log"))
}

pub fn ensure_dirs() -> Result<()> {
    let base = base_dir()?;
    fs::create_dir_all(&base).context("failed to create ~/.eventboard/")?;
    Ok(())
}

/// Load config from ~/.eventboard/config.toml (or return defaults if it doesn't exist)
pub fn load() -> Result<Config> {
    load_from(&config_path()?)
}

pub fn load_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

/// Write [`DEFAULT_CONFIG`] to `path` unless a file is already there.
/// Returns whether a file was written.
pub fn write_default(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(true)
}
