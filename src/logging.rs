//! File-backed `tracing` setup. The TUI owns stdout, so log lines go to
//! `~/.eventboard/eventboard.log`.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::{self, Config};

pub const LOG_ENV: &str = "EVENTBOARD_LOG";

/// Pick the filter directive: the environment wins over the config file.
pub fn filter_directive(env: Option<&str>, configured: &str) -> String {
    match env.map(str::trim) {
        Some(directive) if !directive.is_empty() => directive.to_string(),
        _ => configured.to_string(),
    }
}

pub fn init(cfg: &Config) -> Result<()> {
    config::ensure_dirs()?;
    let path = config::log_path()?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let env = std::env::var(LOG_ENV).ok();
    let directive = filter_directive(env.as_deref(), &cfg.log.level);
    let filter = EnvFilter::try_new(&directive)
        .with_context(|| format!("invalid log filter '{directive}'"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    Ok(())
}
