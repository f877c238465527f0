use crate::errors::{Result, WatchError};
use std::path::PathBuf;
use std::time::Duration;

/// Everything the monitor needs, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub webhook_url: String,
    pub repo_dir: PathBuf,
    pub branch_selector: Option<String>,
    pub test_script: PathBuf,
    pub sync_command: Option<String>,
    pub interval: Duration,
}

impl Config {
    pub fn new(
        webhook_url: String,
        repo_dir: PathBuf,
        branch_selector: Option<String>,
        test_script: PathBuf,
        sync_command: Option<String>,
        interval_hours: f64,
        interval_minutes: f64,
    ) -> Result<Self> {
        validate_url(&webhook_url)?;

        let sync_command = sync_command.filter(|command| !command.trim().is_empty());

        Ok(Self {
            webhook_url,
            repo_dir,
            branch_selector,
            test_script,
            sync_command,
            interval: poll_interval(interval_hours, interval_minutes)?,
        })
    }
}

/// Hours and minutes are additive and may both be fractional.
pub fn poll_interval(hours: f64, minutes: f64) -> Result<Duration> {
    if !hours.is_finite() || !minutes.is_finite() {
        return Err(WatchError::Config(
            "interval must be a finite number".to_string(),
        ));
    }
    if hours < 0.0 || minutes < 0.0 {
        return Err(WatchError::Config(format!(
            "interval cannot be negative ({}h {}m)",
            hours, minutes
        )));
    }

    let seconds = hours * 60.0 * 60.0 + minutes * 60.0;
    if seconds <= 0.0 {
        return Err(WatchError::Config(
            "interval must be greater than zero".to_string(),
        ));
    }

    Duration::try_from_secs_f64(seconds).map_err(|e| WatchError::Config(e.to_string()))
}

fn validate_url(url: &str) -> Result<()> {
    let parsed = reqwest::Url::parse(url)
        .map_err(|e| WatchError::Config(format!("invalid webhook url '{}': {}", url, e)))?;

    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(WatchError::Config(format!(
            "unsupported webhook scheme '{}'",
            scheme
        ))),
    }
}
