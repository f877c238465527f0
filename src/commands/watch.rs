use crate::{
    branches::resolve_branches,
    config::Config,
    errors::Result,
    monitor::Monitor,
    notify::HttpWebhook,
    runner::ProcessRunner,
    scm::GitCli,
};
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct Watch {
    /// Webhook URL
    #[arg(long, short = 'u')]
    pub url: String,

    /// Git repo directory
    #[arg(long, short = 'd')]
    pub dir: PathBuf,

    /// Git branch to monitor, e.g. 'main' or 'main,dev'. Defaults to the current branch
    #[arg(long, short = 'b')]
    pub branch: Option<String>,

    /// Test script to run, relative to the repo directory
    #[arg(long, short = 't')]
    pub test_script: PathBuf,

    /// Shell command to sync updates from remote
    #[arg(long)]
    pub sync_command: Option<String>,

    /// Check interval in hours
    #[arg(long, default_value_t = 1.0)]
    pub interval_hours: f64,

    /// Check interval in minutes, added to the hours
    #[arg(long, default_value_t = 0.0)]
    pub interval_minutes: f64,

    /// Poll every branch once and exit
    #[arg(long)]
    pub once: bool,
}

impl Watch {
    pub fn config(&self) -> Result<Config> {
        Config::new(
            self.url.clone(),
            self.dir.clone(),
            self.branch.clone(),
            self.test_script.clone(),
            self.sync_command.clone(),
            self.interval_hours,
            self.interval_minutes,
        )
    }

    pub fn execute(&self) -> Result<()> {
        let config = self.config()?;
        log::info!("{:#?}", config);

        let repo_dir = config.repo_dir.canonicalize().map_err(|e| {
            log::error!("Cannot open {}: {}", config.repo_dir.display(), e);
            e
        })?;
        // Relative test scripts and sync commands are relative to the repository
        std::env::set_current_dir(&repo_dir)?;

        let git = GitCli::new(&repo_dir);
        let branches = resolve_branches(config.branch_selector.as_deref(), &git)?;

        let runner = ProcessRunner::new(&config.test_script, &repo_dir);
        let webhook = HttpWebhook::new(&config.webhook_url);

        let monitor = Monitor::new(git, runner, webhook, config.sync_command.clone());
        monitor.run(branches, config.interval, self.once)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::time::Duration;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        watch: Watch,
    }

    #[test]
    fn test_defaults() {
        let cli = TestCli::parse_from(["watch", "-u", "http://hook", "-d", "/repo", "-t", "./test.sh"]);
        let config = cli.watch.config().unwrap();

        assert_eq!(config.interval, Duration::from_secs(3600));
        assert_eq!(config.branch_selector, None);
        assert_eq!(config.sync_command, None);
        assert!(!cli.watch.once);
    }

    #[test]
    fn test_all_flags() {
        let cli = TestCli::parse_from([
            "watch",
            "--url",
            "https://hook.example.com/x",
            "--dir",
            "/repo",
            "--branch",
            "main, dev",
            "--test-script",
            "./test.sh",
            "--sync-command",
            "git pull --ff-only",
            "--interval-hours",
            "0",
            "--interval-minutes",
            "2.5",
            "--once",
        ]);
        let config = cli.watch.config().unwrap();

        assert_eq!(config.branch_selector.as_deref(), Some("main, dev"));
        assert_eq!(config.sync_command.as_deref(), Some("git pull --ff-only"));
        assert_eq!(config.interval, Duration::from_secs(150));
        assert!(cli.watch.once);
    }

    #[test]
    fn test_url_is_required() {
        assert!(TestCli::try_parse_from(["watch", "-d", "/repo", "-t", "./test.sh"]).is_err());
    }
}
