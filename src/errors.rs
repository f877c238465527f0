use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Git operation failed: {0}")]
    Git(String),

    #[error("Sync command failed: {0}")]
    Sync(String),

    #[error("Cannot determine the current branch: {0}")]
    CurrentBranchUnknown(String),

    #[error("Test script not found: {}", .0.display())]
    TestScriptNotFound(PathBuf),

    #[error("Webhook delivery failed: {0}")]
    Webhook(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl WatchError {
    /// Errors that stop the whole monitor rather than a single branch.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            WatchError::CurrentBranchUnknown(_)
                | WatchError::TestScriptNotFound(_)
                | WatchError::Config(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;
