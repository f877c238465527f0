use crate::errors::{Result, WatchError};
#[cfg(test)]
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::process::Command;
#[cfg(test)]
use std::sync::Mutex;

pub trait SourceControl {
    fn checkout(&self, branch: &str) -> Result<()>;
    fn resolve_revision(&self, reference: &str) -> Result<String>;
    fn current_branch(&self) -> Result<String>;
    fn log_single(&self, revision: &str) -> Result<String>;
    fn log_range(&self, from: &str, to: &str) -> Result<String>;
}

pub struct GitCli {
    repo_dir: PathBuf,
}

impl GitCli {
    pub fn new(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: repo_dir.into(),
        }
    }

    fn run_command(&self, args: &[&str]) -> Result<String> {
        log::debug!("git {}", args.join(" "));

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_dir)
            .output()
            .map_err(|e| WatchError::Git(format!("Failed to execute git command: {}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(WatchError::Git(format!(
                "git {} ({}): {}",
                args.join(" "),
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

impl SourceControl for GitCli {
    fn checkout(&self, branch: &str) -> Result<()> {
        self.run_command(&["checkout", branch])?;
        Ok(())
    }

    fn resolve_revision(&self, reference: &str) -> Result<String> {
        self.run_command(&["rev-parse", "--verify", reference])
    }

    fn current_branch(&self) -> Result<String> {
        self.run_command(&["rev-parse", "--abbrev-ref", "HEAD"])
    }

    fn log_single(&self, revision: &str) -> Result<String> {
        self.run_command(&["log", "-1", revision])
    }

    fn log_range(&self, from: &str, to: &str) -> Result<String> {
        self.run_command(&["log", &format!("{}..{}", from, to)])
    }
}

/// Refs tried for a branch, most specific first.
pub fn candidate_refs(branch: &str) -> [String; 3] {
    [
        format!("refs/heads/{}", branch),
        format!("origin/{}", branch),
        branch.to_string(),
    ]
}

/// Returns the commit the branch points to, or `None` if no candidate ref resolves.
pub fn resolve_branch_revision<S: SourceControl + ?Sized>(scm: &S, branch: &str) -> Option<String> {
    for reference in candidate_refs(branch) {
        match scm.resolve_revision(&reference) {
            Ok(revision) if !revision.is_empty() => return Some(revision),
            Ok(_) => continue,
            Err(e) => log::debug!("{} does not resolve: {}", reference, e),
        }
    }
    log::error!("Could not resolve branch '{}' to a commit hash", branch);
    None
}

#[cfg(test)]
pub struct MockSourceControl {
    pub current_branch: Option<String>,
    pub refs: Mutex<HashMap<String, String>>,
    pub failing_checkouts: HashSet<String>,
    pub failing_logs: bool,
    pub checkouts: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockSourceControl {
    pub fn new() -> Self {
        Self {
            current_branch: Some("main".to_string()),
            refs: Mutex::new(HashMap::new()),
            failing_checkouts: HashSet::new(),
            failing_logs: false,
            checkouts: Mutex::new(Vec::new()),
        }
    }

    pub fn with_current_branch(mut self, branch: Option<&str>) -> Self {
        self.current_branch = branch.map(|b| b.to_string());
        self
    }

    pub fn with_failing_checkout(mut self, branch: &str) -> Self {
        self.failing_checkouts.insert(branch.to_string());
        self
    }

    pub fn with_failing_logs(mut self) -> Self {
        self.failing_logs = true;
        self
    }

    /// Points `reference` at `revision`, as if someone had pushed.
    pub fn set_ref(&self, reference: &str, revision: &str) {
        self.refs
            .lock()
            .unwrap()
            .insert(reference.to_string(), revision.to_string());
    }

    pub fn get_checkouts(&self) -> Vec<String> {
        self.checkouts.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SourceControl for MockSourceControl {
    fn checkout(&self, branch: &str) -> Result<()> {
        self.checkouts.lock().unwrap().push(branch.to_string());
        if self.failing_checkouts.contains(branch) {
            return Err(WatchError::Git(format!(
                "error: pathspec '{}' did not match any file(s) known to git",
                branch
            )));
        }
        Ok(())
    }

    fn resolve_revision(&self, reference: &str) -> Result<String> {
        self.refs
            .lock()
            .unwrap()
            .get(reference)
            .cloned()
            .ok_or_else(|| WatchError::Git(format!("fatal: Needed a single revision: {}", reference)))
    }

    fn current_branch(&self) -> Result<String> {
        self.current_branch
            .clone()
            .ok_or_else(|| WatchError::Git("fatal: not a git repository".to_string()))
    }

    fn log_single(&self, revision: &str) -> Result<String> {
        if self.failing_logs {
            return Err(WatchError::Git(format!("fatal: bad object {}", revision)));
        }
        Ok(format!("commit {}", revision))
    }

    fn log_range(&self, from: &str, to: &str) -> Result<String> {
        if self.failing_logs {
            return Err(WatchError::Git(format!("fatal: bad revision {}..{}", from, to)));
        }
        Ok(format!("commits {}..{}", from, to))
    }
}
