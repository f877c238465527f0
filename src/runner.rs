use crate::errors::{Result, WatchError};
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Success,
    Failure,
}

pub trait CommandRunner {
    /// Runs the test command. Only a missing executable is an `Err`.
    fn run_tests(&self) -> Result<TestOutcome>;
    fn sync(&self, command: &str) -> Result<()>;
}

pub struct ProcessRunner {
    test_script: PathBuf,
    repo_dir: PathBuf,
}

impl ProcessRunner {
    pub fn new(test_script: impl Into<PathBuf>, repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            test_script: test_script.into(),
            repo_dir: repo_dir.into(),
        }
    }
}

impl CommandRunner for ProcessRunner {
    fn run_tests(&self) -> Result<TestOutcome> {
        log::info!("Running {}", self.test_script.display());

        let status = match Command::new(&self.test_script)
            .current_dir(&self.repo_dir)
            .status()
        {
            Ok(status) => status,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::error!("Test script not found: {}", self.test_script.display());
                return Err(WatchError::TestScriptNotFound(self.test_script.clone()));
            }
            Err(e) => {
                log::error!("Tests failed to start: {}", e);
                return Ok(TestOutcome::Failure);
            }
        };

        if status.success() {
            Ok(TestOutcome::Success)
        } else {
            log::warn!("Tests failed: {}", status);
            Ok(TestOutcome::Failure)
        }
    }

    fn sync(&self, command: &str) -> Result<()> {
        log::info!("Syncing: {}", command);

        let status = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.repo_dir)
            .status()
            .map_err(|e| WatchError::Sync(format!("cannot run '{}': {}", command, e)))?;

        if !status.success() {
            return Err(WatchError::Sync(format!("'{}' exited with {}", command, status)));
        }
        Ok(())
    }
}

#[cfg(test)]
pub struct MockRunner {
    pub outcomes: std::sync::Mutex<std::collections::VecDeque<TestOutcome>>,
    pub missing_script: bool,
    pub failing_sync: bool,
    pub test_runs: std::sync::Mutex<usize>,
    pub syncs: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockRunner {
    pub fn new() -> Self {
        Self {
            outcomes: std::sync::Mutex::new(std::collections::VecDeque::new()),
            missing_script: false,
            failing_sync: false,
            test_runs: std::sync::Mutex::new(0),
            syncs: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Queues the outcomes of the next test runs. Runs past the queue pass.
    pub fn with_outcomes(self, outcomes: Vec<TestOutcome>) -> Self {
        self.outcomes.lock().unwrap().extend(outcomes);
        self
    }

    pub fn with_missing_script(mut self) -> Self {
        self.missing_script = true;
        self
    }

    pub fn with_failing_sync(mut self) -> Self {
        self.failing_sync = true;
        self
    }

    pub fn push_outcome(&self, outcome: TestOutcome) {
        self.outcomes.lock().unwrap().push_back(outcome);
    }

    pub fn get_test_runs(&self) -> usize {
        *self.test_runs.lock().unwrap()
    }

    pub fn get_syncs(&self) -> Vec<String> {
        self.syncs.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl CommandRunner for MockRunner {
    fn run_tests(&self) -> Result<TestOutcome> {
        if self.missing_script {
            return Err(WatchError::TestScriptNotFound(PathBuf::from("./missing.sh")));
        }
        *self.test_runs.lock().unwrap() += 1;
        Ok(self
            .outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(TestOutcome::Success))
    }

    fn sync(&self, command: &str) -> Result<()> {
        self.syncs.lock().unwrap().push(command.to_string());
        if self.failing_sync {
            return Err(WatchError::Sync(format!("'{}' exited with exit status: 1", command)));
        }
        Ok(())
    }
}
