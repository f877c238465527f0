pub mod state;


pub use state::{RevisionId, StateTable};

use crate::errors::Result;
use crate::notify::{NotificationEvent, Notifier, Webhook};
use crate::runner::{CommandRunner, TestOutcome};
use crate::scm::{resolve_branch_revision, CommitLog, SourceControl};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    Checkout,
    Sync,
    Unresolved,
}

/// What a single branch poll did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchPoll {
    Skipped(SkipReason),
    Unchanged,
    Tested(TestOutcome),
}

pub struct Monitor<S: SourceControl, R: CommandRunner, W: Webhook> {
    pub scm: S,
    pub runner: R,
    pub notifier: Notifier<W>,
    pub sync_command: Option<String>,
}

impl<S: SourceControl, R: CommandRunner, W: Webhook> Monitor<S, R, W> {
    pub fn new(scm: S, runner: R, webhook: W, sync_command: Option<String>) -> Self {
        Self {
            scm,
            runner,
            notifier: Notifier::new(webhook),
            sync_command,
        }
    }

    /// Polls forever, or a single time with `once`. Only fatal errors return.
    pub fn run(&self, branches: Vec<String>, interval: Duration, once: bool) -> Result<()> {
        let mut table = StateTable::new(branches);
        log::info!("Monitoring branches: {:?}", table.branch_names());

        loop {
            self.poll_once(&mut table)?;
            if once {
                return Ok(());
            }
            log::debug!("Sleeping for {:?}", interval);
            std::thread::sleep(interval);
        }
    }

    /// One pass over every branch, in order.
    pub fn poll_once(&self, table: &mut StateTable) -> Result<()> {
        for branch in table.branch_names() {
            match self.poll_branch(table, &branch) {
                Ok(result) => log::debug!("{}: {:?}", branch, result),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => log::error!("Skipping {} this cycle: {}", branch, e),
            }
        }
        Ok(())
    }

    pub fn poll_branch(&self, table: &mut StateTable, branch: &str) -> Result<BranchPoll> {
        if let Err(e) = self.scm.checkout(branch) {
            log::error!("Skipping tests for {} because checkout failed: {}", branch, e);
            return Ok(BranchPoll::Skipped(SkipReason::Checkout));
        }

        if let Some(command) = &self.sync_command {
            if let Err(e) = self.runner.sync(command) {
                log::error!("Failed to fetch updates for {}: {}", branch, e);
                return Ok(BranchPoll::Skipped(SkipReason::Sync));
            }
        }

        let Some(current) = resolve_branch_revision(&self.scm, branch).map(RevisionId::new) else {
            log::error!("Skipping tests for {} because branch can't be resolved", branch);
            return Ok(BranchPoll::Skipped(SkipReason::Unresolved));
        };

        if !table.is_new(branch, &current) {
            log::debug!("{} still at {}", branch, current);
            return Ok(BranchPoll::Unchanged);
        }

        log::info!("New commit detected on {}: {}", branch, current);
        let commit_log = CommitLog::new(&self.scm);
        self.notifier.notify(
            NotificationEvent::Begin,
            branch,
            &commit_log.single(current.as_str()),
        );

        let outcome = self.runner.run_tests()?;
        match outcome {
            TestOutcome::Success => {
                self.notifier.notify(
                    NotificationEvent::Success,
                    branch,
                    &commit_log.single(current.as_str()),
                );
                table.record_pass(branch, current.clone());
            }
            TestOutcome::Failure => {
                let suspects = match table.last_passing(branch) {
                    Some(passing) => commit_log.range(passing.as_str(), current.as_str()),
                    None => commit_log.single(current.as_str()),
                };
                self.notifier
                    .notify(NotificationEvent::Failure, branch, &suspects);
            }
        }

        table.record_seen(branch, current);
        Ok(BranchPoll::Tested(outcome))
    }
}
