use super::cli::SourceControl;

/// Commit log excerpts for notifications.
///
/// Failures never propagate: the error text takes the place of the log so the
/// webhook consumer sees it instead of an empty message.
pub struct CommitLog<'a, S: SourceControl> {
    scm: &'a S,
}

impl<'a, S: SourceControl> CommitLog<'a, S> {
    pub fn new(scm: &'a S) -> Self {
        Self { scm }
    }

    /// Log entry of exactly one revision.
    pub fn single(&self, revision: &str) -> String {
        match self.scm.log_single(revision) {
            Ok(text) => {
                log::info!("Commit log: {}", text);
                text
            }
            Err(e) => fetch_error(revision, e),
        }
    }

    /// Every entry after `from` up to and including `to`.
    pub fn range(&self, from: &str, to: &str) -> String {
        match self.scm.log_range(from, to) {
            Ok(text) => {
                log::info!("Commit log: {}", text);
                text
            }
            Err(e) => fetch_error(&format!("{}..{}", from, to), e),
        }
    }
}

fn fetch_error(label: &str, error: crate::errors::WatchError) -> String {
    log::error!("Failed to fetch commit log for {}: {}", label, error);
    format!("Error fetching commit log for {}: {}", label, error)
}
