pub mod cli;
pub mod commit_log;

#[cfg(test)]
mod tests;

pub use cli::{resolve_branch_revision, GitCli, SourceControl};
pub use commit_log::CommitLog;
