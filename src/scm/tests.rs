use super::*;
use crate::scm::cli::{candidate_refs, MockSourceControl};
use git2::{Oid, Repository, Signature};
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn git_available() -> bool {
    match Command::new("git").arg("--version").output() {
        Ok(output) => output.status.success(),
        Err(_) => false,
    }
}

fn commit_file(repo: &Repository, content: &str, message: &str) -> Oid {
    let workdir = repo.workdir().unwrap().to_path_buf();
    std::fs::write(workdir.join("file.txt"), content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new("file.txt")).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();

    let signature = Signature::now("Branch Watch", "watch@example.com").unwrap();
    let parent = repo
        .find_reference("refs/heads/main")
        .ok()
        .and_then(|r| r.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(
        Some("refs/heads/main"),
        &signature,
        &signature,
        message,
        &tree,
        &parents,
    )
    .unwrap()
}

/// Repository with two commits on `main` and `dev` left at the first one.
fn scratch_repo() -> (TempDir, Oid, Oid) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    let first = commit_file(&repo, "one\n", "Add first feature");
    repo.set_head("refs/heads/main").unwrap();
    repo.branch("dev", &repo.find_commit(first).unwrap(), false)
        .unwrap();
    let second = commit_file(&repo, "two\n", "Break everything");

    (dir, first, second)
}

#[test]
fn test_candidate_refs_priority() {
    assert_eq!(
        candidate_refs("dev"),
        [
            "refs/heads/dev".to_string(),
            "origin/dev".to_string(),
            "dev".to_string()
        ]
    );
}

#[test]
fn test_resolve_prefers_local_branch() {
    let scm = MockSourceControl::new();
    scm.set_ref("refs/heads/main", "local");
    scm.set_ref("origin/main", "remote");
    scm.set_ref("main", "bare");

    assert_eq!(resolve_branch_revision(&scm, "main"), Some("local".to_string()));
}

#[test]
fn test_resolve_falls_back_to_remote_then_bare_name() {
    let scm = MockSourceControl::new();
    scm.set_ref("origin/main", "remote");
    scm.set_ref("main", "bare");
    assert_eq!(resolve_branch_revision(&scm, "main"), Some("remote".to_string()));

    let scm = MockSourceControl::new();
    scm.set_ref("v1.0", "tagged");
    assert_eq!(resolve_branch_revision(&scm, "v1.0"), Some("tagged".to_string()));
}

#[test]
fn test_resolve_unknown_branch() {
    let scm = MockSourceControl::new();
    assert_eq!(resolve_branch_revision(&scm, "ghost"), None);
}

#[test]
fn test_commit_log_passes_through_output() {
    let scm = MockSourceControl::new();
    let log = CommitLog::new(&scm);

    assert_eq!(log.single("abc"), "commit abc");
    assert_eq!(log.range("abc", "def"), "commits abc..def");
}

#[test]
fn test_commit_log_failure_becomes_text() {
    let scm = MockSourceControl::new().with_failing_logs();
    let log = CommitLog::new(&scm);

    let single = log.single("abc");
    assert!(single.starts_with("Error fetching commit log for abc: "));
    assert!(single.contains("bad object abc"));

    let range = log.range("abc", "def");
    assert!(range.starts_with("Error fetching commit log for abc..def: "));
    assert!(range.contains("bad revision abc..def"));
}

#[test]
fn test_git_cli_resolves_and_checks_out() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (dir, first, second) = scratch_repo();
    let git = GitCli::new(dir.path());

    assert_eq!(git.current_branch().unwrap(), "main");
    assert_eq!(
        resolve_branch_revision(&git, "main"),
        Some(second.to_string())
    );
    assert_eq!(resolve_branch_revision(&git, "dev"), Some(first.to_string()));

    git.checkout("dev").unwrap();
    assert_eq!(git.current_branch().unwrap(), "dev");
}

#[test]
fn test_git_cli_failures() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (dir, _, _) = scratch_repo();
    let git = GitCli::new(dir.path());

    assert!(matches!(
        git.checkout("does-not-exist"),
        Err(crate::errors::WatchError::Git(_))
    ));
    assert!(git.resolve_revision("refs/heads/does-not-exist").is_err());
    assert_eq!(resolve_branch_revision(&git, "does-not-exist"), None);
}

#[test]
fn test_git_cli_logs() {
    if !git_available() {
        eprintln!("git not found, skipping");
        return;
    }
    let (dir, first, second) = scratch_repo();
    let git = GitCli::new(dir.path());
    let log = CommitLog::new(&git);

    let single = log.single(&second.to_string());
    assert!(single.contains(&second.to_string()));
    assert!(single.contains("Break everything"));
    assert!(!single.contains("Add first feature"));

    let range = log.range(&first.to_string(), &second.to_string());
    assert!(range.contains("Break everything"));
    assert!(!range.contains("Add first feature"));

    let missing = log.single("0000000000000000000000000000000000000bad");
    assert!(missing.starts_with("Error fetching commit log for"));
}
