use crate::errors::{Result, WatchError};
use crate::scm::SourceControl;

/// Splits a `main, dev` style selector into unique, trimmed branch names.
pub fn parse_selector(selector: &str) -> Vec<String> {
    let mut branches: Vec<String> = Vec::new();
    for name in selector.split(',').map(str::trim) {
        if !name.is_empty() && !branches.iter().any(|b| b == name) {
            branches.push(name.to_string());
        }
    }
    branches
}

/// Branches to watch: the selector if it names any, otherwise the checked-out branch.
pub fn resolve_branches<S: SourceControl>(selector: Option<&str>, scm: &S) -> Result<Vec<String>> {
    if let Some(selector) = selector {
        let branches = parse_selector(selector);
        if !branches.is_empty() {
            return Ok(branches);
        }
        log::warn!("Branch selector '{}' names no branch, using the current one", selector);
    }

    let current = scm
        .current_branch()
        .map_err(|e| WatchError::CurrentBranchUnknown(e.to_string()))?;

    if current.is_empty() || current == "HEAD" {
        return Err(WatchError::CurrentBranchUnknown(
            "HEAD is detached".to_string(),
        ));
    }

    Ok(vec![current])
}
