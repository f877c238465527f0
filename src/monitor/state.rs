use std::fmt;

/// Opaque commit identifier as printed by the source-control system.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevisionId(String);

impl RevisionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RevisionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BranchState {
    pub branch: String,
    pub last_seen: Option<RevisionId>,
    pub last_passing: Option<RevisionId>,
}

impl BranchState {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            last_seen: None,
            last_passing: None,
        }
    }
}

/// Per-branch trackers, in the order the branches are polled.
///
/// Lives only as long as the process: nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct StateTable {
    branches: Vec<BranchState>,
}

impl StateTable {
    /// One fresh entry per branch; duplicate names share a single entry.
    pub fn new<I, B>(branches: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<String>,
    {
        let mut table = Self::default();
        for branch in branches {
            let branch = branch.into();
            if table.get(&branch).is_none() {
                table.branches.push(BranchState::new(branch));
            }
        }
        table
    }

    pub fn branch_names(&self) -> Vec<String> {
        self.branches.iter().map(|s| s.branch.clone()).collect()
    }

    pub fn get(&self, branch: &str) -> Option<&BranchState> {
        self.branches.iter().find(|s| s.branch == branch)
    }

    /// Whether `revision` differs from the last one seen on `branch`.
    pub fn is_new(&self, branch: &str, revision: &RevisionId) -> bool {
        self.get(branch)
            .and_then(|s| s.last_seen.as_ref())
            .map_or(true, |seen| seen != revision)
    }

    pub fn last_passing(&self, branch: &str) -> Option<&RevisionId> {
        self.get(branch).and_then(|s| s.last_passing.as_ref())
    }

    pub fn record_seen(&mut self, branch: &str, revision: RevisionId) {
        self.entry(branch).last_seen = Some(revision);
    }

    pub fn record_pass(&mut self, branch: &str, revision: RevisionId) {
        self.entry(branch).last_passing = Some(revision);
    }

    fn entry(&mut self, branch: &str) -> &mut BranchState {
        let index = match self.branches.iter().position(|s| s.branch == branch) {
            Some(index) => index,
            None => {
                self.branches.push(BranchState::new(branch));
                self.branches.len() - 1
            }
        };
        &mut self.branches[index]
    }
}
