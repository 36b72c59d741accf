use crate::core::{git_status::StatusSummary, state::Snapshot, state::SyncState};
use serde::Serialize;
use std::fmt;

/// One-line repository summary: `main +1 ~2 ?3 ↑1↓0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLine {
    pub branch: String,
    pub summary: StatusSummary,
    pub sync: Option<SyncState>,
}

impl StatusLine {
    /// None when there is no current branch: a detached HEAD or not a repository.
    /// An unborn branch still has a name.
    pub fn from_snapshot(snapshot: &Snapshot) -> Option<Self> {
        let branch = snapshot.current_branch.clone()?;
        Some(Self {
            branch,
            summary: snapshot.summary,
            sync: snapshot.sync,
        })
    }

    pub fn is_dirty(&self) -> bool {
        self.summary.is_dirty()
    }

    /// The counters after the branch name, empty for a clean tree
    pub fn counters(&self) -> String {
        let mut parts = Vec::new();
        if self.summary.staged > 0 {
            parts.push(format!("+{}", self.summary.staged));
        }
        if self.summary.unstaged > 0 {
            parts.push(format!("~{}", self.summary.unstaged));
        }
        if self.summary.untracked > 0 {
            parts.push(format!("?{}", self.summary.untracked));
        }
        if let Some(sync) = self.sync.filter(SyncState::is_displayable) {
            parts.push(format!("↑{}↓{}", sync.ahead, sync.behind));
        }
        parts.join(" ")
    }

    pub fn tooltip(&self) -> String {
        format!("GitFlow: {}\nRun `gitflow-bridge open` to open GitFlow TUI", self.branch)
    }
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counters = self.counters();
        if counters.is_empty() {
            write!(f, "{}", self.branch)
        } else {
            write!(f, "{} {}", self.branch, counters)
        }
    }
}
