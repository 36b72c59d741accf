//! Repository-state aggregation.
//!
//! [`SnapshotService::snapshot`] issues the six section queries plus the current-branch
//! lookup, parses each one and assembles a fresh [`Snapshot`]. A failing query only
//! empties its own section; the status section is the one place where a failure is
//! visible, as a single [`StatusItem::Error`].

use crate::core::{
    error::Result,
    git::GitCli,
    git_status::StatusSummary,
    parse,
    process::ProcessRunner,
    state::{Snapshot, StatusEntry, StatusItem},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const STATUS_LIMIT: usize = 10;
pub const COMMIT_LIMIT: usize = 10;
pub const BRANCH_LIMIT: usize = 10;
pub const STASH_LIMIT: usize = 5;

#[derive(Clone)]
pub struct SnapshotService {
    git: GitCli,
}

impl SnapshotService {
    pub fn new(runner: Arc<dyn ProcessRunner>, repo_root: impl Into<PathBuf>) -> Self {
        Self {
            git: GitCli::new(runner, repo_root),
        }
    }

    pub fn repo_root(&self) -> &Path {
        self.git.workdir()
    }

    pub fn snapshot(&self) -> Snapshot {
        let (status, summary) = match self.git.status_porcelain() {
            Ok(output) => {
                let entries = parse::parse_status(&output);
                let summary = StatusSummary::from_codes(entries.iter().map(|e| e.code.as_str()));
                (status_items(entries), summary)
            }
            Err(e) => {
                log::debug!("Status query failed: {e}");
                (vec![StatusItem::Error], StatusSummary::default())
            }
        };

        let mut commits = section("log", self.git.recent_commits(), parse::parse_commits);
        commits.truncate(COMMIT_LIMIT);

        let mut branches = section("branch", self.git.branches(), parse::parse_branches);
        branches.truncate(BRANCH_LIMIT);

        let current_branch = match self.git.current_branch() {
            Ok(output) => parse::parse_current_branch(&output),
            Err(e) => {
                log::debug!("Current branch query failed: {e}");
                None
            }
        };

        let remotes = section("remote", self.git.remotes(), parse::parse_remotes);

        let mut stashes = section("stash", self.git.stashes(), parse::parse_stashes);
        stashes.truncate(STASH_LIMIT);

        let sync = match self.git.ahead_behind() {
            Ok(output) => parse::parse_sync(&output),
            Err(e) => {
                log::debug!("No sync state (no upstream?): {e}");
                None
            }
        };

        log::debug!(
            "Snapshot of {}: {} status items, {} commits, {} branches, {} remotes, {} stashes",
            self.repo_root().display(),
            status.len(),
            commits.len(),
            branches.len(),
            remotes.len(),
            stashes.len()
        );

        Snapshot {
            taken_at: chrono::Utc::now(),
            status,
            commits,
            branches,
            remotes,
            stashes,
            sync,
            current_branch,
            summary,
        }
    }
}

fn section<T>(name: &str, output: Result<String>, parser: fn(&str) -> Vec<T>) -> Vec<T> {
    match output {
        Ok(stdout) => parser(&stdout),
        Err(e) => {
            log::debug!("{name} query failed, section left empty: {e}");
            Vec::new()
        }
    }
}

/// Truncate to [`STATUS_LIMIT`] files, marking the overflow; no files means clean.
pub fn status_items(entries: Vec<StatusEntry>) -> Vec<StatusItem> {
    if entries.is_empty() {
        return vec![StatusItem::Clean];
    }

    let overflow = entries.len().saturating_sub(STATUS_LIMIT);
    let mut items: Vec<StatusItem> = entries
        .into_iter()
        .take(STATUS_LIMIT)
        .map(StatusItem::File)
        .collect();
    if overflow > 0 {
        items.push(StatusItem::More { count: overflow });
    }
    items
}
