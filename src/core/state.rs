//! Snapshot data structures.
//!
//! This module defines the immutable value produced by one aggregation pass over a
//! repository. A fresh [`Snapshot`] is built on every refresh; nothing in here is ever
//! updated in place.
//!
//! # Public API
//! - [`Snapshot`]: all sections of one refresh plus when it was taken
//! - [`StatusItem`]: a changed file or one of the clean / error / overflow markers
//! - [`CommitEntry`], [`BranchEntry`], [`RemoteEntry`], [`StashEntry`]: section rows
//! - [`SyncState`]: ahead/behind counts against the upstream

use crate::core::git_status::StatusSummary;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusEntry {
    /// Two-character porcelain code, e.g. `"M "` or `"??"`
    pub code: String,
    pub path: String,
}

/// One row of the status section.
///
/// `Clean` and `Error` are never mixed with file rows: a clean tree is a single `Clean`
/// item and a failed status query is a single `Error` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusItem {
    File(StatusEntry),
    /// Number of changed files left out after truncation
    More { count: usize },
    Clean,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitEntry {
    pub short_hash: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchEntry {
    pub name: String,
    pub is_current: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StashEntry(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyncState {
    pub ahead: u32,
    pub behind: u32,
}

impl SyncState {
    /// `0/0` is a real state (upstream configured, in sync) but there is nothing to show.
    pub fn is_displayable(&self) -> bool {
        self.ahead > 0 || self.behind > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub taken_at: DateTime<Utc>,
    pub status: Vec<StatusItem>,
    pub commits: Vec<CommitEntry>,
    pub branches: Vec<BranchEntry>,
    pub remotes: Vec<RemoteEntry>,
    pub stashes: Vec<StashEntry>,
    pub sync: Option<SyncState>,
    /// Current branch from the full branch listing, before truncation
    pub current_branch: Option<String>,
    /// Counts over every changed file, before truncation
    pub summary: StatusSummary,
}

impl Snapshot {
    /// Changed files shown in the status section (markers excluded)
    pub fn files(&self) -> impl Iterator<Item = &StatusEntry> {
        self.status.iter().filter_map(|item| match item {
            StatusItem::File(entry) => Some(entry),
            _ => None,
        })
    }

    pub fn is_clean(&self) -> bool {
        matches!(self.status.as_slice(), [StatusItem::Clean])
    }

    /// True when the status query failed, typically outside a repository
    pub fn is_error(&self) -> bool {
        matches!(self.status.as_slice(), [StatusItem::Error])
    }
}
