//! Type-safe classification of porcelain status codes.
//!
//! `git status --porcelain` reports each file with a two-character code: the first
//! column is the index (staged) state, the second the worktree (unstaged) state.
//! [`GitStatus`] turns a code into one display kind and [`StatusSummary`] counts
//! staged, unstaged and untracked files for the status line.

use serde::Serialize;
use std::fmt;

/// Display kind of a changed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GitStatus {
    /// Modified file (M)
    Modified,
    /// Added/new file in index (A)
    Added,
    /// Deleted file (D)
    Deleted,
    /// Renamed file (R)
    Renamed,
    /// Copied file (C)
    Copied,
    /// Type changed (T)
    TypeChanged,
    /// Untracked file (??)
    Untracked,
    /// Unmerged/conflicted file (UU, AA, DD, ...)
    Unmerged,
}

impl GitStatus {
    /// Classify a two-character porcelain code.
    ///
    /// Returns `None` for codes that are blank or unknown.
    pub fn from_porcelain(code: &str) -> Option<GitStatus> {
        let mut chars = code.chars();
        let index = chars.next().unwrap_or(' ');
        let worktree = chars.next().unwrap_or(' ');

        if index == '?' && worktree == '?' {
            return Some(GitStatus::Untracked);
        }
        if is_conflict(index, worktree) {
            return Some(GitStatus::Unmerged);
        }

        // Modified wins over added wins over deleted, whichever column it appears in.
        let order = [
            ('M', GitStatus::Modified),
            ('A', GitStatus::Added),
            ('D', GitStatus::Deleted),
            ('R', GitStatus::Renamed),
            ('C', GitStatus::Copied),
            ('T', GitStatus::TypeChanged),
        ];
        order
            .iter()
            .find(|(letter, _)| index == *letter || worktree == *letter)
            .map(|(_, status)| *status)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GitStatus::Modified => "M",
            GitStatus::Added => "A",
            GitStatus::Deleted => "D",
            GitStatus::Renamed => "R",
            GitStatus::Copied => "C",
            GitStatus::TypeChanged => "T",
            GitStatus::Untracked => "??",
            GitStatus::Unmerged => "UU",
        }
    }
}

impl fmt::Display for GitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_conflict(index: char, worktree: char) -> bool {
    matches!(
        (index, worktree),
        ('U', _) | (_, 'U') | ('A', 'A') | ('D', 'D')
    )
}

/// Staged / unstaged / untracked counts over a full status listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StatusSummary {
    pub staged: usize,
    pub unstaged: usize,
    pub untracked: usize,
}

impl StatusSummary {
    /// Count codes; untracked files are counted once, never as unstaged.
    pub fn from_codes<'a, I>(codes: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut summary = StatusSummary::default();
        for code in codes {
            let mut chars = code.chars();
            let index = chars.next().unwrap_or(' ');
            let worktree = chars.next().unwrap_or(' ');

            if index == '?' {
                summary.untracked += 1;
                continue;
            }
            if index != ' ' {
                summary.staged += 1;
            }
            if worktree != ' ' {
                summary.unstaged += 1;
            }
        }
        summary
    }

    pub fn is_dirty(&self) -> bool {
        self.staged + self.unstaged + self.untracked > 0
    }
}
