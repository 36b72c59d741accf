//! Parsers for the git query outputs that make up a snapshot.
//!
//! Every function takes raw stdout and returns the full, untruncated collection;
//! truncation happens in [`crate::core::snapshot`].

use crate::core::state::{
    BranchEntry, CommitEntry, RemoteEntry, StashEntry, StatusEntry, SyncState,
};
use std::collections::HashSet;

const SHORT_HASH_LEN: usize = 7;
const CURRENT_BRANCH_MARKER: char = '*';

fn non_blank_lines(output: &str) -> impl Iterator<Item = &str> {
    output.lines().filter(|line| !line.trim().is_empty())
}

/// Split `s` after `n` characters without slicing inside a UTF-8 sequence.
fn split_chars(s: &str, n: usize) -> (&str, &str) {
    match s.char_indices().nth(n) {
        Some((idx, _)) => s.split_at(idx),
        None => (s, ""),
    }
}

/// `git status --porcelain`: code in columns 1-2, path from column 4.
pub fn parse_status(output: &str) -> Vec<StatusEntry> {
    non_blank_lines(output)
        .map(|line| {
            let (code, rest) = split_chars(line, 2);
            let (_, path) = split_chars(rest, 1);
            StatusEntry {
                code: code.to_string(),
                path: path.to_string(),
            }
        })
        .collect()
}

/// `git log --oneline`: 7-character hash, one space, subject.
pub fn parse_commits(output: &str) -> Vec<CommitEntry> {
    non_blank_lines(output)
        .map(|line| {
            let (hash, rest) = split_chars(line, SHORT_HASH_LEN);
            let subject = rest.strip_prefix(' ').unwrap_or(rest);
            CommitEntry {
                short_hash: hash.to_string(),
                subject: subject.to_string(),
            }
        })
        .collect()
}

/// `git branch -a`: a two-column marker prefix, `* ` for the current branch and `+ `
/// for a branch checked out in another worktree.
pub fn parse_branches(output: &str) -> Vec<BranchEntry> {
    non_blank_lines(output)
        .map(|line| {
            let (marker, name) = split_chars(line, 2);
            BranchEntry {
                name: name.trim().to_string(),
                is_current: marker.starts_with(CURRENT_BRANCH_MARKER),
            }
        })
        .collect()
}

/// `git remote -v`: `name<ws>url<ws>(fetch|push)`, deduplicated by name.
pub fn parse_remotes(output: &str) -> Vec<RemoteEntry> {
    let mut seen = HashSet::new();
    let mut remotes = Vec::new();

    for line in non_blank_lines(output) {
        let mut tokens = line.split_whitespace();
        let (Some(name), Some(url)) = (tokens.next(), tokens.next()) else {
            continue;
        };
        if seen.insert(name.to_string()) {
            remotes.push(RemoteEntry {
                name: name.to_string(),
                url: url.to_string(),
            });
        }
    }

    remotes
}

/// `git stash list`: lines kept verbatim.
pub fn parse_stashes(output: &str) -> Vec<StashEntry> {
    non_blank_lines(output)
        .map(|line| StashEntry(line.to_string()))
        .collect()
}

/// `git branch --show-current`: None when empty, i.e. a detached HEAD.
pub fn parse_current_branch(output: &str) -> Option<String> {
    let name = output.trim();
    (!name.is_empty()).then(|| name.to_string())
}

/// `git rev-list --left-right --count HEAD...@{upstream}`: `ahead\tbehind`.
pub fn parse_sync(output: &str) -> Option<SyncState> {
    let (ahead, behind) = output.trim().split_once('\t')?;
    Some(SyncState {
        ahead: ahead.trim().parse().ok()?,
        behind: behind.trim().parse().ok()?,
    })
}
