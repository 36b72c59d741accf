//! Git command-line operations.
//!
//! This module provides [`GitCli`], a thin interface over the `git` executable bound to
//! one working directory. Every call goes through a [`ProcessRunner`], so the fixed
//! query set can be answered by a real `git` or by a test double.
//!
//! # Public API
//! - [`GitCli`]: query and mutation entry points for one working directory
//! - [`GitAction`]: user-invoked commands (commit, push, pull, checkout, ...)

use crate::core::{
    error::Result,
    process::{CommandOutput, CommandRequest, ProcessRunner},
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const STATUS_ARGS: &[&str] = &["status", "--porcelain"];
pub const RECENT_COMMITS_ARGS: &[&str] = &["log", "--oneline", "-10"];
pub const BRANCHES_ARGS: &[&str] = &["branch", "-a"];
pub const REMOTES_ARGS: &[&str] = &["remote", "-v"];
pub const STASH_ARGS: &[&str] = &["stash", "list"];
pub const SYNC_ARGS: &[&str] = &["rev-list", "--left-right", "--count", "HEAD...@{upstream}"];
pub const CURRENT_BRANCH_ARGS: &[&str] = &["branch", "--show-current"];
pub const REPOSITORY_CHECK_ARGS: &[&str] = &["rev-parse", "--git-dir"];
pub const INIT_ARGS: &[&str] = &["init"];

/// A git command invoked on behalf of the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitAction {
    Status,
    Log,
    Branches,
    Commit { message: String },
    Push,
    Pull,
    Stash,
    Checkout { branch: String },
    /// Arbitrary arguments passed straight to git
    Raw(Vec<String>),
}

impl GitAction {
    pub fn args(&self) -> Vec<String> {
        let fixed: &[&str] = match self {
            GitAction::Status => &["status"],
            GitAction::Log => &["log", "--oneline", "-20"],
            GitAction::Branches => &["branch", "-a"],
            GitAction::Push => &["push"],
            GitAction::Pull => &["pull"],
            GitAction::Stash => &["stash"],
            GitAction::Commit { message } => {
                return vec!["commit".to_string(), "-m".to_string(), message.clone()]
            }
            GitAction::Checkout { branch } => {
                return vec!["checkout".to_string(), branch.clone()]
            }
            GitAction::Raw(args) => return args.clone(),
        };
        fixed.iter().map(|arg| arg.to_string()).collect()
    }

    /// Whether the action changes repository state, so views should refresh afterwards
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            GitAction::Status | GitAction::Log | GitAction::Branches
        )
    }
}

#[derive(Clone)]
pub struct GitCli {
    runner: Arc<dyn ProcessRunner>,
    workdir: PathBuf,
}

impl GitCli {
    pub fn new(runner: Arc<dyn ProcessRunner>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            runner,
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Execute `git <args>` in the working directory
    pub fn execute<I, S>(&self, args: I) -> Result<CommandOutput>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.runner.run(&CommandRequest::git(&self.workdir, args))
    }

    fn stdout_of(&self, args: &[&str]) -> Result<String> {
        Ok(self.execute(args.iter().copied())?.stdout)
    }

    pub fn status_porcelain(&self) -> Result<String> {
        self.stdout_of(STATUS_ARGS)
    }

    pub fn recent_commits(&self) -> Result<String> {
        self.stdout_of(RECENT_COMMITS_ARGS)
    }

    pub fn branches(&self) -> Result<String> {
        self.stdout_of(BRANCHES_ARGS)
    }

    pub fn remotes(&self) -> Result<String> {
        self.stdout_of(REMOTES_ARGS)
    }

    pub fn stashes(&self) -> Result<String> {
        self.stdout_of(STASH_ARGS)
    }

    pub fn ahead_behind(&self) -> Result<String> {
        self.stdout_of(SYNC_ARGS)
    }

    /// Name of the checked-out branch, also for an unborn one; empty on a detached HEAD
    pub fn current_branch(&self) -> Result<String> {
        self.stdout_of(CURRENT_BRANCH_ARGS)
    }

    /// `git rev-parse --git-dir` succeeds
    pub fn is_repository(&self) -> bool {
        self.execute(REPOSITORY_CHECK_ARGS.iter().copied()).is_ok()
    }

    pub fn init(&self) -> Result<()> {
        self.execute(INIT_ARGS.iter().copied())?;
        Ok(())
    }

    pub fn run_action(&self, action: &GitAction) -> Result<CommandOutput> {
        self.execute(action.args())
    }
}
