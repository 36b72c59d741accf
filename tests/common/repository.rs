//! Git repository management and setup utilities
//!
//! Provides functions for creating test repositories in various states: fresh,
//! committed, with a bare upstream to compare against.

#![allow(dead_code)]

use gitflow_bridge::core::error::{GitFlowError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test repository setup result. The TempDir must be kept alive for the duration
/// of the test to prevent cleanup.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Runs git in `repo_path`, failing on a non-zero exit
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;
    if !output.status.success() {
        return Err(GitFlowError::command_failed(
            format!("git {}", args.join(" ")),
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Sets up a fresh git repository on branch `main`
///
/// User identity and signing are configured locally so commits never prompt.
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();

    git(&repo_path, &["init"])?;
    git(&repo_path, &["symbolic-ref", "HEAD", "refs/heads/main"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    Ok(TestRepo {
        temp_dir,
        path: repo_path,
    })
}

/// Sets up a git repository with an initial commit containing "initial.txt"
pub fn setup_test_repo_with_initial_commit() -> Result<TestRepo> {
    let repo = setup_test_repo()?;

    create_file(&repo.path, "initial.txt", "initial content\n")?;
    git_add(&repo.path, "initial.txt")?;
    git_commit(&repo.path, "Initial commit")?;

    Ok(repo)
}

/// A plain directory that is not a git repository
pub fn setup_plain_dir() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let path = temp_dir.path().to_path_buf();
    Ok(TestRepo { temp_dir, path })
}

pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    fs::write(repo_path.join(filename), content)?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "-m", message])?;
    Ok(())
}

/// Creates `count` untracked files named `file<N>.txt`
pub fn create_untracked_files(repo_path: &Path, count: usize) -> Result<()> {
    for i in 1..=count {
        create_file(repo_path, &format!("file{i:02}.txt"), &format!("content{i}\n"))?;
    }
    Ok(())
}

/// Adds a bare `origin` for the repository and pushes `main` with upstream tracking.
///
/// Returns the TempDir holding the bare remote, which must be kept alive.
pub fn add_tracking_remote(repo: &TestRepo) -> Result<TempDir> {
    let remote_dir = TempDir::new()?;
    git(remote_dir.path(), &["init", "--bare"])?;
    let url = remote_dir.path().to_string_lossy().into_owned();
    git(&repo.path, &["remote", "add", "origin", &url])?;
    git(&repo.path, &["push", "-u", "origin", "main"])?;
    Ok(remote_dir)
}
