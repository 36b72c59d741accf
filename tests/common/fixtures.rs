//! Isolated host environments for running the binary
//!
//! Every command runs with HOME pointed at a temporary directory and an explicit
//! settings file, so the developer's own configuration never leaks into a test.

#![allow(dead_code)]

use gitflow_bridge::core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use assert_cmd::Command;
use tempfile::TempDir;

pub struct TestHost {
    pub home: TempDir,
}

impl TestHost {
    pub fn new() -> Result<Self> {
        Ok(Self {
            home: TempDir::new()?,
        })
    }

    pub fn settings_path(&self) -> PathBuf {
        self.home.path().join("settings.json")
    }

    pub fn write_settings(&self, json: &str) -> Result<()> {
        fs::write(self.settings_path(), json)?;
        Ok(())
    }

    /// Points `binaryPath` at `binary`, with the given terminal mode
    pub fn configure_binary(&self, binary: &Path, integrated: bool) -> Result<()> {
        let settings = serde_json::json!({
            "binaryPath": binary,
            "terminal": { "integrated": integrated },
        });
        self.write_settings(&settings.to_string())
    }

    /// A directory under HOME, for fake executables
    pub fn bin_dir(&self) -> Result<PathBuf> {
        let dir = self.home.path().join("fake-bin");
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// `gitflow-bridge --config <settings> --workspace <workspace>` with colors off
    pub fn command(&self, workspace: &Path) -> anyhow::Result<Command> {
        let mut cmd = Command::cargo_bin("gitflow-bridge")?;
        cmd.env("HOME", self.home.path())
            .env_remove("XDG_CONFIG_HOME")
            .env("NO_COLOR", "1")
            .env("CLICOLOR", "0")
            .env_remove("CLICOLOR_FORCE")
            .arg("--config")
            .arg(self.settings_path())
            .arg("--workspace")
            .arg(workspace);
        Ok(cmd)
    }
}

/// Writes an executable shell script at `path`
#[cfg(unix)]
pub fn write_script(path: &Path, body: &str) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, format!("#!/bin/sh\n{body}\n"))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    Ok(())
}

/// A fake gitflow-tui that records its marker variable in the working directory
#[cfg(unix)]
pub fn write_fake_tui(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("gitflow-tui");
    write_script(&path, "echo \"$GITFLOW_VSCODE\" > launched.txt")?;
    Ok(path)
}

/// A bin dir holding only a link to the real git, for a PATH with no terminals
#[cfg(unix)]
pub fn git_only_path(host: &TestHost) -> anyhow::Result<PathBuf> {
    let dir = host.home.path().join("git-only-bin");
    fs::create_dir_all(&dir)?;
    let git = which::which("git")?;
    std::os::unix::fs::symlink(git, dir.join("git"))?;
    Ok(dir)
}
