//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`GitFlowError`], the single error type shared by the snapshot
//! engine, the binary resolver, the terminal launcher and the session. It uses
//! `thiserror` for the definitions and exposes [`Remediation`] hints for the
//! failures a user can act on.
//!
//! # Error Categories
//! - **Preconditions**: no workspace, binary not found
//! - **Commands**: a git invocation exited non-zero (stderr kept verbatim)
//! - **Launches**: a process could not be spawned, no terminal emulator available
//! - **Configuration**: settings file unreadable or malformed

use std::path::PathBuf;
use thiserror::Error;

/// Setting key the host opens when the binary cannot be found.
pub const BINARY_PATH_SETTING: &str = "gitflow.binaryPath";

/// Installation guide for gitflow-tui.
pub const INSTALL_GUIDE_URL: &str = "https://github.com/gitflow/tui#installation";

/// Domain-specific error types for gitflow-bridge
#[derive(Error, Debug)]
pub enum GitFlowError {
    // Precondition failures
    #[error("No workspace folder open")]
    NoWorkspace,

    #[error("GitFlow TUI binary not found. Please install it or configure the path.")]
    BinaryNotFound,

    // Command failures
    #[error("Git command failed: {stderr}")]
    CommandFailed { command: String, stderr: String },

    // Launch failures
    #[error("Failed to launch {program}: {reason}")]
    LaunchFailed { program: String, reason: String },

    #[error("No supported terminal emulator was found")]
    NoTerminalAvailable,

    // Configuration errors
    #[error("Could not find configuration directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read settings file '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results using GitFlowError
pub type Result<T> = std::result::Result<T, GitFlowError>;

/// An action the host can offer next to an error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// Jump to a configuration setting.
    OpenSetting(&'static str),
    /// Open an external URL.
    OpenUrl(&'static str),
    /// Install one of the terminal emulators in [`crate::core::terminal::EMULATORS`].
    InstallTerminal,
}

impl Remediation {
    /// Short button-style label for the remediation
    pub fn label(&self) -> &'static str {
        match self {
            Remediation::OpenSetting(_) => "Configure",
            Remediation::OpenUrl(_) => "Install",
            Remediation::InstallTerminal => "Install a terminal",
        }
    }
}

impl GitFlowError {
    /// Create a command failed error
    pub fn command_failed(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::CommandFailed {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// Create a launch failed error
    pub fn launch_failed(program: impl Into<String>, reason: impl ToString) -> Self {
        Self::LaunchFailed {
            program: program.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a settings read error
    pub fn config_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigRead {
            path: path.into(),
            source,
        }
    }

    /// Create a settings parse error
    pub fn config_parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParse {
            path: path.into(),
            source,
        }
    }

    /// Actions the user can take to recover from this error
    pub fn remediations(&self) -> Vec<Remediation> {
        match self {
            GitFlowError::BinaryNotFound => vec![
                Remediation::OpenSetting(BINARY_PATH_SETTING),
                Remediation::OpenUrl(INSTALL_GUIDE_URL),
            ],
            GitFlowError::NoTerminalAvailable => vec![Remediation::InstallTerminal],
            _ => Vec::new(),
        }
    }
}
