//! Core functionality for gitflow-bridge.
//!
//! This module provides the repository snapshot engine, binary resolution,
//! terminal launching, the session object and the output helpers.

pub mod colors;
pub mod config;
pub mod dirs;
pub mod error;
pub mod git;
pub mod git_status;
pub mod output;
pub mod parse;
pub mod platform;
pub mod process;
pub mod resolver;
pub mod scheduler;
pub mod session;
pub mod snapshot;
pub mod state;
pub mod statusline;
pub mod terminal;

#[cfg(test)]
pub(crate) mod testing;

// === Error handling ===
pub use error::{GitFlowError, Remediation, Result};

// === Process plumbing ===
// Everything that talks to git or starts gitflow-tui goes through a ProcessRunner
pub use process::{
    run_with_signal, CommandOutput, CommandRequest, LaunchPlan, ProcessHandle, ProcessRunner,
    SystemRunner,
};

// === Git operations ===
pub use git::{GitAction, GitCli};
pub use git_status::{GitStatus, StatusSummary};

// === Snapshot model and aggregation ===
pub use snapshot::SnapshotService;
pub use state::{
    BranchEntry, CommitEntry, RemoteEntry, Snapshot, StashEntry, StatusEntry, StatusItem,
    SyncState,
};
pub use statusline::StatusLine;

// === Refresh scheduling ===
pub use scheduler::{PublishedSnapshot, RefreshScheduler, RefreshTrigger, SnapshotSink};

// === Binary resolution and launching ===
pub use platform::Platform;
pub use resolver::{BinaryLocation, BinaryResolver, ExecutableProbe, ResolvedBy, SystemProbe};
pub use terminal::{LaunchMode, TerminalLauncher};

// === Session ===
pub use config::Settings;
pub use session::{Interaction, OpenOutcome, Session, ToggleOutcome};

// === Output formatting ===
pub use output::{
    print_error, print_error_with_remediation, print_info, print_section_header,
    print_success, print_warning,
};
