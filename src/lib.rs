//! gitflow-bridge - repository state aggregation and launcher for gitflow-tui.
//!
//! The library gathers a [`Snapshot`] of a repository from six git queries, keeps
//! it fresh with a [`RefreshScheduler`], and opens `gitflow-tui` in an integrated
//! or external terminal through a [`Session`].
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - Snapshot aggregation and the status line
//! - Refresh scheduling
//! - Binary resolution and terminal launching
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use core::{
    // Snapshot engine
    GitAction,
    // Error handling
    GitFlowError,
    Interaction,
    LaunchMode,
    OpenOutcome,
    PublishedSnapshot,
    RefreshScheduler,
    RefreshTrigger,
    Result,
    // Session
    Session,
    Settings,
    Snapshot,
    SnapshotService,
    SnapshotSink,
    StatusLine,
    TerminalLauncher,
};
