//! The per-host session object.
//!
//! [`Session`] owns everything that lives longer than one operation: the settings, the
//! workspace folder, the cached [`BinaryLocation`] and the single integrated-session
//! handle. Every user operation goes through it, and invalidation is explicit.
//!
//! Precondition order for [`Session::open`]: binary, then workspace, then repository.
//! [`Session::run_command`] only needs a workspace.

use crate::core::{
    config::Settings,
    error::{GitFlowError, Result},
    git::{GitAction, GitCli},
    platform::Platform,
    process::{run_with_signal, CommandOutput, CommandRequest, ProcessHandle, ProcessRunner},
    resolver::{BinaryLocation, BinaryResolver, ExecutableProbe},
    snapshot::SnapshotService,
    terminal::{LaunchMode, TerminalLauncher},
};
use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Host-side prompts the session needs while opening
pub trait Interaction {
    /// Ask whether to run `git init` in a folder that is not a repository
    fn confirm_init(&mut self, workspace: &Path) -> bool;

    fn notify(&mut self, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Integrated { pid: u32 },
    External { program: String },
    /// The user declined repository initialization; nothing was launched
    Declined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    Closed,
    Opened(OpenOutcome),
}

pub struct Session {
    settings: Settings,
    workspace: Option<PathBuf>,
    runner: Arc<dyn ProcessRunner>,
    probe: Arc<dyn ExecutableProbe>,
    launcher: TerminalLauncher,
    binary: Option<Option<BinaryLocation>>,
    integrated: Option<Box<dyn ProcessHandle>>,
}

impl Session {
    pub fn new(
        settings: Settings,
        workspace: Option<PathBuf>,
        runner: Arc<dyn ProcessRunner>,
        probe: Arc<dyn ExecutableProbe>,
    ) -> Self {
        Self {
            settings,
            workspace,
            runner,
            probe,
            launcher: TerminalLauncher::new(Platform::current()),
            binary: None,
            integrated: None,
        }
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.launcher = TerminalLauncher::new(platform);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn workspace(&self) -> Option<&Path> {
        self.workspace.as_deref()
    }

    /// Replace the settings; the binary is resolved again on next use
    pub fn apply_settings(&mut self, settings: Settings) {
        self.settings = settings;
        self.invalidate_binary();
    }

    pub fn invalidate_binary(&mut self) {
        self.binary = None;
    }

    /// The resolved binary, resolving on first use
    pub fn binary(&mut self) -> Option<&BinaryLocation> {
        if self.binary.is_none() {
            let resolver = BinaryResolver::new(
                self.settings.configured_binary(),
                self.probe.as_ref(),
                self.launcher.platform(),
            );
            let location = resolver.resolve();
            match &location {
                Some(found) => log::debug!(
                    "Resolved gitflow-tui at {} via {}",
                    found.path.display(),
                    found.resolved_by
                ),
                None => log::debug!("gitflow-tui could not be resolved"),
            }
            self.binary = Some(location);
        }
        self.binary.as_ref().and_then(Option::as_ref)
    }

    fn require_workspace(&self) -> Result<PathBuf> {
        self.workspace.clone().ok_or(GitFlowError::NoWorkspace)
    }

    /// Whether an integrated session is live; a session that exited on its own is forgotten
    pub fn has_integrated_session(&mut self) -> bool {
        if let Some(handle) = self.integrated.as_mut() {
            if handle.has_exited() {
                log::debug!("Integrated session (pid {}) already exited", handle.id());
                self.integrated = None;
            }
        }
        self.integrated.is_some()
    }

    pub fn snapshot_service(&self) -> Result<SnapshotService> {
        Ok(SnapshotService::new(
            self.runner.clone(),
            self.require_workspace()?,
        ))
    }

    pub fn open(&mut self, interaction: &mut dyn Interaction) -> Result<OpenOutcome> {
        let binary = self
            .binary()
            .map(|location| location.path.clone())
            .ok_or(GitFlowError::BinaryNotFound)?;
        let workspace = self.require_workspace()?;

        let git = GitCli::new(self.runner.clone(), &workspace);
        if !git.is_repository() {
            if !interaction.confirm_init(&workspace) {
                log::info!("Repository initialization declined, not opening");
                return Ok(OpenOutcome::Declined);
            }
            git.init()?;
            interaction.notify("Git repository initialized");
        }

        match self.settings.launch_mode() {
            LaunchMode::Integrated => {
                self.close()?;
                let handle = self
                    .launcher
                    .launch_integrated(self.runner.as_ref(), &workspace, &binary)?;
                let pid = handle.id();
                self.integrated = Some(handle);
                log::info!("Started integrated gitflow-tui session (pid {pid})");
                Ok(OpenOutcome::Integrated { pid })
            }
            LaunchMode::External => {
                let plan = self.launcher.launch_external(
                    self.runner.as_ref(),
                    self.probe.as_ref(),
                    &workspace,
                    &binary,
                )?;
                Ok(OpenOutcome::External {
                    program: plan.program,
                })
            }
        }
    }

    pub fn toggle(&mut self, interaction: &mut dyn Interaction) -> Result<ToggleOutcome> {
        if self.has_integrated_session() {
            self.close()?;
            Ok(ToggleOutcome::Closed)
        } else {
            self.open(interaction).map(ToggleOutcome::Opened)
        }
    }

    /// Terminate the integrated session; returns whether one was live
    pub fn close(&mut self) -> Result<bool> {
        match self.integrated.take() {
            Some(mut handle) => {
                log::debug!("Closing integrated session (pid {})", handle.id());
                handle.terminate()?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// The host reports the integrated terminal was closed by the user
    pub fn session_closed(&mut self) {
        if self.integrated.take().is_some() {
            log::debug!("Integrated session closed externally");
        }
    }

    /// Block until the integrated session exits, then forget it
    pub fn wait_integrated(&mut self) -> Result<Option<i32>> {
        let code = match self.integrated.as_mut() {
            Some(handle) => handle.wait()?,
            None => return Ok(None),
        };
        self.session_closed();
        Ok(code)
    }

    /// Run a user git command in the workspace; git's stderr is surfaced verbatim
    pub fn run_command(&self, action: &GitAction) -> Result<CommandOutput> {
        let workspace = self.require_workspace()?;
        GitCli::new(self.runner.clone(), workspace).run_action(action)
    }

    /// [`Session::run_command`] on a background thread; the receiver yields once
    pub fn spawn_command(&self, action: &GitAction) -> Result<Receiver<Result<CommandOutput>>> {
        let workspace = self.require_workspace()?;
        let request = CommandRequest::git(&workspace, action.args());
        log::debug!("Running {} in {}", request.display(), workspace.display());
        Ok(run_with_signal(self.runner.clone(), request))
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            log::warn!("Failed to close integrated session: {e}");
        }
    }
}
