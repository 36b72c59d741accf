//! External process execution.
//!
//! [`ProcessRunner`] is the seam between the engine and the operating system: queries
//! run to completion and come back as [`CommandOutput`], long-running programs are
//! spawned from a [`LaunchPlan`] and handed back as a [`ProcessHandle`].
//!
//! A non-zero exit or a process that cannot be started is always reported as
//! [`GitFlowError::CommandFailed`] carrying stderr text; raw OS errors never escape `run`.

use crate::core::error::{GitFlowError, Result};
use crossbeam_channel::Receiver;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::thread;

/// A command line to run to completion in a working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRequest {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl CommandRequest {
    pub fn new<I, S>(program: impl Into<String>, args: I, cwd: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
            cwd: cwd.into(),
        }
    }

    /// `git <args>` in `cwd`
    pub fn git<I, S>(cwd: &Path, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new("git", args, cwd)
    }

    /// Human-readable command line, used in logs and error messages
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Everything needed to start a long-running program.
///
/// `attach` selects inherited stdio (integrated session) over null stdio (detached
/// external terminal). `raw_args` appends the arguments to a Windows command line
/// verbatim, for `cmd.exe` lines that carry their own quoting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
    pub attach: bool,
    pub raw_args: bool,
}

impl LaunchPlan {
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Handle to a spawned process
pub trait ProcessHandle: Send {
    fn id(&self) -> u32;

    /// Whether the process has already exited (non-blocking)
    fn has_exited(&mut self) -> bool;

    /// Block until the process exits, returning its exit code
    fn wait(&mut self) -> Result<Option<i32>>;

    /// Kill the process if it is still running and reap it
    fn terminate(&mut self) -> Result<()>;
}

pub trait ProcessRunner: Send + Sync {
    /// Run a command to completion
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput>;

    /// Start a program without waiting for it
    fn spawn(&self, plan: &LaunchPlan) -> Result<Box<dyn ProcessHandle>>;
}

/// Runs real processes through `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, request: &CommandRequest) -> Result<CommandOutput> {
        let command_line = request.display();
        log::debug!("$ {command_line} (in {})", request.cwd.display());

        let output = Command::new(&request.program)
            .args(&request.args)
            .current_dir(&request.cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| GitFlowError::command_failed(&command_line, e.to_string()))?;

        let result = CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code(),
        };

        if !output.status.success() {
            log::debug!(
                "{command_line} exited with {:?}: {}",
                result.exit_code,
                result.stderr.trim()
            );
            return Err(GitFlowError::command_failed(
                command_line,
                result.stderr.trim(),
            ));
        }

        Ok(result)
    }

    fn spawn(&self, plan: &LaunchPlan) -> Result<Box<dyn ProcessHandle>> {
        log::debug!("Spawning {}", plan.display());

        let mut cmd = Command::new(&plan.program);
        push_args(&mut cmd, plan);
        if let Some(cwd) = &plan.cwd {
            cmd.current_dir(cwd);
        }
        for (key, value) in &plan.env {
            cmd.env(key, value);
        }
        if !plan.attach {
            cmd.stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null());
        }

        let child = cmd
            .spawn()
            .map_err(|e| GitFlowError::launch_failed(&plan.program, e))?;
        log::debug!("Spawned {} as pid {}", plan.program, child.id());
        Ok(Box::new(ChildHandle { child }))
    }
}

#[cfg(windows)]
fn push_args(cmd: &mut Command, plan: &LaunchPlan) {
    use std::os::windows::process::CommandExt;

    if plan.raw_args {
        for arg in &plan.args {
            cmd.raw_arg(arg);
        }
    } else {
        cmd.args(&plan.args);
    }
}

#[cfg(not(windows))]
fn push_args(cmd: &mut Command, plan: &LaunchPlan) {
    cmd.args(&plan.args);
}

struct ChildHandle {
    child: Child,
}

impl ProcessHandle for ChildHandle {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn has_exited(&mut self) -> bool {
        matches!(self.child.try_wait(), Ok(Some(_)))
    }

    fn wait(&mut self) -> Result<Option<i32>> {
        Ok(self.child.wait()?.code())
    }

    fn terminate(&mut self) -> Result<()> {
        if self.child.try_wait()?.is_some() {
            return Ok(());
        }
        self.child.kill()?;
        self.child.wait()?;
        Ok(())
    }
}

/// Run `request` on a background thread.
///
/// The returned receiver yields exactly one result when the command completes.
pub fn run_with_signal(
    runner: Arc<dyn ProcessRunner>,
    request: CommandRequest,
) -> Receiver<Result<CommandOutput>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        // The receiver may be gone if the caller stopped waiting.
        let _ = tx.send(runner.run(&request));
    });
    rx
}
