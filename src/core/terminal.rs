//! Launching gitflow-tui in a terminal.
//!
//! Integrated launches start the binary directly with the host's stdio. External
//! launches open an OS-native terminal window:
//!
//! - **Windows**: `cmd /C start cmd /k "cd /d <dir> && <binary>"`, passed as a raw
//!   command line
//! - **macOS**: Terminal.app driven through `osascript`
//! - **Other Unix**: the first emulator of [`EMULATORS`] found on `PATH`
//!
//! Plans are plain [`LaunchPlan`] values, so every platform's command line can be
//! built and inspected on any host.

use crate::core::{
    error::{GitFlowError, Result},
    platform::Platform,
    process::{LaunchPlan, ProcessHandle, ProcessRunner},
    resolver::ExecutableProbe,
};
use std::borrow::Cow;
use std::path::Path;

/// Marker variable set in every launched gitflow-tui process
pub const MARKER_ENV: (&str, &str) = ("GITFLOW_VSCODE", "1");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchMode {
    Integrated,
    External,
}

impl LaunchMode {
    pub fn from_integrated_flag(integrated: bool) -> Self {
        if integrated {
            LaunchMode::Integrated
        } else {
            LaunchMode::External
        }
    }
}

/// How an emulator is told its working directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkdirFlag {
    /// `--flag=<dir>`
    Joined(&'static str),
    /// `--flag <dir>`
    Separate(&'static str),
    /// No flag; the emulator is started from `sh -c 'cd <dir> && exec ...'`
    Unsupported,
}

/// How an emulator is told which program to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecFlag {
    /// `-- <program>`
    DoubleDash,
    /// `-e <program>`
    DashE,
}

impl ExecFlag {
    fn as_str(&self) -> &'static str {
        match self {
            ExecFlag::DoubleDash => "--",
            ExecFlag::DashE => "-e",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Emulator {
    pub name: &'static str,
    pub workdir: WorkdirFlag,
    pub exec: ExecFlag,
}

/// Terminal emulators tried on Unix-like desktops, highest priority first
pub const EMULATORS: &[Emulator] = &[
    Emulator {
        name: "gnome-terminal",
        workdir: WorkdirFlag::Joined("--working-directory"),
        exec: ExecFlag::DoubleDash,
    },
    Emulator {
        name: "konsole",
        workdir: WorkdirFlag::Separate("--workdir"),
        exec: ExecFlag::DashE,
    },
    Emulator {
        name: "xfce4-terminal",
        workdir: WorkdirFlag::Joined("--working-directory"),
        exec: ExecFlag::DoubleDash,
    },
    Emulator {
        name: "xterm",
        workdir: WorkdirFlag::Unsupported,
        exec: ExecFlag::DashE,
    },
    Emulator {
        name: "alacritty",
        workdir: WorkdirFlag::Joined("--working-directory"),
        exec: ExecFlag::DashE,
    },
    Emulator {
        name: "kitty",
        workdir: WorkdirFlag::Joined("--working-directory"),
        exec: ExecFlag::DashE,
    },
];

/// Names of [`EMULATORS`], in priority order
pub fn emulator_names() -> impl Iterator<Item = &'static str> {
    EMULATORS.iter().map(|emulator| emulator.name)
}

fn marker_env() -> Vec<(String, String)> {
    vec![(MARKER_ENV.0.to_string(), MARKER_ENV.1.to_string())]
}

fn sh_quote(s: &str) -> Cow<'_, str> {
    shell_escape::unix::escape(Cow::Borrowed(s))
}

impl Emulator {
    pub fn plan(&self, dir: &Path, binary: &Path) -> LaunchPlan {
        let dir_text = dir.to_string_lossy();
        let binary_text = binary.to_string_lossy();

        let (program, args) = match self.workdir {
            WorkdirFlag::Joined(flag) => (
                self.name.to_string(),
                vec![
                    format!("{flag}={dir_text}"),
                    self.exec.as_str().to_string(),
                    binary_text.into_owned(),
                ],
            ),
            WorkdirFlag::Separate(flag) => (
                self.name.to_string(),
                vec![
                    flag.to_string(),
                    dir_text.into_owned(),
                    self.exec.as_str().to_string(),
                    binary_text.into_owned(),
                ],
            ),
            WorkdirFlag::Unsupported => (
                "sh".to_string(),
                vec![
                    "-c".to_string(),
                    format!(
                        "cd {} && exec {} {} {}",
                        sh_quote(&dir_text),
                        self.name,
                        self.exec.as_str(),
                        sh_quote(&binary_text)
                    ),
                ],
            ),
        };

        LaunchPlan {
            program,
            args,
            cwd: Some(dir.to_path_buf()),
            env: marker_env(),
            attach: false,
            raw_args: false,
        }
    }
}

/// `cd <dir> && <binary>`, quoted for the platform's shell
pub fn composite_command(platform: Platform, dir: &Path, binary: &Path) -> String {
    let dir_text = dir.to_string_lossy();
    let binary_text = binary.to_string_lossy();
    match platform {
        Platform::Windows => format!(
            "cd /d {} && {}",
            shell_escape::windows::escape(dir_text),
            shell_escape::windows::escape(binary_text)
        ),
        Platform::MacOs | Platform::Unix => {
            format!("cd {} && {}", sh_quote(&dir_text), sh_quote(&binary_text))
        }
    }
}

fn applescript_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[derive(Debug, Clone, Copy)]
pub struct TerminalLauncher {
    platform: Platform,
}

impl TerminalLauncher {
    pub fn new(platform: Platform) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn plan_integrated(&self, dir: &Path, binary: &Path) -> LaunchPlan {
        LaunchPlan {
            program: binary.to_string_lossy().into_owned(),
            args: Vec::new(),
            cwd: Some(dir.to_path_buf()),
            env: marker_env(),
            attach: true,
            raw_args: false,
        }
    }

    /// Build the external launch plan, probing emulators on Unix.
    ///
    /// Fails with [`GitFlowError::NoTerminalAvailable`] when no emulator is installed.
    pub fn plan_external(
        &self,
        dir: &Path,
        binary: &Path,
        probe: &dyn ExecutableProbe,
    ) -> Result<LaunchPlan> {
        let composite = composite_command(self.platform, dir, binary);
        match self.platform {
            Platform::Windows => Ok(LaunchPlan {
                program: "cmd".to_string(),
                args: vec![
                    "/C".to_string(),
                    "start".to_string(),
                    "cmd".to_string(),
                    "/k".to_string(),
                    format!("\"{composite}\""),
                ],
                cwd: Some(dir.to_path_buf()),
                env: marker_env(),
                attach: false,
                raw_args: true,
            }),
            Platform::MacOs => Ok(LaunchPlan {
                program: "osascript".to_string(),
                args: vec![
                    "-e".to_string(),
                    format!(
                        "tell application \"Terminal\" to do script \"{}\"",
                        applescript_string(&composite)
                    ),
                    "-e".to_string(),
                    "tell application \"Terminal\" to activate".to_string(),
                ],
                cwd: Some(dir.to_path_buf()),
                env: marker_env(),
                attach: false,
                raw_args: false,
            }),
            Platform::Unix => {
                let emulator = EMULATORS
                    .iter()
                    .find(|emulator| probe.search(emulator.name).is_some())
                    .ok_or(GitFlowError::NoTerminalAvailable)?;
                log::debug!("Using terminal emulator {}", emulator.name);
                Ok(emulator.plan(dir, binary))
            }
        }
    }

    /// Open an external terminal window and return without waiting for it
    pub fn launch_external(
        &self,
        runner: &dyn ProcessRunner,
        probe: &dyn ExecutableProbe,
        dir: &Path,
        binary: &Path,
    ) -> Result<LaunchPlan> {
        let plan = self.plan_external(dir, binary, probe)?;
        let handle = runner.spawn(&plan)?;
        log::info!("Opened external terminal {} (pid {})", plan.program, handle.id());
        Ok(plan)
    }

    pub fn launch_integrated(
        &self,
        runner: &dyn ProcessRunner,
        dir: &Path,
        binary: &Path,
    ) -> Result<Box<dyn ProcessHandle>> {
        runner.spawn(&self.plan_integrated(dir, binary))
    }
}
