use crate::commands::HostOptions;
use crate::core::{
    error::{GitFlowError, Result},
    git::GitAction,
    print_success, print_warning,
};
use crossbeam_channel::RecvTimeoutError;
use std::time::Duration;

const PROGRESS_INTERVAL: Duration = Duration::from_secs(2);

/// Run a git action in the workspace and echo its output
pub fn execute_git_action(host: &HostOptions, action: GitAction) -> Result<()> {
    let session = host.session(host.settings()?)?;
    let command = format!("git {}", action.args().join(" "));
    let pending = session.spawn_command(&action)?;

    let output = loop {
        match pending.recv_timeout(PROGRESS_INTERVAL) {
            Ok(result) => break result?,
            Err(RecvTimeoutError::Timeout) => log::info!("Still running {command}..."),
            Err(RecvTimeoutError::Disconnected) => {
                return Err(GitFlowError::command_failed(
                    command,
                    "command thread exited without a result",
                ))
            }
        }
    };

    let stdout = output.stdout.trim_end();
    if !stdout.is_empty() {
        println!("{stdout}");
    }
    for line in output.stderr.lines().filter(|line| !line.trim().is_empty()) {
        print_warning(line);
    }
    if action.is_mutating() {
        print_success(&format!("{command} completed"));
    }
    Ok(())
}
