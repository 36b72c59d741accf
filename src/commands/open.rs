use crate::commands::HostOptions;
use crate::core::{
    error::Result,
    print_info, print_success,
    session::{Interaction, OpenOutcome},
    terminal::LaunchMode,
};
use colored::*;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Prompts on the controlling terminal
pub struct StdinInteraction;

impl Interaction for StdinInteraction {
    fn confirm_init(&mut self, workspace: &Path) -> bool {
        let prompt = format!(
            "{} is not a git repository. Initialize one? [y/N]:",
            workspace.display()
        );
        print!("\n{} ", prompt.blue());
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut input = String::new();
        match io::stdin().lock().read_line(&mut input) {
            Ok(_) => is_yes(&input),
            Err(e) => {
                log::debug!("Could not read answer: {e}");
                false
            }
        }
    }

    fn notify(&mut self, message: &str) {
        print_success(message);
    }
}

fn is_yes(input: &str) -> bool {
    matches!(input.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Open gitflow-tui; an integrated session is waited on until it exits
pub fn execute_open(host: &HostOptions, mode: Option<LaunchMode>) -> Result<()> {
    let mut settings = host.settings()?;
    if let Some(mode) = mode {
        settings.terminal.integrated = mode == LaunchMode::Integrated;
    }
    let mut session = host.session(settings)?;

    match session.open(&mut StdinInteraction)? {
        OpenOutcome::Integrated { pid } => {
            log::debug!("Waiting for gitflow-tui (pid {pid})");
            let code = session.wait_integrated()?;
            match code {
                Some(0) | None => {}
                Some(code) => log::info!("gitflow-tui exited with status {code}"),
            }
        }
        OpenOutcome::External { program } => {
            print_success(&format!("Opened GitFlow TUI in {program}"));
        }
        OpenOutcome::Declined => {
            print_info("Repository not initialized, GitFlow TUI not opened");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("y\n"));
        assert!(is_yes(" YES "));
        assert!(!is_yes("\n"));
        assert!(!is_yes("no"));
    }
}
