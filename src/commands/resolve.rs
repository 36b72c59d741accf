use crate::commands::HostOptions;
use crate::core::{
    error::{GitFlowError, Result},
    print_success,
};
use colored::*;

/// Print where gitflow-tui resolves to and which rule found it
pub fn execute_resolve(host: &HostOptions) -> Result<()> {
    let mut session = host.session(host.settings()?)?;
    let location = session.binary().ok_or(GitFlowError::BinaryNotFound)?;

    print_success(&location.path.display().to_string());
    println!("  {}\n", format!("via {}", location.resolved_by).bright_black());
    Ok(())
}
