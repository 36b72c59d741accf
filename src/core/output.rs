//! Unified output formatting utilities for consistent CLI presentation.
//!
//! # Design Principles
//! - **Consistent color scheme**: Red for errors, yellow for warnings, blue for remediations
//! - **Standardized spacing**: Newline before and after all command outputs

use crate::core::error::{GitFlowError, Remediation};
use crate::core::terminal::emulator_names;
use colored::*;

/// Formats and prints an error message with consistent styling
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// ```
pub fn print_error(message: &str) {
    println!("\n{} {}\n", "✕ Error:".red(), message.white());
}

/// Prints an error followed by the remediations it offers, if any
///
/// # Format
/// ```text
///
/// ✕ Error: <message>
///
/// Configure:
///   Set gitflow.binaryPath in settings.json
/// Install:
///   https://github.com/gitflow/tui#installation
///
/// ```
pub fn print_error_with_remediation(error: &GitFlowError) {
    print_error(&error.to_string());

    let remediations = error.remediations();
    if remediations.is_empty() {
        return;
    }
    for remediation in &remediations {
        println!("{}", format!("{}:", remediation.label()).blue());
        println!("  {}", remediation_hint(remediation).bright_black());
    }
    println!();
}

fn remediation_hint(remediation: &Remediation) -> String {
    match remediation {
        Remediation::OpenSetting(key) => format!("Set {key} in settings.json"),
        Remediation::OpenUrl(url) => url.to_string(),
        Remediation::InstallTerminal => emulator_names().collect::<Vec<_>>().join(", "),
    }
}

/// Formats and prints a warning, used for git's stderr on successful commands
///
/// # Format
/// ```text
/// ! <message>
/// ```
pub fn print_warning(message: &str) {
    println!("{} {}", "!".yellow(), message.yellow());
}

/// Formats and prints a success message with consistent styling
///
/// # Format
/// ```text
///
/// ✓ <message>
/// ```
pub fn print_success(message: &str) {
    println!("\n{} {}", "✓".green(), message.white());
}

/// Formats and prints an informational message with consistent styling
pub fn print_info(message: &str) {
    println!("\n{}\n", message.white());
}

/// Formats and prints a section header with consistent styling
///
/// # Format
/// ```text
///
/// <header>:
///
/// ```
pub fn print_section_header(header: &str) {
    println!("\n{}:\n", header.white());
}
