//! Status and theme coloring shared by every command's output.
//!
//! # Color Scheme
//! - **Modified**: Yellow
//! - **Added**: Green
//! - **Deleted**: Red
//! - **Renamed/Copied**: Blue
//! - **Untracked**: Cyan
//! - **Unmerged**: Red bold

use crate::core::git_status::GitStatus;
use colored::*;

pub fn get_status_color_style(status: GitStatus) -> Box<dyn Fn(&str) -> ColoredString> {
    match status {
        GitStatus::Modified => Box::new(|text: &str| text.yellow()),
        GitStatus::Untracked => Box::new(|text: &str| text.cyan()),
        GitStatus::Deleted => Box::new(|text: &str| text.red()),
        GitStatus::Added => Box::new(|text: &str| text.green()),
        GitStatus::Renamed | GitStatus::Copied => Box::new(|text: &str| text.blue()),
        GitStatus::TypeChanged => Box::new(|text: &str| text.magenta()),
        GitStatus::Unmerged => Box::new(|text: &str| text.red().bold()),
    }
}

/// Color `text` by the porcelain `code`; unknown codes stay plain
pub fn color_by_code(code: &str, text: &str) -> ColoredString {
    match GitStatus::from_porcelain(code) {
        Some(status) => get_status_color_style(status)(text),
        None => text.normal(),
    }
}

/// A status line entry: the raw two-column code followed by the path, both colored
pub fn format_status_entry(code: &str, path: &str) -> String {
    format!("{} {}", color_by_code(code, code), color_by_code(code, path))
}

/// Paint `text` in the configured theme color
pub fn get_primary_colored(text: &str, rgb: (u8, u8, u8)) -> ColoredString {
    let (r, g, b) = rgb;
    text.truecolor(r, g, b)
}
