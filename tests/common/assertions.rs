//! Common assertion helpers for test output validation

#![allow(dead_code)]

use predicates::prelude::*;

pub fn no_workspace() -> impl Predicate<str> {
    predicates::str::contains("No workspace folder open")
}

/// The not-found error together with both remediations
pub fn binary_not_found() -> impl Predicate<str> {
    predicates::str::contains("GitFlow TUI binary not found")
        .and(predicates::str::contains("gitflow.binaryPath"))
        .and(predicates::str::contains(
            "https://github.com/gitflow/tui#installation",
        ))
}

pub fn no_terminal() -> impl Predicate<str> {
    predicates::str::contains("No supported terminal emulator was found")
        .and(predicates::str::contains("gnome-terminal"))
}

pub fn git_failed() -> impl Predicate<str> {
    predicates::str::contains("Git command failed:")
}

pub fn has_section(header: &str) -> impl Predicate<str> {
    predicates::str::contains(format!("{header}:"))
}
