use crate::commands::HostOptions;
use crate::core::{
    colors::format_status_entry,
    error::Result,
    print_section_header,
    state::{Snapshot, StatusItem},
};
use colored::*;

pub fn execute_snapshot(host: &HostOptions, json: bool) -> Result<()> {
    let session = host.session(host.settings()?)?;
    let snapshot = session.snapshot_service()?.snapshot();

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        print_snapshot(&snapshot);
    }
    Ok(())
}

pub fn print_snapshot(snapshot: &Snapshot) {
    let branch = snapshot.current_branch.as_deref().unwrap_or("-none-");
    let sync = snapshot
        .sync
        .filter(|sync| sync.is_displayable())
        .map(|sync| format!(" {}", format!("↑{}↓{}", sync.ahead, sync.behind).bright_black()))
        .unwrap_or_default();
    println!("\n{} {}{}", "Branch:".bright_black(), branch.white(), sync);

    print_section_header("Status");
    for line in status_lines(&snapshot.status) {
        println!("{line}");
    }

    print_section_header("Recent commits");
    print_list(snapshot.commits.iter().map(|commit| {
        format!("  {} {}", commit.short_hash.yellow(), commit.subject)
    }));

    print_section_header("Branches");
    print_list(snapshot.branches.iter().map(|branch| {
        if branch.is_current {
            format!("  {} {}", "*".green(), branch.name.green())
        } else {
            format!("    {}", branch.name)
        }
    }));

    print_section_header("Remotes");
    print_list(
        snapshot
            .remotes
            .iter()
            .map(|remote| format!("  {}  {}", remote.name, remote.url.bright_black())),
    );

    print_section_header("Stashes");
    print_list(snapshot.stashes.iter().map(|stash| format!("  {}", stash.0)));
    println!();
}

fn status_lines(items: &[StatusItem]) -> Vec<String> {
    items
        .iter()
        .map(|item| match item {
            StatusItem::File(entry) => format!("  {}", format_status_entry(&entry.code, &entry.path)),
            StatusItem::More { count } => format!("  {}", format!("... and {count} more").bright_black()),
            StatusItem::Clean => format!("  {}", "Working tree clean".green()),
            StatusItem::Error => format!("  {}", "Not a git repository".red()),
        })
        .collect()
}

fn print_list(lines: impl Iterator<Item = String>) {
    let mut empty = true;
    for line in lines {
        empty = false;
        println!("{line}");
    }
    if empty {
        println!("  {}", "(none)".bright_black());
    }
}
