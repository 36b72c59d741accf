use crate::commands::HostOptions;
use crate::core::{colors::get_primary_colored, error::Result, statusline::StatusLine};
use colored::*;

/// Print the one-line summary; prints nothing when there is no current branch
pub fn execute_statusline(host: &HostOptions, tooltip: bool) -> Result<()> {
    let settings = host.settings()?;
    let rgb = settings.theme.primary_rgb();
    let session = host.session(settings)?;
    let snapshot = session.snapshot_service()?.snapshot();

    let Some(line) = StatusLine::from_snapshot(&snapshot) else {
        log::debug!("No current branch, status line hidden");
        return Ok(());
    };

    let counters = line.counters();
    let counters = if counters.is_empty() {
        String::new()
    } else if line.is_dirty() {
        format!(" {}", counters.yellow())
    } else {
        format!(" {}", counters.bright_black())
    };
    println!("{}{}", get_primary_colored(&line.branch, rgb), counters);
    if tooltip {
        println!("{}", line.tooltip().bright_black());
    }
    Ok(())
}
