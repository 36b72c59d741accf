use crate::commands::HostOptions;
use crate::core::{
    error::Result,
    print_info,
    scheduler::{PublishedSnapshot, RefreshScheduler, RefreshTrigger},
    statusline::StatusLine,
};
use colored::*;
use crossbeam_channel::{select, unbounded, Sender};
use std::io::{self, BufRead};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WatchInput {
    Refresh(RefreshTrigger),
    Quit,
    Unknown,
}

fn parse_input(line: &str) -> WatchInput {
    match line.trim() {
        "r" | "refresh" => WatchInput::Refresh(RefreshTrigger::Manual),
        "save" => WatchInput::Refresh(RefreshTrigger::DocumentSaved),
        "vcs" => WatchInput::Refresh(RefreshTrigger::VcsStateChanged),
        "q" | "quit" => WatchInput::Quit,
        _ => WatchInput::Unknown,
    }
}

fn read_stdin(tx: Sender<WatchInput>) {
    for line in io::stdin().lock().lines() {
        let input = match line {
            Ok(line) => parse_input(&line),
            Err(_) => break,
        };
        if tx.send(input).is_err() || input == WatchInput::Quit {
            return;
        }
    }
    let _ = tx.send(WatchInput::Quit);
}

fn render(published: &PublishedSnapshot) -> String {
    let summary = match StatusLine::from_snapshot(&published.snapshot) {
        Some(line) => line.to_string(),
        None if published.snapshot.is_error() => "not a git repository".red().to_string(),
        None => "no current branch".bright_black().to_string(),
    };
    format!(
        "{} {} {}",
        format!("#{}", published.generation).bright_black(),
        format!("[{}]", published.trigger).blue(),
        summary
    )
}

/// Refresh on a timer and on stdin triggers until `q` or end of input
pub fn execute_watch(host: &HostOptions, interval: Duration) -> Result<()> {
    let session = host.session(host.settings()?)?;
    let service = session.snapshot_service()?;

    let (published_tx, published_rx) = unbounded();
    let mut scheduler = RefreshScheduler::start(service, published_tx, interval)?;

    let (input_tx, input_rx) = unbounded();
    std::thread::spawn(move || read_stdin(input_tx));

    print_info("Watching repository. r = refresh, save / vcs = simulate events, q = quit");
    scheduler.request(RefreshTrigger::Manual);

    loop {
        select! {
            recv(published_rx) -> published => match published {
                Ok(published) => println!("{}", render(&published)),
                Err(_) => break,
            },
            recv(input_rx) -> input => match input {
                Ok(WatchInput::Refresh(trigger)) => scheduler.request(trigger),
                Ok(WatchInput::Unknown) => log::info!("Unknown input; use r, save, vcs or q"),
                Ok(WatchInput::Quit) | Err(_) => break,
            },
        }
    }

    scheduler.shutdown();
    // Print what finished while shutting down.
    for published in published_rx.try_iter() {
        println!("{}", render(&published));
    }
    Ok(())
}
