use clap::{Args, Parser, Subcommand};
use gitflow_bridge::commands::*;
use gitflow_bridge::core::{
    error::{GitFlowError, Result},
    git::GitAction,
    print_error, print_error_with_remediation,
    terminal::LaunchMode,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "gitflow-bridge")]
#[command(about = "Repository snapshots and launcher for GitFlow TUI")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Settings file (defaults to the per-user settings.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Workspace folder (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    workspace: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
#[group(multiple = false)]
struct ModeArgs {
    /// Run GitFlow TUI in this terminal
    #[arg(long)]
    integrated: bool,
    /// Open GitFlow TUI in a new terminal window
    #[arg(long)]
    external: bool,
}

impl ModeArgs {
    fn mode(&self) -> Option<LaunchMode> {
        if self.integrated {
            Some(LaunchMode::Integrated)
        } else if self.external {
            Some(LaunchMode::External)
        } else {
            None
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Gather and print one repository snapshot
    Snapshot {
        /// Print the snapshot as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the one-line branch and change summary
    Statusline {
        /// Also print the hover text
        #[arg(long)]
        tooltip: bool,
    },
    /// Keep refreshing the snapshot on a timer and on stdin triggers
    Watch {
        /// Seconds between timer refreshes
        #[arg(long, default_value_t = 10, value_name = "SECS")]
        interval: u64,
    },
    /// Show where the gitflow-tui binary is found
    Resolve,
    /// Open GitFlow TUI for the workspace
    Open {
        #[command(flatten)]
        mode: ModeArgs,
    },
    /// git status
    Status,
    /// git log --oneline -20
    Log,
    /// git branch -a
    Branches,
    /// git commit -m <MESSAGE>
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
    },
    /// git push
    Push,
    /// git pull
    Pull,
    /// git stash
    Stash,
    /// git checkout <BRANCH>
    Checkout {
        /// Branch to switch to
        branch: String,
    },
    /// Run any git command in the workspace
    Git {
        /// Arguments passed to git
        #[arg(trailing_var_arg = true, allow_hyphen_values = true, required = true)]
        args: Vec<String>,
    },
}

fn report(e: &GitFlowError) {
    match e {
        GitFlowError::BinaryNotFound | GitFlowError::NoTerminalAvailable => {
            print_error_with_remediation(e)
        }
        _ => print_error(&e.to_string()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on --debug flag
    if cli.debug {
        env::set_var("RUST_LOG", "debug");
    } else {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let host = HostOptions {
        config: cli.config,
        workspace: cli.workspace,
    };

    let result = match cli.command {
        Commands::Snapshot { json } => execute_snapshot(&host, json),
        Commands::Statusline { tooltip } => execute_statusline(&host, tooltip),
        Commands::Watch { interval } => execute_watch(&host, Duration::from_secs(interval.max(1))),
        Commands::Resolve => execute_resolve(&host),
        Commands::Open { mode } => execute_open(&host, mode.mode()),
        Commands::Status => execute_git_action(&host, GitAction::Status),
        Commands::Log => execute_git_action(&host, GitAction::Log),
        Commands::Branches => execute_git_action(&host, GitAction::Branches),
        Commands::Commit { message } => execute_git_action(&host, GitAction::Commit { message }),
        Commands::Push => execute_git_action(&host, GitAction::Push),
        Commands::Pull => execute_git_action(&host, GitAction::Pull),
        Commands::Stash => execute_git_action(&host, GitAction::Stash),
        Commands::Checkout { branch } => {
            execute_git_action(&host, GitAction::Checkout { branch })
        }
        Commands::Git { args } => execute_git_action(&host, GitAction::Raw(args)),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }

    Ok(())
}
