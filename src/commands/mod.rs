pub mod open;
pub mod resolve;
pub mod run;
pub mod snapshot;
pub mod statusline;
pub mod watch;

pub use open::*;
pub use resolve::*;
pub use run::*;
pub use snapshot::*;
pub use statusline::*;
pub use watch::*;

use crate::core::{
    config::Settings, error::Result, process::SystemRunner, resolver::SystemProbe,
    session::Session,
};
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

/// Global options shared by every command
#[derive(Debug, Clone, Default)]
pub struct HostOptions {
    /// Settings file; the per-user default when unset
    pub config: Option<PathBuf>,
    /// Workspace folder; the current directory when unset
    pub workspace: Option<PathBuf>,
}

impl HostOptions {
    pub fn settings(&self) -> Result<Settings> {
        match &self.config {
            Some(path) => Settings::load_from(path),
            None => Settings::load_default(),
        }
    }

    /// The workspace folder, or None when it is not an existing directory
    pub fn workspace(&self) -> Result<Option<PathBuf>> {
        let dir = match &self.workspace {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        if dir.is_dir() {
            Ok(Some(dir))
        } else {
            log::debug!("{} is not a directory, no workspace", dir.display());
            Ok(None)
        }
    }

    pub fn session(&self, settings: Settings) -> Result<Session> {
        Ok(Session::new(
            settings,
            self.workspace()?,
            Arc::new(SystemRunner),
            Arc::new(SystemProbe),
        ))
    }
}
