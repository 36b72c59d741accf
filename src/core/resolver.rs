//! Locating the gitflow-tui executable.
//!
//! [`BinaryResolver`] walks a fixed precedence chain and returns the first hit:
//!
//! 1. the configured `binaryPath`, if it exists on disk;
//! 2. each of [`CANDIDATE_NAMES`] through the OS executable search, if the result exists;
//! 3. the common installation locations of the platform.
//!
//! All filesystem access goes through [`ExecutableProbe`], so a given probe state always
//! produces the same answer. Results are not cached here; the session decides when to
//! resolve again.

use crate::core::platform::Platform;
use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

pub const BINARY_NAME: &str = "gitflow-tui";

/// Names tried through the executable search, in order
pub const CANDIDATE_NAMES: &[&str] = &[BINARY_NAME, "gitflow"];

/// Filesystem and executable-search lookups
pub trait ExecutableProbe: Send + Sync {
    fn exists(&self, path: &Path) -> bool;

    /// Resolve a program name through the OS search mechanism (`PATH`)
    fn search(&self, name: &str) -> Option<PathBuf>;
}

/// Probes the real filesystem, searching `PATH` with the `which` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProbe;

impl ExecutableProbe for SystemProbe {
    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn search(&self, name: &str) -> Option<PathBuf> {
        which::which(name).ok()
    }
}

/// Which rule of the precedence chain produced a location
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvedBy {
    Configured,
    SearchPath,
    CommonLocation,
}

impl fmt::Display for ResolvedBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ResolvedBy::Configured => "configured path",
            ResolvedBy::SearchPath => "PATH search",
            ResolvedBy::CommonLocation => "common install location",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BinaryLocation {
    pub path: PathBuf,
    pub resolved_by: ResolvedBy,
}

pub struct BinaryResolver<'a> {
    configured: Option<&'a Path>,
    probe: &'a dyn ExecutableProbe,
    platform: Platform,
    home: Option<PathBuf>,
    program_files: Option<PathBuf>,
}

impl<'a> BinaryResolver<'a> {
    pub fn new(
        configured: Option<&'a Path>,
        probe: &'a dyn ExecutableProbe,
        platform: Platform,
    ) -> Self {
        Self {
            configured,
            probe,
            platform,
            home: dirs::home_dir(),
            program_files: std::env::var_os("ProgramFiles").map(PathBuf::from),
        }
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn with_program_files(mut self, program_files: Option<PathBuf>) -> Self {
        self.program_files = program_files;
        self
    }

    pub fn resolve(&self) -> Option<BinaryLocation> {
        if let Some(configured) = self.configured {
            if self.probe.exists(configured) {
                log::debug!("Using configured binary {}", configured.display());
                return Some(BinaryLocation {
                    path: configured.to_path_buf(),
                    resolved_by: ResolvedBy::Configured,
                });
            }
            log::warn!(
                "Configured binary {} does not exist, searching elsewhere",
                configured.display()
            );
        }

        for name in CANDIDATE_NAMES {
            if let Some(found) = self.probe.search(name) {
                if self.probe.exists(&found) {
                    log::debug!("Found {name} on PATH at {}", found.display());
                    return Some(BinaryLocation {
                        path: found,
                        resolved_by: ResolvedBy::SearchPath,
                    });
                }
                log::debug!("PATH entry {} for {name} does not exist", found.display());
            }
        }

        let location = self
            .common_locations()
            .into_iter()
            .find(|candidate| self.probe.exists(candidate))
            .map(|path| BinaryLocation {
                path,
                resolved_by: ResolvedBy::CommonLocation,
            });
        if location.is_none() {
            log::debug!("{BINARY_NAME} not found in any common location");
        }
        location
    }

    /// Installation directories checked last, in order
    pub fn common_locations(&self) -> Vec<PathBuf> {
        match self.platform {
            Platform::Windows => self
                .program_files
                .iter()
                .map(|dir| dir.join(BINARY_NAME).join(format!("{BINARY_NAME}.exe")))
                .collect(),
            Platform::MacOs | Platform::Unix => {
                let mut locations = Vec::new();
                if let Some(home) = &self.home {
                    locations.push(home.join(".local").join("bin").join(BINARY_NAME));
                    locations.push(home.join("bin").join(BINARY_NAME));
                }
                locations.push(Path::new("/usr/local/bin").join(BINARY_NAME));
                locations.push(Path::new("/usr/bin").join(BINARY_NAME));
                locations
            }
        }
    }
}
