use crate::core::dirs::get_config_directory;
use crate::core::error::{GitFlowError, Result};
use crate::core::terminal::LaunchMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const SETTINGS_FILE: &str = "settings.json";
pub const DEFAULT_PRIMARY_COLOR: &str = "#00D9A5";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ThemeSettings {
    /// Display-only accent color, `#RRGGBB`
    pub primary: String,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }
}

impl ThemeSettings {
    /// `primary` as RGB, falling back to the default color when it does not parse
    pub fn primary_rgb(&self) -> (u8, u8, u8) {
        parse_hex_color(&self.primary)
            .or_else(|| parse_hex_color(DEFAULT_PRIMARY_COLOR))
            .unwrap_or((0, 217, 165))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct TerminalSettings {
    pub integrated: bool,
}

impl Default for TerminalSettings {
    fn default() -> Self {
        Self { integrated: true }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub binary_path: Option<PathBuf>,
    pub theme: ThemeSettings,
    pub terminal: TerminalSettings,
}

impl Settings {
    /// Load from the default location, `<config dir>/gitflow-bridge/settings.json`
    pub fn load_default() -> Result<Self> {
        let config_dir = get_config_directory()?;
        Self::load_from(&config_dir.join(SETTINGS_FILE))
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(path).map_err(|e| GitFlowError::config_read(path, e))?;
        let settings: Settings =
            serde_json::from_str(&content).map_err(|e| GitFlowError::config_parse(path, e))?;
        log::debug!("Loaded settings from {}: {settings:?}", path.display());
        Ok(settings)
    }

    pub fn launch_mode(&self) -> LaunchMode {
        LaunchMode::from_integrated_flag(self.terminal.integrated)
    }

    /// Configured binary path; an empty string counts as unset
    pub fn configured_binary(&self) -> Option<&Path> {
        self.binary_path
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }
}

fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
