//! Persisted plugin settings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub w: u32,
    pub h: u32,
}

/// Settings record shared with the host plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub plugin_window_size: WindowSize,
    /// Mapping table in config text form.
    pub mapping_config: String,
    pub show_mapped_values: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            plugin_window_size: WindowSize { w: 800, h: 600 },
            mapping_config: String::new(),
            show_mapped_values: true,
        }
    }
}

impl Settings {
    /// Parse stored settings. A record from an older version (any key
    /// missing or malformed) is replaced by the defaults as a whole.
    pub fn from_json(json: &str) -> Self {
        serde_json::from_str(json).unwrap_or_else(|e| {
            log::warn!("Resetting settings to defaults: {}", e);
            Self::default()
        })
    }

    /// Load settings from `path`, or the defaults if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("reading settings {}", path.display()))?;
        Ok(Self::from_json(&json))
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing settings {}", path.display()))
    }
}
