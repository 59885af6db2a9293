//! Settings loading and data locations

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default data directory (~/.pulsequest)
pub fn data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pulsequest")
}

/// Optional user settings, read from ~/.pulsequest/config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Overrides the directory holding the state database
    #[serde(default)]
    pub data_dir: Option<PathBuf>,

    /// Event the CLI shows when none is named
    #[serde(default)]
    pub default_event: Option<String>,
}

impl Settings {
    pub fn config_path() -> PathBuf {
        data_dir().join("config.toml")
    }

    /// Load settings, falling back to defaults when the file is absent
    /// or unreadable
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }
        Self::from_file(&path).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable settings: {e:#}");
            Self::default()
        })
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings: Settings = toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        Ok(settings)
    }

    /// Directory for the state database: explicit override first, then
    /// the settings file, then the default
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(data_dir)
    }
}
