//! Saved user settings.
//!
//! A small YAML key/value store holding the verified WordPress.org
//! username. Overrides and the platform choice are never saved here.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ReadinessError, Result};

/// Persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Verified WordPress.org username.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wporg_username: Option<String>,

    /// When the username was verified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verified_at: Option<DateTime<Utc>>,
}

impl Settings {
    /// Default settings file: `<config dir>/wpready/settings.yml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("wpready").join("settings.yml"))
    }

    /// Load settings, or defaults when the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|e| ReadinessError::ConfigParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save settings to disk using atomic write.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_yaml::to_string(self).map_err(|e| {
            ReadinessError::Other(anyhow::anyhow!("Failed to serialize settings: {}", e))
        })?;

        // Atomic write: write to temp file, then rename
        let temp_path = path.with_extension("yml.tmp");
        fs::write(&temp_path, &content)?;
        fs::rename(&temp_path, path)?;

        Ok(())
    }

    /// Record a verified username.
    pub fn set_username(&mut self, username: &str, verified_at: DateTime<Utc>) {
        self.wporg_username = Some(username.to_string());
        self.verified_at = Some(verified_at);
    }

    /// Drop the saved username.
    pub fn forget_username(&mut self) {
        self.wporg_username = None;
        self.verified_at = None;
    }

    pub fn username(&self) -> Option<&str> {
        self.wporg_username.as_deref().filter(|u| !u.is_empty())
    }
}
