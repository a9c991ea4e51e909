//! Configuration schema for `wpready.yml`.
//!
//! Every field is optional. A missing file means the standard
//! `wp-content` layout, no active plugins and the default probe timeout.
//!
//! ```yaml
//! plugins_dir: wp-content/plugins
//! themes_dir: wp-content/themes
//! active_plugins:
//!   - gutenberg/gutenberg.php
//! active_theme: twentytwentyfour
//! probe_timeout_secs: 5
//! extra_paths:
//!   - ~/tools/bin
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::install::Installation;
use crate::shell::DEFAULT_PROBE_TIMEOUT;

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadinessConfig {
    /// Plugin directory, relative to the installation root unless absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugins_dir: Option<PathBuf>,

    /// Theme directory, relative to the installation root unless absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes_dir: Option<PathBuf>,

    /// Enabled plugins as `folder/file.php`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub active_plugins: Vec<String>,

    /// Folder name of the selected theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_theme: Option<String>,

    /// Seconds allowed for each probe subprocess.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub probe_timeout_secs: Option<u64>,

    /// Extra directories to search for tools.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extra_paths: Vec<PathBuf>,
}

impl ReadinessConfig {
    /// Per-probe subprocess timeout.
    pub fn probe_timeout(&self) -> Duration {
        match self.probe_timeout_secs {
            Some(secs) if secs > 0 => Duration::from_secs(secs),
            _ => DEFAULT_PROBE_TIMEOUT,
        }
    }

    /// The installation layout rooted at `root`.
    pub fn installation(&self, root: &Path) -> Installation {
        let mut installation = Installation::new(root)
            .with_active_plugins(self.active_plugins.iter().cloned())
            .with_active_theme(self.active_theme.clone());
        if let Some(dir) = &self.plugins_dir {
            installation.plugins_dir = resolve_against(root, dir);
        }
        if let Some(dir) = &self.themes_dir {
            installation.themes_dir = resolve_against(root, dir);
        }
        installation
    }

    /// Extra search directories with `~` expanded and relative entries
    /// resolved against `root`.
    pub fn resolved_extra_paths(&self, root: &Path) -> Vec<PathBuf> {
        self.extra_paths
            .iter()
            .map(|p| resolve_against(root, p))
            .collect()
    }
}

fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if let Ok(rest) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
