//! Git-tracked plugin and theme enumeration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;

use super::headers::{file_header, header_value, read_header_block};
use super::layout::Installation;

/// Plugin or theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionKind {
    Plugin,
    Theme,
}

impl ExtensionKind {
    pub fn label(&self) -> &'static str {
        match self {
            ExtensionKind::Plugin => "plugin",
            ExtensionKind::Theme => "theme",
        }
    }
}

/// A plugin or theme folder under version control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitRepoEntry {
    #[serde(rename = "type")]
    pub kind: ExtensionKind,
    /// Name from the plugin or theme header.
    pub name: String,
    /// Folder name under the plugins or themes directory.
    pub folder: String,
    /// Main plugin file name; themes have none.
    pub file: Option<String>,
    pub active: bool,
    pub path: PathBuf,
}

/// Name and version of an installed plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
    pub name: String,
    pub version: Option<String>,
}

/// List every git-tracked plugin, then every git-tracked theme.
///
/// Each group is sorted by folder name. Folders without a `.git`
/// directory, plugins without a recognizable main file and themes
/// without `style.css` are left out.
pub fn enumerate_git_tracked_extensions(installation: &Installation) -> Vec<GitRepoEntry> {
    let mut entries = Vec::new();

    for dir in git_tracked_dirs(&installation.plugins_dir) {
        let folder = folder_name(&dir);
        let Some((file, name)) = find_plugin_file(&dir) else {
            tracing::debug!("No plugin header in {}", dir.display());
            continue;
        };
        let active = installation.is_plugin_active(&format!("{}/{}", folder, file));
        entries.push(GitRepoEntry {
            kind: ExtensionKind::Plugin,
            name,
            folder,
            file: Some(file),
            active,
            path: dir,
        });
    }

    for dir in git_tracked_dirs(&installation.themes_dir) {
        let stylesheet = dir.join("style.css");
        if !stylesheet.is_file() {
            continue;
        }
        let folder = folder_name(&dir);
        let name = file_header(&stylesheet, "Theme Name").unwrap_or_else(|| folder.clone());
        entries.push(GitRepoEntry {
            kind: ExtensionKind::Theme,
            name,
            active: installation.is_theme_active(&folder),
            folder,
            file: None,
            path: dir,
        });
    }

    entries
}

/// Immediate subdirectories of `parent` that contain a `.git` directory.
fn git_tracked_dirs(parent: &Path) -> Vec<PathBuf> {
    let Ok(read) = fs::read_dir(parent) else {
        return Vec::new();
    };
    let mut dirs: Vec<PathBuf> = read
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_dir() && p.join(".git").is_dir())
        .collect();
    dirs.sort();
    dirs
}

fn folder_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// The first `.php` file in `dir` (sorted by name) with a `Plugin Name`
/// header, as `(file name, plugin name)`.
pub fn find_plugin_file(dir: &Path) -> Option<(String, String)> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .ok()?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "php"))
        .collect();
    files.sort();

    files.into_iter().find_map(|path| {
        let name = file_header(&path, "Plugin Name")?;
        Some((folder_name(&path), name))
    })
}

/// Header info for `folder/file.php` under the plugins directory.
pub fn plugin_info(installation: &Installation, plugin_file: &str) -> Option<PluginInfo> {
    let block = read_header_block(&installation.plugins_dir.join(plugin_file))?;
    let name = header_value(&block, "Plugin Name")?;
    Some(PluginInfo {
        name,
        version: header_value(&block, "Version"),
    })
}

/// An installed plugin that is also enabled.
pub fn active_plugin(installation: &Installation, plugin_file: &str) -> Option<PluginInfo> {
    if !installation.is_plugin_active(plugin_file) {
        return None;
    }
    plugin_info(installation, plugin_file)
}
