//! WordPress installation layout.

use std::path::{Path, PathBuf};

use super::checkout::is_development_checkout;

/// Where a WordPress installation keeps its code, and what is enabled.
///
/// The host knows which plugins and theme are active; we only read the
/// filesystem. Both lists come from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installation {
    /// Installation root (the directory holding `wp-config.php` or the
    /// unbuilt `src/` tree).
    pub root: PathBuf,
    /// Plugin directory.
    pub plugins_dir: PathBuf,
    /// Theme root directory.
    pub themes_dir: PathBuf,
    /// Enabled plugins as `folder/file.php`.
    pub active_plugins: Vec<String>,
    /// Folder name of the selected theme.
    pub active_theme: Option<String>,
}

impl Installation {
    /// An installation at `root` with the standard `wp-content` layout.
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            plugins_dir: root.join("wp-content").join("plugins"),
            themes_dir: root.join("wp-content").join("themes"),
            active_plugins: Vec::new(),
            active_theme: None,
        }
    }

    /// Set the enabled plugins.
    pub fn with_active_plugins<I, S>(mut self, plugins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.active_plugins = plugins.into_iter().map(Into::into).collect();
        self
    }

    /// Set the selected theme.
    pub fn with_active_theme(mut self, theme: Option<String>) -> Self {
        self.active_theme = theme;
        self
    }

    /// Whether `folder/file.php` is enabled.
    pub fn is_plugin_active(&self, plugin_file: &str) -> bool {
        self.active_plugins.iter().any(|p| p == plugin_file)
    }

    /// Whether `folder` is the selected theme.
    pub fn is_theme_active(&self, folder: &str) -> bool {
        self.active_theme.as_deref() == Some(folder)
    }

    /// The directory recognized as a development checkout, if any.
    ///
    /// Accepts the root itself or its `src/` directory, so pointing at
    /// either a `wordpress-develop` clone or its `src` works.
    pub fn checkout_root(&self) -> Option<PathBuf> {
        [self.root.clone(), self.root.join("src")]
            .into_iter()
            .find(|dir| is_development_checkout(dir))
    }
}
