//! Configuration file discovery and loading.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::schema::ReadinessConfig;
use crate::error::{ReadinessError, Result};

/// Config file names looked for under the installation root, in order.
pub const CONFIG_CANDIDATES: &[&str] = &["wpready.yml", ".wpready/config.yml"];

/// Find the config file for an installation root.
pub fn discover_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `Io` if the file can't be read and `ConfigParseError` if the
/// YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ReadinessConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content, path)
}

/// Parse config text; `path` is only used for error messages.
pub fn parse_config(content: &str, path: &Path) -> Result<ReadinessConfig> {
    if content.trim().is_empty() {
        return Ok(ReadinessConfig::default());
    }
    serde_yaml::from_str(content).map_err(|e| ReadinessError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load the configuration for `root`.
///
/// An explicit path must exist. Without one, the discovered file is used
/// when present and defaults otherwise.
pub fn load_config(root: &Path, explicit: Option<&Path>) -> Result<ReadinessConfig> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match discover_config(root) {
            Some(path) => path,
            None => {
                tracing::debug!("No config file under {}, using defaults", root.display());
                return Ok(ReadinessConfig::default());
            }
        },
    };
    tracing::debug!("Loading config from {}", path.display());
    load_config_file(&path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_config_is_default() {
        let temp = TempDir::new().unwrap();
        assert_eq!(load_config(temp.path(), None).unwrap(), ReadinessConfig::default());
    }

    #[test]
    fn root_file_wins_over_dot_directory() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("wpready.yml"), "active_theme: root").unwrap();
        fs::create_dir_all(temp.path().join(".wpready")).unwrap();
        fs::write(temp.path().join(".wpready/config.yml"), "active_theme: nested").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.active_theme.as_deref(), Some("root"));
    }

    #[test]
    fn dot_directory_is_discovered() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(".wpready")).unwrap();
        fs::write(temp.path().join(".wpready/config.yml"), "probe_timeout_secs: 7").unwrap();

        let config = load_config(temp.path(), None).unwrap();
        assert_eq!(config.probe_timeout_secs, Some(7));
    }

    #[test]
    fn explicit_path_must_exist() {
        let temp = TempDir::new().unwrap();
        let err = load_config(temp.path(), Some(&temp.path().join("missing.yml"))).unwrap_err();
        assert!(matches!(err, ReadinessError::Io(_)));
    }

    #[test]
    fn invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wpready.yml");
        fs::write(&path, "active_plugins: {not: [a list").unwrap();

        let err = load_config(temp.path(), None).unwrap_err();
        match err {
            ReadinessError::ConfigParseError { path: p, .. } => assert_eq!(p, path),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn empty_file_is_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("wpready.yml"), "# nothing yet\n").unwrap();
        assert_eq!(load_config(temp.path(), None).unwrap(), ReadinessConfig::default());
    }
}
