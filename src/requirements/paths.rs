//! Candidate directories for tool executables.
//!
//! A probe runs with a `PATH` built from several groups, searched in order:
//! well-known install prefixes for the platform, per-user tool directories,
//! directories added by shell startup files, version-manager directories
//! and finally the inherited `PATH`. Order only sets priority; the first
//! directory holding the tool wins when resolving its real path.

use std::path::{Path, PathBuf};

use crate::environment::Platform;

/// Well-known install directories for a platform, highest priority first.
pub fn common_paths(platform: Platform) -> Vec<PathBuf> {
    let dirs: &[&str] = match platform {
        Platform::MacOS => &[
            "/opt/homebrew/bin",
            "/usr/local/bin",
            "/usr/bin",
            "/bin",
            "/opt/local/bin",
            "/usr/local/git/bin",
        ],
        Platform::Linux => &[
            "/usr/local/bin",
            "/usr/bin",
            "/bin",
            "/snap/bin",
            "/home/linuxbrew/.linuxbrew/bin",
        ],
        Platform::Windows => &[
            r"C:\Program Files\Git\cmd",
            r"C:\Program Files\Git\bin",
            r"C:\Program Files\nodejs",
            r"C:\Program Files (x86)\Git\cmd",
            r"C:\ProgramData\ComposerSetup\bin",
        ],
    };
    dirs.iter().map(PathBuf::from).collect()
}

/// Per-user tool directories under `home`.
pub fn home_paths(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(".local/bin"),
        home.join("bin"),
        home.join(".volta/bin"),
    ]
}

/// Composer's global `vendor/bin` directories under `home`.
pub fn composer_global_paths(home: &Path) -> Vec<PathBuf> {
    vec![
        home.join(".composer/vendor/bin"),
        home.join(".config/composer/vendor/bin"),
    ]
}

/// nvm-managed Node `bin` directories for the current user and other
/// users' home directories.
///
/// Returns an empty list when nothing matches.
pub fn nvm_style_paths(home: Option<&Path>) -> Vec<PathBuf> {
    let mut roots: Vec<PathBuf> = Vec::new();
    if let Some(dir) = std::env::var_os("NVM_DIR") {
        roots.push(PathBuf::from(dir));
    }
    if let Some(home) = home {
        roots.push(home.join(".nvm"));
    }

    let mut patterns: Vec<String> = roots
        .iter()
        .map(|root| {
            format!(
                "{}/versions/node/*/bin",
                glob::Pattern::escape(&root.to_string_lossy())
            )
        })
        .collect();
    if cfg!(unix) {
        patterns.push("/home/*/.nvm/versions/node/*/bin".to_string());
        patterns.push("/Users/*/.nvm/versions/node/*/bin".to_string());
        patterns.push("/root/.nvm/versions/node/*/bin".to_string());
    }

    let mut found = Vec::new();
    for pattern in &patterns {
        let Ok(entries) = glob::glob(pattern) else {
            continue;
        };
        for path in entries.filter_map(|e| e.ok()) {
            if path.is_dir() && !found.contains(&path) {
                found.push(path);
            }
        }
    }

    found.sort_by_key(|p| std::cmp::Reverse(node_version_key(p)));
    found
}

/// Sort key from `.../node/v20.11.0/bin`.
fn node_version_key(bin: &Path) -> (u32, u32, u32) {
    let version = bin
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().trim_start_matches('v').to_string())
        .unwrap_or_default();
    let mut parts = version.split('.').map(|s| s.parse::<u32>().unwrap_or(0));
    (
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
        parts.next().unwrap_or(0),
    )
}

/// Check whether a file has executable permission bits set.
#[cfg(unix)]
pub fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

/// On Windows, executability is determined by file extension, not permission bits.
#[cfg(not(unix))]
pub fn is_executable(_path: &Path) -> bool {
    true
}

#[cfg(windows)]
const EXECUTABLE_SUFFIXES: &[&str] = &[".exe", ".cmd", ".bat", ""];

#[cfg(not(windows))]
const EXECUTABLE_SUFFIXES: &[&str] = &[""];

/// Resolve a tool's binary path by iterating over directories.
///
/// Returns the first match that exists and is executable.
pub fn resolve_tool_path(tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    for dir in dirs {
        for suffix in EXECUTABLE_SUFFIXES {
            let candidate = dir.join(format!("{}{}", tool, suffix));
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }
    None
}

/// Resolve a tool and follow symlinks to the real file.
pub fn resolve_real_path(tool: &str, dirs: &[PathBuf]) -> Option<PathBuf> {
    let found = resolve_tool_path(tool, dirs)?;
    Some(std::fs::canonicalize(&found).unwrap_or(found))
}

/// Parse the system PATH environment variable into a list of directories.
pub fn parse_system_path() -> Vec<PathBuf> {
    std::env::var_os("PATH")
        .map(|path| std::env::split_paths(&path).collect())
        .unwrap_or_default()
}

/// Concatenate path groups in order, dropping duplicates and empty entries.
///
/// Entries the host cannot put in a `PATH` value (a `C:\...` path on Unix
/// holds the `:` separator) are dropped too, so one foreign entry never
/// costs the whole search path.
pub fn merge_search_path<I>(groups: I) -> Vec<PathBuf>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = PathBuf>,
{
    let mut merged: Vec<PathBuf> = Vec::new();
    for group in groups {
        for path in group {
            if path.as_os_str().is_empty() || merged.contains(&path) {
                continue;
            }
            if std::env::join_paths(std::iter::once(&path)).is_err() {
                tracing::debug!("Skipping search directory {}", path.display());
                continue;
            }
            merged.push(path);
        }
    }
    merged
}
