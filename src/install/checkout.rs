//! Development checkout and Git repository detection.
//!
//! A `wordpress-develop` checkout ships an `index.php` in `src/` that only
//! tells the visitor to build the assets. That stub, together with either
//! the `_index.php` it renames to or a `.git` entry, marks an unbuilt
//! development tree.

use std::path::{Path, PathBuf};

use crate::shell::CommandRunner;

/// Entries of which at least one must exist at the checkout root.
pub const CHECKOUT_SENTINELS: &[&str] = &["_index.php", ".git"];

/// The file holding the build reminder.
pub const REMINDER_FILE: &str = "index.php";

/// Text found only in the development checkout's placeholder `index.php`.
pub const BUILD_REMINDER: &str = "exists only to remind developers to build the assets";

/// Whether `root` is an unbuilt WordPress development checkout.
///
/// Both conditions must hold: a sentinel entry exists, and `index.php`
/// carries the build reminder. Either one alone is not enough.
pub fn is_development_checkout(root: &Path) -> bool {
    let has_sentinel = CHECKOUT_SENTINELS
        .iter()
        .any(|name| root.join(name).exists());
    has_sentinel && has_build_reminder(root)
}

fn has_build_reminder(root: &Path) -> bool {
    match std::fs::read_to_string(root.join(REMINDER_FILE)) {
        Ok(text) => text.contains(BUILD_REMINDER),
        Err(e) => {
            tracing::debug!("No readable {} in {}: {}", REMINDER_FILE, root.display(), e);
            false
        }
    }
}

/// Walk up from `start` to the first directory holding `.git`.
///
/// `.git` may be a directory or, for worktrees and submodules, a file.
pub fn find_git_repository(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(".git").exists())
        .map(Path::to_path_buf)
}

/// The `origin` remote URL of the repository at `root`.
pub fn git_remote_origin(root: &Path, runner: &dyn CommandRunner) -> Option<String> {
    let root = root.to_string_lossy();
    let out = runner.run(
        Path::new("git"),
        &["-C", &root, "remote", "get-url", "origin"],
        None,
    )?;
    if !out.success {
        return None;
    }
    let url = out.stdout.trim();
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

/// Whether a remote URL points at the official development repository.
pub fn is_wordpress_develop_remote(url: &str) -> bool {
    url.to_lowercase().contains("wordpress/wordpress-develop")
}
