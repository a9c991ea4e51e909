//! Request-scoped probe context.
//!
//! Everything a requirement check reads from the outside world comes
//! through a [`ProbeContext`]: the platform, the installation, the saved
//! username and the subprocess runner. Path sets that are costly to build
//! (shell startup files, nvm globbing) are computed once per context, on
//! first use.

use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use crate::environment::Platform;
use crate::install::Installation;
use crate::shell::{CommandRunner, ShellConfigScanner};

use super::paths::{
    common_paths, composer_global_paths, home_paths, merge_search_path, nvm_style_paths,
    parse_system_path,
};
use super::registry::SearchHint;

/// Inputs for one evaluation pass.
pub struct ProbeContext<'a> {
    pub platform: Platform,
    pub installation: &'a Installation,
    pub runner: &'a dyn CommandRunner,
    /// Saved WordPress.org username, if any.
    pub username: Option<String>,
    home: Option<PathBuf>,
    common: Vec<PathBuf>,
    inherited: Vec<PathBuf>,
    extra: Vec<PathBuf>,
    shell_paths: OnceCell<Vec<PathBuf>>,
    nvm_paths: OnceCell<Vec<PathBuf>>,
}

impl<'a> ProbeContext<'a> {
    /// Create a context reading the current user's home and `PATH`.
    pub fn new(
        platform: Platform,
        installation: &'a Installation,
        runner: &'a dyn CommandRunner,
    ) -> Self {
        Self {
            platform,
            installation,
            runner,
            username: None,
            home: dirs::home_dir(),
            common: common_paths(Platform::host()),
            inherited: parse_system_path(),
            extra: Vec::new(),
            shell_paths: OnceCell::new(),
            nvm_paths: OnceCell::new(),
        }
    }

    pub fn with_username(mut self, username: Option<String>) -> Self {
        self.username = username.filter(|u| !u.trim().is_empty());
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Replace the platform's well-known directories.
    pub fn with_common_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.common = paths;
        self
    }

    /// Replace the inherited `PATH`.
    pub fn with_inherited_path(mut self, paths: Vec<PathBuf>) -> Self {
        self.inherited = paths;
        self
    }

    /// Directories from configuration, searched before the inherited `PATH`.
    pub fn with_extra_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.extra = paths;
        self
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    /// Directories added by the user's shell startup files.
    pub fn shell_paths(&self) -> &[PathBuf] {
        self.shell_paths.get_or_init(|| match &self.home {
            Some(home) => ShellConfigScanner::new(home)
                .scan(self.runner)
                .into_iter()
                .collect(),
            None => Vec::new(),
        })
    }

    /// nvm-managed Node `bin` directories.
    pub fn nvm_paths(&self) -> &[PathBuf] {
        self.nvm_paths
            .get_or_init(|| nvm_style_paths(self.home.as_deref()))
    }

    /// The full ordered search path for a tool.
    pub fn search_dirs(&self, hint: SearchHint) -> Vec<PathBuf> {
        let home = self.home.as_deref().map(home_paths).unwrap_or_default();
        let tool_extra = match (hint, self.home.as_deref()) {
            (SearchHint::NodeVersionManager, _) => self.nvm_paths().to_vec(),
            (SearchHint::ComposerGlobal, Some(home)) => composer_global_paths(home),
            _ => Vec::new(),
        };

        merge_search_path([
            self.common.clone(),
            home,
            self.shell_paths().to_vec(),
            tool_extra,
            self.extra.clone(),
            self.inherited.clone(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn search_dirs_follow_priority_order() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().to_path_buf();
        fs::write(home.join(".zshrc"), "export PATH=/opt/shell/bin:$PATH\n").unwrap();

        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new();
        let ctx = ProbeContext::new(Platform::Linux, &inst, &runner)
            .with_home(Some(home.clone()))
            .with_common_paths(vec![PathBuf::from("/usr/bin")])
            .with_extra_paths(vec![PathBuf::from("/opt/extra/bin")])
            .with_inherited_path(vec![PathBuf::from("/inherited/bin"), PathBuf::from("/usr/bin")]);

        let dirs = ctx.search_dirs(SearchHint::ComposerGlobal);
        let pos = |p: &Path| dirs.iter().position(|d| d == p).unwrap();

        assert_eq!(dirs[0], PathBuf::from("/usr/bin"));
        assert!(pos(&home.join(".local/bin")) < pos(Path::new("/opt/shell/bin")));
        assert!(pos(Path::new("/opt/shell/bin")) < pos(&home.join(".composer/vendor/bin")));
        assert!(pos(&home.join(".composer/vendor/bin")) < pos(Path::new("/opt/extra/bin")));
        assert_eq!(dirs.last(), Some(&PathBuf::from("/inherited/bin")));
        assert_eq!(dirs.iter().filter(|d| *d == Path::new("/usr/bin")).count(), 1);
    }

    #[test]
    fn common_paths_follow_the_host_not_the_instruction_platform() {
        let temp = TempDir::new().unwrap();
        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new();
        let ctx = ProbeContext::new(Platform::Windows, &inst, &runner)
            .with_home(Some(temp.path().to_path_buf()))
            .with_inherited_path(Vec::new());

        let dirs = ctx.search_dirs(SearchHint::Standard);
        for dir in common_paths(Platform::host()) {
            assert!(dirs.contains(&dir));
        }
        if !cfg!(windows) {
            assert!(!dirs.iter().any(|d| d.to_string_lossy().contains("Program Files")));
        }
    }

    #[test]
    fn composer_paths_only_for_composer() {
        let temp = TempDir::new().unwrap();
        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new();
        let ctx = ProbeContext::new(Platform::Linux, &inst, &runner)
            .with_home(Some(temp.path().to_path_buf()));

        let dirs = ctx.search_dirs(SearchHint::Standard);
        assert!(!dirs.iter().any(|d| d.ends_with("vendor/bin")));
    }

    #[test]
    fn node_hint_includes_nvm_versions() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join(".nvm/versions/node/v20.11.0/bin");
        fs::create_dir_all(&bin).unwrap();

        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new();
        let ctx = ProbeContext::new(Platform::MacOS, &inst, &runner)
            .with_home(Some(temp.path().to_path_buf()));

        assert!(ctx.search_dirs(SearchHint::NodeVersionManager).contains(&bin));
        assert!(!ctx.search_dirs(SearchHint::Standard).contains(&bin));
    }

    #[test]
    fn shell_paths_are_scanned_once() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(".bashrc"), ". ~/.nvm/nvm.sh\n").unwrap();

        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new();
        let ctx = ProbeContext::new(Platform::Linux, &inst, &runner)
            .with_home(Some(temp.path().to_path_buf()));

        ctx.shell_paths();
        ctx.shell_paths();
        let nvm_calls = runner.calls().iter().filter(|c| c.starts_with("bash")).count();
        assert_eq!(nvm_calls, 1);
    }

    #[test]
    fn blank_username_is_none() {
        let temp = TempDir::new().unwrap();
        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new();
        let ctx = ProbeContext::new(Platform::Linux, &inst, &runner)
            .with_username(Some("  ".to_string()));
        assert!(ctx.username.is_none());
    }
}
