//! Search-path discovery from shell startup files.
//!
//! Tools installed by hand or through a version manager usually only land
//! on `PATH` inside an interactive shell. A probe runs without one, so we
//! read the startup files ourselves and pull out the directories they add.
//!
//! Everything here is best-effort. Unreadable files, lines we don't
//! understand and a failing `nvm` all contribute nothing.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::command::CommandRunner;

/// Startup files read by the scanner, relative to the home directory.
pub const SHELL_CONFIG_FILES: &[&str] = &[
    ".bashrc",
    ".bash_profile",
    ".profile",
    ".zshrc",
    ".zprofile",
    ".zshenv",
    ".config/fish/config.fish",
];

// `export PATH=...`
static EXPORT_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^export\s+PATH=(.+)$").unwrap());

// `PATH=<dir>:$PATH`
static PREPEND_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^PATH=["']?([^"':]+):\$\{?PATH\}?"#).unwrap());

// `set -gx PATH <dir> $PATH` and `fish_add_path <dir>`
static FISH_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:set\s+-[gxU]+\s+PATH|fish_add_path(?:\s+-\w+)*)\s+["']?([^"'\s]+)"#)
        .unwrap()
});

/// What a single config file contributed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanResult {
    /// Directories added to `PATH`.
    pub paths: BTreeSet<PathBuf>,
    /// Whether the file initializes nvm.
    pub sources_nvm: bool,
}

/// Reads shell startup files under a home directory.
#[derive(Debug, Clone)]
pub struct ShellConfigScanner {
    home: PathBuf,
    nvm_dir: PathBuf,
}

impl ShellConfigScanner {
    /// Create a scanner for `home`, honoring `NVM_DIR` when set.
    pub fn new(home: &Path) -> Self {
        let nvm_dir = std::env::var_os("NVM_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| home.join(".nvm"));
        Self {
            home: home.to_path_buf(),
            nvm_dir,
        }
    }

    /// Use a specific nvm installation directory.
    pub fn with_nvm_dir(mut self, nvm_dir: &Path) -> Self {
        self.nvm_dir = nvm_dir.to_path_buf();
        self
    }

    /// The startup files this scanner reads.
    pub fn config_files(&self) -> Vec<PathBuf> {
        SHELL_CONFIG_FILES
            .iter()
            .map(|f| self.home.join(f))
            .collect()
    }

    /// Collect every directory the startup files add to `PATH`.
    ///
    /// When any file initializes nvm, the currently selected Node version's
    /// `bin` directory is included as well.
    pub fn scan(&self, runner: &dyn CommandRunner) -> BTreeSet<PathBuf> {
        let mut paths = BTreeSet::new();
        let mut sources_nvm = false;

        for file in self.config_files() {
            let text = match fs::read_to_string(&file) {
                Ok(text) => text,
                Err(e) => {
                    tracing::debug!("Skipping {}: {}", file.display(), e);
                    continue;
                }
            };
            let result = scan_config_text(&text, &self.home);
            paths.extend(result.paths);
            sources_nvm |= result.sources_nvm;
        }

        if sources_nvm {
            if let Some(bin) = current_nvm_bin(&self.nvm_dir, runner) {
                paths.insert(bin);
            }
        }

        paths
    }
}

/// Extract `PATH` additions from the text of one startup file.
pub fn scan_config_text(text: &str, home: &Path) -> ScanResult {
    let mut result = ScanResult::default();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.contains("nvm.sh") {
            result.sources_nvm = true;
        }

        if let Some(caps) = EXPORT_PATH.captures(line) {
            let value = strip_quotes(caps[1].trim());
            for segment in value.split(':') {
                let segment = expand_home(strip_quotes(segment), home);
                if segment.ends_with("/bin") && !segment.contains('$') {
                    result.paths.insert(PathBuf::from(segment));
                }
            }
        } else if let Some(caps) = PREPEND_PATH.captures(line) {
            let dir = expand_home(&caps[1], home);
            if !dir.contains('$') {
                result.paths.insert(PathBuf::from(dir));
            }
        } else if let Some(caps) = FISH_PATH.captures(line) {
            let dir = expand_home(&caps[1], home);
            if !dir.contains('$') {
                result.paths.insert(PathBuf::from(dir));
            }
        }
    }

    result
}

/// Subshell script that loads nvm from the directory in `$1` and prints
/// the selected version. The directory is never spliced into the script.
const NVM_CURRENT_SCRIPT: &str = r#". "$1/nvm.sh" && nvm current"#;

/// Ask nvm which Node version is selected and return its `bin` directory.
///
/// Only returns a directory that exists.
fn current_nvm_bin(nvm_dir: &Path, runner: &dyn CommandRunner) -> Option<PathBuf> {
    let dir = nvm_dir.to_string_lossy();
    let out = runner.run(
        Path::new("bash"),
        &["-c", NVM_CURRENT_SCRIPT, "nvm-current", &dir],
        None,
    )?;
    if !out.success {
        tracing::debug!("nvm current failed: {}", out.combined());
        return None;
    }

    let version = out.stdout.trim();
    // "none" and "system" mean nvm isn't providing node
    if !version.starts_with('v') {
        return None;
    }
    let bin = nvm_dir.join("versions").join("node").join(version).join("bin");
    bin.is_dir().then_some(bin)
}

fn strip_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

fn expand_home(s: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    let expanded = s.replace("${HOME}", &home).replace("$HOME", &home);
    match expanded.strip_prefix("~/") {
        Some(rest) => format!("{}/{}", home.trim_end_matches('/'), rest),
        None => expanded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::ScriptedRunner;
    use tempfile::TempDir;

    fn home() -> PathBuf {
        PathBuf::from("/home/dev")
    }

    fn nvm_command_line(nvm_dir: &Path) -> String {
        format!("bash -c {} nvm-current {}", NVM_CURRENT_SCRIPT, nvm_dir.display())
    }

    #[test]
    fn export_path_collects_bin_segments() {
        let result = scan_config_text(
            r#"export PATH="$HOME/.composer/vendor/bin:/opt/tools/bin:$PATH""#,
            &home(),
        );
        assert!(result
            .paths
            .contains(&PathBuf::from("/home/dev/.composer/vendor/bin")));
        assert!(result.paths.contains(&PathBuf::from("/opt/tools/bin")));
        assert_eq!(result.paths.len(), 2);
    }

    #[test]
    fn export_path_ignores_non_bin_segments() {
        let result = scan_config_text("export PATH=$PATH:/opt/sdk/tools", &home());
        assert!(result.paths.is_empty());
    }

    #[test]
    fn prepend_form_collects_directory() {
        let result = scan_config_text(r#"PATH="/usr/local/php/sbin:$PATH""#, &home());
        assert!(result.paths.contains(&PathBuf::from("/usr/local/php/sbin")));
    }

    #[test]
    fn prepend_form_accepts_braced_path() {
        let result = scan_config_text("PATH=~/scripts:${PATH}", &home());
        assert!(result.paths.contains(&PathBuf::from("/home/dev/scripts")));
    }

    #[test]
    fn fish_forms_collect_directory() {
        let result = scan_config_text(
            "set -gx PATH /opt/fish/bin $PATH\nfish_add_path -g ~/.local/share/bin",
            &home(),
        );
        assert!(result.paths.contains(&PathBuf::from("/opt/fish/bin")));
        assert!(result
            .paths
            .contains(&PathBuf::from("/home/dev/.local/share/bin")));
    }

    #[test]
    fn comment_lines_are_skipped() {
        let result = scan_config_text(
            "# export PATH=/commented/bin:$PATH\n  # PATH=/also/commented:$PATH",
            &home(),
        );
        assert!(result.paths.is_empty());
    }

    #[test]
    fn unexpanded_variables_are_skipped() {
        let result = scan_config_text("export PATH=$GOPATH/bin:$PATH", &home());
        assert!(result.paths.is_empty());
    }

    #[test]
    fn nvm_marker_is_detected() {
        let result = scan_config_text(
            r#"[ -s "$NVM_DIR/nvm.sh" ] && \. "$NVM_DIR/nvm.sh""#,
            &home(),
        );
        assert!(result.sources_nvm);
    }

    #[test]
    fn scan_reads_files_and_skips_missing() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(".zshrc"),
            "export PATH=/opt/homebrew/opt/php/bin:$PATH\n",
        )
        .unwrap();

        let scanner = ShellConfigScanner::new(temp.path()).with_nvm_dir(&temp.path().join(".nvm"));
        let paths = scanner.scan(&ScriptedRunner::new());

        assert_eq!(paths.len(), 1);
        assert!(paths.contains(&PathBuf::from("/opt/homebrew/opt/php/bin")));
    }

    #[test]
    fn scan_resolves_current_nvm_version() {
        let temp = TempDir::new().unwrap();
        let nvm_dir = temp.path().join(".nvm");
        fs::write(
            temp.path().join(".bashrc"),
            "export NVM_DIR=\"$HOME/.nvm\"\n. \"$NVM_DIR/nvm.sh\"\n",
        )
        .unwrap();

        let bin = nvm_dir.join("versions/node/v20.11.0/bin");
        fs::create_dir_all(&bin).unwrap();

        let command_line = nvm_command_line(&nvm_dir);
        let runner = ScriptedRunner::new().respond(&command_line, "v20.11.0\n");

        let scanner = ShellConfigScanner::new(temp.path()).with_nvm_dir(&nvm_dir);
        let paths = scanner.scan(&runner);

        assert!(paths.contains(&bin));
    }

    #[test]
    fn scan_skips_nvm_version_without_bin_dir() {
        let temp = TempDir::new().unwrap();
        let nvm_dir = temp.path().join(".nvm");
        fs::write(temp.path().join(".bashrc"), ". ~/.nvm/nvm.sh\n").unwrap();

        let command_line = nvm_command_line(&nvm_dir);
        let runner = ScriptedRunner::new().respond(&command_line, "v22.1.0\n");

        let scanner = ShellConfigScanner::new(temp.path()).with_nvm_dir(&nvm_dir);
        assert!(scanner.scan(&runner).is_empty());
        assert_eq!(runner.calls().len(), 1);
    }

    #[test]
    fn nvm_dir_is_passed_as_argument_not_script_text() {
        let temp = TempDir::new().unwrap();
        let nvm_dir = temp.path().join("odd \"$(touch pwned)\" dir");
        fs::write(temp.path().join(".bashrc"), ". ~/.nvm/nvm.sh\n").unwrap();

        let runner = ScriptedRunner::new();
        ShellConfigScanner::new(temp.path())
            .with_nvm_dir(&nvm_dir)
            .scan(&runner);

        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], nvm_command_line(&nvm_dir));
        assert!(calls[0].starts_with(&format!("bash -c {} nvm-current ", NVM_CURRENT_SCRIPT)));
    }

    #[test]
    fn scan_tolerates_failing_nvm() {
        let temp = TempDir::new().unwrap();
        let nvm_dir = temp.path().join(".nvm");
        fs::write(temp.path().join(".bashrc"), "source ~/.nvm/nvm.sh\n").unwrap();

        let command_line = nvm_command_line(&nvm_dir);
        let runner = ScriptedRunner::new().fail(&command_line, "nvm: command not found");

        let scanner = ShellConfigScanner::new(temp.path()).with_nvm_dir(&nvm_dir);
        assert!(scanner.scan(&runner).is_empty());
    }

    #[test]
    fn scan_ignores_system_nvm_selection() {
        let temp = TempDir::new().unwrap();
        let nvm_dir = temp.path().join(".nvm");
        fs::write(temp.path().join(".profile"), ". ~/.nvm/nvm.sh\n").unwrap();

        let command_line = nvm_command_line(&nvm_dir);
        let runner = ScriptedRunner::new().respond(&command_line, "system\n");

        let scanner = ShellConfigScanner::new(temp.path()).with_nvm_dir(&nvm_dir);
        assert!(scanner.scan(&runner).is_empty());
    }

    #[test]
    fn config_files_include_bash_and_zsh() {
        let scanner = ShellConfigScanner::new(&home());
        let files = scanner.config_files();
        assert!(files.iter().any(|f| f.ends_with(".bashrc")));
        assert!(files.iter().any(|f| f.ends_with(".zshrc")));
    }
}
