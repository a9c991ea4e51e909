//! Tool probe: find a command-line tool and read its version.
//!
//! The biggest source of false negatives is a tool that is installed but
//! not on the `PATH` a non-interactive process inherits (nvm-managed Node,
//! Composer's global bin, Homebrew on Apple Silicon). The probe runs the
//! tool with a search path built from every place it might live.
//!
//! # Example
//!
//! ```
//! use wpready::requirements::probe::extract_version;
//!
//! assert_eq!(extract_version("git version 2.43.0\n").as_deref(), Some("2.43.0"));
//! assert_eq!(extract_version("v20.11.0").as_deref(), Some("20.11.0"));
//! assert!(extract_version("command not found").is_none());
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::shell::CommandOutput;

use super::context::ProbeContext;
use super::paths::{resolve_real_path, resolve_tool_path};
use super::registry::ToolSpec;

static VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+\.\d+\.\d+").unwrap());

/// First `major.minor.patch` in a tool's output.
pub fn extract_version(output: &str) -> Option<String> {
    VERSION.find(output).map(|m| m.as_str().to_string())
}

/// What probing a tool found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolReport {
    pub found: bool,
    pub version: Option<String>,
    /// Real path of the executable, symlinks followed.
    pub resolved_path: Option<PathBuf>,
    /// Set when the tool only answered when run directly from this
    /// directory, not through the merged search path.
    pub isolated_dir: Option<PathBuf>,
    /// Combined output of the version command.
    pub output: String,
}

impl ToolReport {
    fn missing() -> Self {
        Self::default()
    }
}

/// Probe a tool. Never fails; anything that goes wrong reads as not found.
pub fn probe_tool(ctx: &ProbeContext<'_>, spec: &ToolSpec) -> ToolReport {
    let dirs = ctx.search_dirs(spec.search);
    let search_path = match std::env::join_paths(&dirs) {
        Ok(joined) => Some(joined),
        Err(e) => {
            tracing::debug!("Could not build search path for {}: {}", spec.command, e);
            None
        }
    };

    let out = ctx
        .runner
        .run(Path::new(spec.command), spec.version_args, search_path.as_deref());
    if let Some((version, output)) = interpret(out) {
        return ToolReport {
            found: true,
            version,
            resolved_path: resolve_real_path(spec.command, &dirs),
            isolated_dir: None,
            output,
        };
    }

    probe_isolated(ctx, spec, &dirs)
}

/// Run the tool straight from each candidate directory that holds it.
///
/// Reaching this point means the merged search path failed while a
/// directory on it still has a working binary, which points at a sandbox
/// or a broken shim earlier on the path. Worth a warning.
fn probe_isolated(ctx: &ProbeContext<'_>, spec: &ToolSpec, dirs: &[PathBuf]) -> ToolReport {
    for dir in dirs {
        let Some(binary) = resolve_tool_path(spec.command, std::slice::from_ref(dir)) else {
            continue;
        };
        let out = ctx.runner.run(&binary, spec.version_args, None);
        if let Some((version, output)) = interpret(out) {
            tracing::warn!(
                "{} only responded when run directly from {}",
                spec.command,
                dir.display()
            );
            return ToolReport {
                found: true,
                version,
                resolved_path: Some(std::fs::canonicalize(&binary).unwrap_or(binary)),
                isolated_dir: Some(dir.clone()),
                output,
            };
        }
    }

    tracing::debug!("{} not found in {} directories", spec.command, dirs.len());
    ToolReport::missing()
}

/// Decide whether a run counts as the tool being present.
///
/// Empty output never counts. Output without a version counts only when
/// the process exited successfully.
fn interpret(out: Option<CommandOutput>) -> Option<(Option<String>, String)> {
    let out = out?;
    let text = out.combined();
    if text.is_empty() {
        return None;
    }
    let version = extract_version(&text);
    if version.is_none() && !out.success {
        return None;
    }
    Some((version, text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Platform;
    use crate::install::Installation;
    use crate::requirements::registry::SearchHint;
    use crate::shell::ScriptedRunner;
    use std::fs;
    use tempfile::TempDir;

    const GIT: ToolSpec = ToolSpec {
        command: "git",
        version_args: &["--version"],
        search: SearchHint::Standard,
    };

    const COMPOSER: ToolSpec = ToolSpec {
        command: "composer",
        version_args: &["--version"],
        search: SearchHint::ComposerGlobal,
    };

    fn create_fake_binary(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, "#!/bin/sh\n").unwrap();
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(path, fs::Permissions::from_mode(0o755)).unwrap();
        }
    }

    fn probe(temp: &TempDir, runner: &ScriptedRunner, extra: Vec<PathBuf>, spec: &ToolSpec) -> ToolReport {
        let inst = Installation::new(temp.path());
        let ctx = ProbeContext::new(Platform::Linux, &inst, runner)
            .with_home(Some(temp.path().to_path_buf()))
            .with_common_paths(Vec::new())
            .with_inherited_path(Vec::new())
            .with_extra_paths(extra);
        probe_tool(&ctx, spec)
    }

    #[test]
    fn extracts_first_version() {
        assert_eq!(
            extract_version("Composer version 2.7.1 2024-02-09 15:26:28").as_deref(),
            Some("2.7.1")
        );
        assert_eq!(extract_version("10.2.4\n").as_deref(), Some("10.2.4"));
        assert!(extract_version("1.2").is_none());
    }

    #[test]
    fn git_version_is_found() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0\n");
        let report = probe(&temp, &runner, Vec::new(), &GIT);
        assert!(report.found);
        assert_eq!(report.version.as_deref(), Some("2.43.0"));
        assert!(report.isolated_dir.is_none());
    }

    #[test]
    fn empty_output_is_not_found() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().respond("git --version", "");
        assert!(!probe(&temp, &runner, Vec::new(), &GIT).found);
    }

    #[test]
    fn missing_tool_is_not_found() {
        let temp = TempDir::new().unwrap();
        let report = probe(&temp, &ScriptedRunner::new(), Vec::new(), &GIT);
        assert_eq!(report, ToolReport::default());
    }

    #[test]
    fn unparseable_version_with_success_is_found() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().respond("git --version", "git version (custom build)");
        let report = probe(&temp, &runner, Vec::new(), &GIT);
        assert!(report.found);
        assert!(report.version.is_none());
    }

    #[test]
    fn failing_exit_without_version_is_not_found() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().fail("git --version", "git: command not found");
        assert!(!probe(&temp, &runner, Vec::new(), &GIT).found);
    }

    #[test]
    fn failing_exit_with_version_is_found() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().fail("git --version", "git version 2.39.3 (Apple Git-146)");
        let report = probe(&temp, &runner, Vec::new(), &GIT);
        assert!(report.found);
        assert_eq!(report.version.as_deref(), Some("2.39.3"));
    }

    #[test]
    fn search_path_is_passed_to_runner() {
        let temp = TempDir::new().unwrap();
        let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0");
        probe(&temp, &runner, vec![PathBuf::from("/opt/custom/bin")], &GIT);

        let path = runner.last_search_path().unwrap();
        let dirs: Vec<_> = std::env::split_paths(&path).collect();
        assert!(dirs.contains(&PathBuf::from("/opt/custom/bin")));
        assert!(dirs.contains(&temp.path().join(".local/bin")));
    }

    #[cfg(unix)]
    #[test]
    fn windows_platform_on_unix_keeps_the_search_path() {
        let temp = TempDir::new().unwrap();
        let inst = Installation::new(temp.path());
        let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0");
        let ctx = ProbeContext::new(Platform::Windows, &inst, &runner)
            .with_home(Some(temp.path().to_path_buf()))
            .with_common_paths(crate::requirements::paths::common_paths(Platform::Windows))
            .with_inherited_path(Vec::new())
            .with_extra_paths(vec![PathBuf::from("/opt/nvm-node/bin")]);

        assert!(probe_tool(&ctx, &GIT).found);
        let path = runner.last_search_path().unwrap();
        let dirs: Vec<_> = std::env::split_paths(&path).collect();
        assert!(dirs.contains(&PathBuf::from("/opt/nvm-node/bin")));
        assert!(dirs.contains(&temp.path().join(".local/bin")));
    }

    #[cfg(unix)]
    #[test]
    fn resolved_path_follows_symlinks() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("Cellar/git/2.43.0/bin/git");
        create_fake_binary(&real);
        let bin = temp.path().join("brew/bin");
        fs::create_dir_all(&bin).unwrap();
        std::os::unix::fs::symlink(&real, bin.join("git")).unwrap();

        let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0");
        let report = probe(&temp, &runner, vec![bin], &GIT);
        assert_eq!(report.resolved_path, Some(fs::canonicalize(&real).unwrap()));
    }

    #[test]
    fn isolated_directory_is_tried_when_merged_path_fails() {
        let temp = TempDir::new().unwrap();
        let bin = temp.path().join(".composer/vendor/bin");
        let binary = bin.join("composer");
        create_fake_binary(&binary);

        let runner = ScriptedRunner::new()
            .respond("composer --version", "")
            .respond(
                &format!("{} --version", binary.display()),
                "Composer version 2.7.1 2024-02-09 15:26:28",
            );
        let report = probe(&temp, &runner, Vec::new(), &COMPOSER);

        assert!(report.found);
        assert_eq!(report.version.as_deref(), Some("2.7.1"));
        assert_eq!(report.isolated_dir, Some(bin));
    }
}
