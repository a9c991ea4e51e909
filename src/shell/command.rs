//! Subprocess execution for probes.
//!
//! Probes never run through a shell: the program is spawned directly with
//! an explicit search path so that the lookup is reproducible. Every
//! invocation is bounded by a timeout; a hung tool is killed and treated
//! the same as a missing one.

use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use wait_timeout::ChildExt;

/// Default time allowed for a single probe subprocess.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(3);

/// Captured output of a finished subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command exited with code 0.
    pub success: bool,
}

impl CommandOutput {
    /// Create a success result.
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            exit_code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
            duration: Duration::ZERO,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            exit_code,
            stdout: String::new(),
            stderr: stderr.into(),
            duration: Duration::ZERO,
            success: false,
        }
    }

    /// Stdout followed by stderr, trimmed.
    ///
    /// Several tools print their version on stderr, so probes always look
    /// at both streams.
    pub fn combined(&self) -> String {
        let mut text = String::with_capacity(self.stdout.len() + self.stderr.len() + 1);
        text.push_str(self.stdout.trim_end());
        if !self.stderr.trim().is_empty() {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(self.stderr.trim_end());
        }
        text.trim().to_string()
    }
}

/// Runs external programs on behalf of probes.
///
/// Implementations return `None` when the program could not be run at all
/// (not found, permission denied, timed out). A program that ran and
/// exited non-zero still yields `Some`.
pub trait CommandRunner {
    /// Run `program` with `args`, using `search_path` as the child's `PATH`
    /// when given.
    fn run(&self, program: &Path, args: &[&str], search_path: Option<&OsStr>)
        -> Option<CommandOutput>;
}

/// Runs real subprocesses with a timeout.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    /// Create a runner with the given per-command timeout.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_PROBE_TIMEOUT)
    }
}

impl CommandRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        search_path: Option<&OsStr>,
    ) -> Option<CommandOutput> {
        let start = Instant::now();

        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(path) = search_path {
            cmd.env("PATH", path);
        }

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                tracing::debug!("Could not run {}: {}", program.display(), e);
                return None;
            }
        };

        // Drain both pipes on their own threads so a chatty child can't
        // block on a full pipe while we wait for it.
        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let stdout_handle = thread::spawn(move || read_pipe(stdout));
        let stderr_handle = thread::spawn(move || read_pipe(stderr));

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                tracing::debug!(
                    "{} timed out after {}s",
                    program.display(),
                    self.timeout.as_secs_f32()
                );
                return None;
            }
            Err(e) => {
                let _ = child.kill();
                tracing::debug!("Failed to wait for {}: {}", program.display(), e);
                return None;
            }
        };

        let stdout = stdout_handle.join().unwrap_or_default();
        let stderr = stderr_handle.join().unwrap_or_default();

        Some(CommandOutput {
            exit_code: status.code(),
            stdout,
            stderr,
            duration: start.elapsed(),
            success: status.success(),
        })
    }
}

fn read_pipe<R: Read>(pipe: Option<R>) -> String {
    let mut buf = Vec::new();
    if let Some(mut pipe) = pipe {
        let _ = pipe.read_to_end(&mut buf);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// A runner that answers from a fixed script instead of spawning processes.
///
/// Responses are keyed by the command line (`"git --version"`). A lookup
/// first tries the program as given, then its file name, so a script entry
/// for `"node --version"` also answers `/usr/bin/node --version`. Unscripted
/// commands behave like a missing program.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use wpready::shell::{CommandRunner, ScriptedRunner};
///
/// let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0\n");
/// let out = runner.run(Path::new("git"), &["--version"], None).unwrap();
/// assert!(out.success);
/// assert!(runner.run(Path::new("svn"), &["--version"], None).is_none());
/// ```
#[derive(Debug, Default)]
pub struct ScriptedRunner {
    responses: HashMap<String, CommandOutput>,
    calls: RefCell<Vec<(String, Option<OsString>)>>,
}

impl ScriptedRunner {
    /// Create a runner with no scripted commands.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful command with the given stdout.
    pub fn respond(mut self, command_line: &str, stdout: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), CommandOutput::success(stdout));
        self
    }

    /// Script a command that runs but exits non-zero.
    pub fn fail(mut self, command_line: &str, stderr: &str) -> Self {
        self.responses
            .insert(command_line.to_string(), CommandOutput::failure(Some(1), stderr));
        self
    }

    /// Command lines that were requested, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().iter().map(|(c, _)| c.clone()).collect()
    }

    /// The `PATH` passed with the most recent call.
    pub fn last_search_path(&self) -> Option<OsString> {
        self.calls.borrow().last().and_then(|(_, p)| p.clone())
    }

    fn key(program: &str, args: &[&str]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(
        &self,
        program: &Path,
        args: &[&str],
        search_path: Option<&OsStr>,
    ) -> Option<CommandOutput> {
        let full = Self::key(&program.to_string_lossy(), args);
        self.calls
            .borrow_mut()
            .push((full.clone(), search_path.map(OsStr::to_os_string)));

        if let Some(out) = self.responses.get(&full) {
            return Some(out.clone());
        }
        let name = program.file_name()?.to_string_lossy();
        self.responses.get(&Self::key(&name, args)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combined_joins_stdout_and_stderr() {
        let out = CommandOutput {
            exit_code: Some(0),
            stdout: "line one\n".to_string(),
            stderr: "line two\n".to_string(),
            duration: Duration::ZERO,
            success: true,
        };
        assert_eq!(out.combined(), "line one\nline two");
    }

    #[test]
    fn combined_uses_stderr_when_stdout_empty() {
        let out = CommandOutput::failure(Some(0), "v1.2.3\n");
        assert_eq!(out.combined(), "v1.2.3");
    }

    #[test]
    fn combined_is_empty_for_blank_output() {
        let out = CommandOutput::success("  \n");
        assert!(out.combined().is_empty());
    }

    #[test]
    fn scripted_runner_matches_full_command_line() {
        let runner = ScriptedRunner::new().respond("git --version", "git version 2.43.0");
        let out = runner.run(Path::new("git"), &["--version"], None).unwrap();
        assert_eq!(out.stdout, "git version 2.43.0");
    }

    #[test]
    fn scripted_runner_falls_back_to_file_name() {
        let runner = ScriptedRunner::new().respond("node --version", "v20.11.0");
        let out = runner
            .run(Path::new("/usr/local/bin/node"), &["--version"], None)
            .unwrap();
        assert_eq!(out.stdout, "v20.11.0");
    }

    #[test]
    fn scripted_runner_unknown_command_is_none() {
        let runner = ScriptedRunner::new();
        assert!(runner.run(Path::new("svn"), &["--version"], None).is_none());
    }

    #[test]
    fn scripted_runner_records_calls_and_path() {
        let runner = ScriptedRunner::new().fail("composer --version", "broken");
        let out = runner
            .run(
                Path::new("composer"),
                &["--version"],
                Some(OsStr::new("/opt/bin")),
            )
            .unwrap();
        assert!(!out.success);
        assert_eq!(runner.calls(), vec!["composer --version".to_string()]);
        assert_eq!(runner.last_search_path(), Some(OsString::from("/opt/bin")));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_output() {
        let runner = SystemRunner::default();
        let out = runner.run(Path::new("echo"), &["hello"], None).unwrap();
        assert!(out.success);
        assert!(out.stdout.contains("hello"));
    }

    #[test]
    fn system_runner_missing_program_is_none() {
        let runner = SystemRunner::default();
        assert!(runner
            .run(
                Path::new("wpready-definitely-not-a-real-tool"),
                &["--version"],
                None
            )
            .is_none());
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_times_out() {
        let runner = SystemRunner::new(Duration::from_millis(200));
        let start = Instant::now();
        let out = runner.run(Path::new("sleep"), &["5"], None);
        assert!(out.is_none());
        assert!(start.elapsed() < Duration::from_secs(4));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_non_zero_exit() {
        let runner = SystemRunner::default();
        let out = runner.run(Path::new("false"), &[], None).unwrap();
        assert!(!out.success);
    }
}
