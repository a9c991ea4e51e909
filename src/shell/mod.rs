//! Subprocess execution and shell environment discovery.

pub mod command;
pub mod config_scan;

pub use command::{CommandOutput, CommandRunner, ScriptedRunner, SystemRunner, DEFAULT_PROBE_TIMEOUT};
pub use config_scan::{scan_config_text, ScanResult, ShellConfigScanner, SHELL_CONFIG_FILES};
