//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::environment::Platform;

/// wpready - WordPress contribution readiness checks.
#[derive(Debug, Parser)]
#[command(name = "wpready")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the WordPress installation (overrides current directory)
    #[arg(short, long, global = true, env = "WPREADY_ROOT")]
    pub root: Option<PathBuf>,

    /// Path to config file (overrides wpready.yml discovery)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to the settings file holding the saved account
    #[arg(long, global = true, env = "WPREADY_SETTINGS")]
    pub settings: Option<PathBuf>,

    /// Platform to use for search paths and instructions
    #[arg(long, global = true, value_parser = parse_platform)]
    pub platform: Option<Platform>,

    /// Force a requirement on or off (key=true|false, comma-separated)
    #[arg(long = "override", global = true, value_name = "KEY=BOOL")]
    pub overrides: Vec<String>,

    /// Overrides as a JSON object, e.g. '{"git": false}'
    #[arg(long, global = true, value_name = "JSON")]
    pub overrides_json: Option<String>,

    /// Flip one requirement against its real state
    #[arg(long, global = true, value_name = "KEY")]
    pub toggle: Option<String>,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

fn parse_platform(value: &str) -> Result<Platform, String> {
    value.parse().map_err(|e: crate::error::ReadinessError| e.to_string())
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show the requirement checklist (default if no command specified)
    Check(CheckArgs),

    /// Show which contribution stages are ready
    Stages(StagesArgs),

    /// Show the detected platform
    Platform,

    /// List plugins and themes under version control
    Extensions,

    /// Manage the connected WordPress.org account
    Account(AccountArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Check a single requirement and show how to set it up
    pub key: Option<String>,
}

/// Arguments for the `stages` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct StagesArgs {
    /// Evaluate a single stage
    pub stage: Option<String>,
}

/// Arguments for the `account` command.
#[derive(Debug, Clone, clap::Args)]
pub struct AccountArgs {
    #[command(subcommand)]
    pub action: AccountAction,
}

/// Account subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum AccountAction {
    /// Show the saved username
    Show,

    /// Verify a username on WordPress.org and save it
    Verify {
        /// WordPress.org username
        username: String,
    },

    /// Forget the saved username
    Forget,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
