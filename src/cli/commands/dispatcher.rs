//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandContext`] for the global flags every command shares
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use anyhow::anyhow;

use crate::cli::args::{CheckArgs, Cli, Commands};
use crate::config::load_config;
use crate::environment::Platform;
use crate::error::Result;
use crate::readiness::Readiness;
use crate::requirements::{overrides_from_json, parse_overrides, Overrides};
use crate::state::Settings;
use crate::ui::UserInterface;

use super::display;

/// Exit code when a check or stage came back not ready.
pub const NOT_READY_EXIT_CODE: i32 = 2;

/// Trait for command implementations.
///
/// Each CLI subcommand implements this trait to provide its execution logic.
pub trait Command {
    /// Execute the command.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] indicating success/failure and exit code.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }

    /// Success when `ready`, otherwise [`NOT_READY_EXIT_CODE`].
    pub fn readiness(ready: bool) -> Self {
        if ready {
            Self::success()
        } else {
            Self::failure(NOT_READY_EXIT_CODE)
        }
    }
}

/// Global flags resolved for one invocation.
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub root: PathBuf,
    pub config_path: Option<PathBuf>,
    pub settings_path: Option<PathBuf>,
    /// Explicit platform; `None` means detect.
    pub platform: Option<Platform>,
    pub overrides: Overrides,
    /// Requirement key to flip before running.
    pub toggle: Option<String>,
    pub json: bool,
}

impl CommandContext {
    /// A context for `root` with every flag at its default.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }

    /// Resolve the global flags.
    ///
    /// JSON overrides are applied first, so `--override` entries win.
    pub fn from_cli(cli: &Cli, root: PathBuf) -> Result<Self> {
        let mut overrides = match &cli.overrides_json {
            Some(json) => overrides_from_json(json)?,
            None => Overrides::new(),
        };
        overrides.extend(parse_overrides(&cli.overrides)?);

        Ok(Self {
            root,
            config_path: cli.config.clone(),
            settings_path: cli.settings.clone(),
            platform: cli.platform,
            overrides,
            toggle: cli.toggle.clone(),
            json: cli.json,
        })
    }

    /// Settings file location: the explicit path or the user default.
    pub fn settings_file(&self) -> Result<PathBuf> {
        match &self.settings_path {
            Some(path) => Ok(path.clone()),
            None => Settings::default_path()
                .ok_or_else(|| anyhow!("No config directory found; pass --settings").into()),
        }
    }

    /// Saved settings, or defaults when they can't be read.
    fn saved_settings(&self) -> Settings {
        let loaded = self.settings_file().and_then(|path| Settings::load(&path));
        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Ignoring settings: {}", e);
                Settings::default()
            }
        }
    }

    /// Readiness checks for this invocation's root, config and account.
    pub fn readiness(&self) -> Result<Readiness> {
        let config = load_config(&self.root, self.config_path.as_deref())?;
        let username = self.saved_settings().username().map(str::to_string);
        Ok(Readiness::from_config(&self.root, &config, self.platform).with_username(username))
    }

    /// The overrides to evaluate with, after applying `--toggle`.
    ///
    /// When a toggle was requested the resulting set is shown so it can be
    /// passed back on the next run.
    pub fn effective_overrides(
        &self,
        readiness: &Readiness,
        ui: &mut dyn UserInterface,
    ) -> Result<Overrides> {
        let Some(key) = &self.toggle else {
            return Ok(self.overrides.clone());
        };
        let overrides = readiness.toggle_override(key, &self.overrides)?;
        if !self.json {
            ui.message(&format!(
                "Overrides: {}",
                display::format_overrides(&overrides)
            ));
        }
        Ok(overrides)
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    context: CommandContext,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the resolved global flags.
    pub fn new(context: CommandContext) -> Self {
        Self { context }
    }

    /// Get the installation root path.
    pub fn root(&self) -> &Path {
        &self.context.root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let ctx = &self.context;
        match &cli.command {
            Some(Commands::Check(args)) => {
                super::check::CheckCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Stages(args)) => {
                super::stages::StagesCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Platform) => super::platform::PlatformCommand::new(ctx).execute(ui),
            Some(Commands::Extensions) => {
                super::extensions::ExtensionsCommand::new(ctx).execute(ui)
            }
            Some(Commands::Account(args)) => {
                super::account::AccountCommand::new(ctx, args.clone()).execute(ui)
            }
            Some(Commands::Completions(args)) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
            None => super::check::CheckCommand::new(ctx, CheckArgs::default()).execute(ui),
        }
    }
}
