//! Extensions command implementation.
//!
//! `wpready extensions` lists plugins and themes that are git checkouts.

use crate::error::Result;
use crate::install::GitRepoEntry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The extensions command implementation.
pub struct ExtensionsCommand {
    context: CommandContext,
}

impl ExtensionsCommand {
    pub fn new(context: &CommandContext) -> Self {
        Self {
            context: context.clone(),
        }
    }

    pub fn run_with(
        &self,
        entries: &[GitRepoEntry],
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        if self.context.json {
            ui.emit(&serde_json::to_string_pretty(entries).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        if entries.is_empty() {
            ui.message("No plugins or themes under version control.");
            return Ok(CommandResult::success());
        }

        ui.show_header("Git-tracked plugins and themes");
        for entry in entries {
            let line = format!("{} {} ({})", entry.kind.label(), entry.name, entry.folder);
            if entry.active {
                ui.success(&format!("{}, active", line));
            } else {
                ui.pending(&line);
            }
            if ui.output_mode().shows_details() {
                ui.show_detail(&entry.path.display().to_string());
            }
        }
        Ok(CommandResult::success())
    }
}

impl Command for ExtensionsCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let readiness = self.context.readiness()?;
        self.run_with(&readiness.git_tracked_extensions(), ui)
    }
}
