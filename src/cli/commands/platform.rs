//! Platform command implementation.
//!
//! `wpready platform` shows what detection found and which platform the
//! checks will use.

use serde_json::json;

use crate::environment::{detect, HostHint, PlatformDetection};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The platform command implementation.
pub struct PlatformCommand {
    context: CommandContext,
}

impl PlatformCommand {
    pub fn new(context: &CommandContext) -> Self {
        Self {
            context: context.clone(),
        }
    }

    /// Report `detection` together with the explicit platform, if any.
    pub fn run_with(
        &self,
        detection: PlatformDetection,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let active = self.context.platform.unwrap_or(detection.platform);

        if self.context.json {
            let value = json!({
                "platform": active,
                "detected": detection,
                "overridden": self.context.platform.is_some(),
            });
            ui.emit(&serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        ui.message(&format!("Platform: {}", active));
        if let Some(explicit) = self.context.platform {
            if explicit != detection.platform {
                ui.message(&format!("Detected: {} (overridden)", detection.platform));
            }
        }
        if let Some(hint) = detection.host_hint {
            ui.show_detail(host_hint_text(hint));
        }
        Ok(CommandResult::success())
    }
}

fn host_hint_text(hint: HostHint) -> &'static str {
    match hint {
        HostHint::DarwinHost => "Running in Linux on a Mac host; showing macOS instructions.",
        HostHint::WindowsSubsystem => "Running in WSL on a Windows host; showing Windows instructions.",
    }
}

impl Command for PlatformCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        self.run_with(detect(), ui)
    }
}
