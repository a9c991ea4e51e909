//! Stages command implementation.
//!
//! `wpready stages` shows which kinds of contribution the machine is
//! ready for.

use serde_json::json;

use crate::cli::args::StagesArgs;
use crate::error::Result;
use crate::readiness::Readiness;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display;

/// The stages command implementation.
pub struct StagesCommand {
    context: CommandContext,
    args: StagesArgs,
}

impl StagesCommand {
    pub fn new(context: &CommandContext, args: StagesArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    /// Run against prepared readiness checks.
    pub fn run_with(
        &self,
        readiness: &Readiness,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let overrides = self.context.effective_overrides(readiness, ui)?;
        let evaluations = match &self.args.stage {
            Some(stage) => vec![readiness.evaluate_stage(stage, &overrides)?],
            None => readiness.evaluate_all_stages(&overrides),
        };
        let all_ready = evaluations.iter().all(|e| e.ready);

        if self.context.json {
            let value = json!({
                "platform": readiness.platform(),
                "overrides": overrides,
                "stages": evaluations,
            });
            ui.emit(&serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::readiness(all_ready));
        }

        ui.show_header(&format!("Contribution stages ({})", readiness.platform()));
        for eval in &evaluations {
            display::show_stage(ui, eval);
        }

        if self.args.stage.is_none() {
            let ready = evaluations.iter().filter(|e| e.ready).count();
            ui.message("");
            ui.message(&format!("{} of {} stages ready", ready, evaluations.len()));
        }

        Ok(CommandResult::readiness(all_ready))
    }
}

impl Command for StagesCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let readiness = self.context.readiness()?;
        self.run_with(&readiness, ui)
    }
}
