//! Check command implementation.
//!
//! `wpready check` prints the whole requirement checklist;
//! `wpready check <KEY>` checks one requirement and shows how to set it up.

use serde_json::json;

use crate::cli::args::CheckArgs;
use crate::error::Result;
use crate::readiness::Readiness;
use crate::requirements::Overrides;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};
use super::display;

/// The check command implementation.
pub struct CheckCommand {
    context: CommandContext,
    args: CheckArgs,
}

impl CheckCommand {
    pub fn new(context: &CommandContext, args: CheckArgs) -> Self {
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
        match &self.args.key {
            Some(key) => self.check_one(readiness, key, &overrides, ui),
            None => self.check_all(readiness, &overrides, ui),
        }
    }

    fn check_one(
        &self,
        readiness: &Readiness,
        key: &str,
        overrides: &Overrides,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let report = readiness.check_single_requirement(key, overrides)?;

        if self.context.json {
            ui.emit(&serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?);
        } else {
            ui.show_header(&format!("{} on {}", report.name, readiness.platform()));
            display::show_report(ui, &report, true);
        }

        Ok(CommandResult::readiness(report.is_available()))
    }

    fn check_all(
        &self,
        readiness: &Readiness,
        overrides: &Overrides,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let reports = readiness.checklist(overrides);

        if self.context.json {
            let value = json!({
                "platform": readiness.platform(),
                "overrides": overrides,
                "requirements": reports,
            });
            ui.emit(&serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?);
            return Ok(CommandResult::success());
        }

        ui.show_header(&format!("Contributor checklist ({})", readiness.platform()));
        let verbose = ui.output_mode().shows_details();
        if ui.output_mode().shows_listing() {
            for report in &reports {
                display::show_report(ui, report, verbose);
            }
        }

        let met = reports.iter().filter(|r| r.is_available()).count();
        ui.message("");
        ui.message(&format!("{} of {} requirements met", met, reports.len()));
        if met < reports.len() && !verbose {
            ui.show_hint("Run `wpready check <KEY>` for setup instructions.");
        }

        Ok(CommandResult::success())
    }
}

impl Command for CheckCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let readiness = self.context.readiness()?;
        self.run_with(&readiness, ui)
    }
}
