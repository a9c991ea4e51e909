//! Shared display helpers for checklist rows and stage results.

use crate::requirements::{Overrides, RequirementReport};
use crate::stages::StageEvaluation;
use crate::ui::UserInterface;

/// Render overrides the way `--override` accepts them.
pub fn format_overrides(overrides: &Overrides) -> String {
    if overrides.is_empty() {
        return "none".to_string();
    }
    overrides
        .iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect::<Vec<_>>()
        .join(",")
}

/// The status line for a checklist row.
pub fn report_line(report: &RequirementReport) -> String {
    let mut line = match report.status.detail() {
        Some(detail) if detail != report.name => format!("{}: {}", report.name, detail),
        _ => report.name.clone(),
    };
    if report.overridden {
        line.push_str(" (override)");
    }
    line
}

/// Print one checklist row, styled by status.
///
/// Verbose output adds the resolved path; `with_instructions` adds the
/// setup steps under a missing row.
pub fn show_report(ui: &mut dyn UserInterface, report: &RequirementReport, with_instructions: bool) {
    let line = report_line(report);
    if report.is_available() {
        ui.success(&line);
        if ui.output_mode().shows_details() {
            if let Some(path) = report.status.path() {
                ui.show_detail(&path.display().to_string());
            }
        }
    } else {
        ui.warning(&line);
        if with_instructions {
            ui.show_detail(&report.rationale);
            ui.show_detail(&report.instructions);
        }
    }
}

/// Print one stage result.
pub fn show_stage(ui: &mut dyn UserInterface, eval: &StageEvaluation) {
    if eval.ready {
        ui.success(&eval.title);
    } else {
        ui.warning(&format!("{} ({})", eval.title, eval.state()));
        ui.show_detail(&format!("Missing: {}", eval.missing_required.join(", ")));
    }
    if !eval.missing_optional.is_empty() && ui.output_mode().shows_listing() {
        ui.show_detail(&format!("Optional: {}", eval.missing_optional.join(", ")));
    }
}
