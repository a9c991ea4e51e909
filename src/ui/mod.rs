//! Terminal output.
//!
//! This module provides:
//! - [`UserInterface`] trait for UI abstraction
//! - [`TerminalUI`] for stdout
//! - [`MockUI`] for capturing output in tests
//!
//! # Example
//!
//! ```
//! use wpready::ui::{create_ui, OutputMode};
//!
//! let mut ui = create_ui(OutputMode::Quiet, true);
//! ui.show_header("Contributor readiness");
//! ui.success("Git 2.43.0");
//! ```

pub mod mock;
pub mod output;
pub mod terminal;
pub mod theme;

pub use mock::MockUI;
pub use output::OutputMode;
pub use terminal::{create_ui, TerminalUI};
pub use theme::{should_use_colors, ReadinessTheme};

/// Trait for user interface interactions.
///
/// This trait allows mocking the UI in tests.
pub trait UserInterface {
    /// Get the current output mode.
    fn output_mode(&self) -> OutputMode;

    /// Display a message to the user.
    fn message(&mut self, msg: &str);

    /// Display a success message.
    fn success(&mut self, msg: &str);

    /// Display a warning message.
    fn warning(&mut self, msg: &str);

    /// Display an error message. Shown in every mode.
    fn error(&mut self, msg: &str);

    /// Display an optional item that is not in place.
    fn pending(&mut self, msg: &str);

    /// Display indented detail lines under the previous row.
    fn show_detail(&mut self, detail: &str);

    /// Display a header.
    fn show_header(&mut self, title: &str);

    /// Display a hint below the output.
    fn show_hint(&mut self, hint: &str);

    /// Write machine-readable output. Shown in every mode.
    fn emit(&mut self, data: &str);

    /// Check if running in interactive mode.
    fn is_interactive(&self) -> bool;

    /// Change the output mode.
    fn set_output_mode(&mut self, mode: OutputMode);
}
