//! Terminal UI.

use console::Term;
use std::io::Write;

use super::{should_use_colors, OutputMode, ReadinessTheme, UserInterface};

/// Terminal UI writing to stdout.
pub struct TerminalUI {
    term: Term,
    theme: ReadinessTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a terminal UI; colors follow `NO_COLOR` and TTY detection.
    pub fn new(mode: OutputMode) -> Self {
        Self::with_colors(mode, should_use_colors())
    }

    pub fn with_colors(mode: OutputMode, colors: bool) -> Self {
        let theme = if colors {
            ReadinessTheme::new()
        } else {
            ReadinessTheme::plain()
        };

        Self {
            term: Term::stdout(),
            theme,
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn output_mode(&self) -> OutputMode {
        self.mode
    }

    fn message(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", msg).ok();
        }
    }

    fn success(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
        }
    }

    fn warning(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
        }
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn pending(&mut self, msg: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "{}", self.theme.format_pending(msg)).ok();
        }
    }

    fn show_detail(&mut self, detail: &str) {
        if self.mode.shows_status() {
            for line in detail.lines() {
                writeln!(self.term, "{}", self.theme.format_detail(line)).ok();
            }
        }
    }

    fn show_header(&mut self, title: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n{}\n", self.theme.format_header(title)).ok();
        }
    }

    fn show_hint(&mut self, hint: &str) {
        if self.mode.shows_status() {
            writeln!(self.term, "\n  {}", self.theme.format_hint(hint)).ok();
        }
    }

    fn emit(&mut self, data: &str) {
        writeln!(self.term, "{}", data).ok();
    }

    fn is_interactive(&self) -> bool {
        self.term.is_term()
    }

    fn set_output_mode(&mut self, mode: OutputMode) {
        self.mode = mode;
    }
}

/// Create the UI for a command run.
///
/// `no_color` forces the plain theme regardless of the terminal.
pub fn create_ui(mode: OutputMode, no_color: bool) -> Box<dyn UserInterface> {
    if no_color {
        Box::new(TerminalUI::with_colors(mode, false))
    } else {
        Box::new(TerminalUI::new(mode))
    }
}
