//! CLI command implementations.

pub mod account;
pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod extensions;
pub mod platform;
pub mod stages;

pub use dispatcher::{Command, CommandContext, CommandDispatcher, CommandResult, NOT_READY_EXIT_CODE};
