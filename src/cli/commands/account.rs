//! Account command implementation.
//!
//! `wpready account` manages the WordPress.org username that satisfies
//! the account requirement.

use chrono::Utc;
use serde_json::json;

use crate::account::{verify_account_identity, AccountDirectory, ProfileDirectory};
use crate::cli::args::{AccountAction, AccountArgs};
use crate::error::{ReadinessError, Result};
use crate::state::Settings;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandContext, CommandResult};

/// The account command implementation.
pub struct AccountCommand {
    context: CommandContext,
    args: AccountArgs,
}

impl AccountCommand {
    pub fn new(context: &CommandContext, args: AccountArgs) -> Self {
        Self {
            context: context.clone(),
            args,
        }
    }

    /// Run with `directory` answering verification lookups.
    pub fn run_with(
        &self,
        directory: &dyn AccountDirectory,
        ui: &mut dyn UserInterface,
    ) -> Result<CommandResult> {
        let path = self.context.settings_file()?;
        let mut settings = Settings::load(&path)?;

        match &self.args.action {
            AccountAction::Show => {
                if self.context.json {
                    let value = json!({
                        "username": settings.username(),
                        "verified_at": settings.verified_at,
                    });
                    ui.emit(&serde_json::to_string_pretty(&value).map_err(anyhow::Error::from)?);
                    return Ok(CommandResult::success());
                }
                match settings.username() {
                    Some(username) => {
                        ui.success(&format!("Connected as {}", username));
                        if let Some(at) = settings.verified_at {
                            ui.show_detail(&format!("Verified {}", at.format("%Y-%m-%d %H:%M UTC")));
                        }
                    }
                    None => {
                        ui.warning("No WordPress.org account connected");
                        ui.show_hint("Run `wpready account verify <USERNAME>` to connect one.");
                    }
                }
                Ok(CommandResult::success())
            }
            AccountAction::Verify { username } => {
                let username = match verify_account_identity(directory, username) {
                    Ok(username) => username,
                    Err(e @ ReadinessError::AccountVerificationFailed { .. }) => {
                        ui.error(&e.to_string());
                        return Ok(CommandResult::failure(1));
                    }
                    Err(e) => return Err(e),
                };
                settings.set_username(&username, Utc::now());
                settings.save(&path)?;
                tracing::debug!("Saved account to {}", path.display());
                ui.success(&format!("Connected as {}", username));
                Ok(CommandResult::success())
            }
            AccountAction::Forget => {
                if settings.username().is_none() {
                    ui.message("No WordPress.org account connected");
                    return Ok(CommandResult::success());
                }
                settings.forget_username();
                settings.save(&path)?;
                ui.success("Forgot the WordPress.org account");
                Ok(CommandResult::success())
            }
        }
    }
}

impl Command for AccountCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match &self.args.action {
            AccountAction::Verify { .. } => {
                let directory = ProfileDirectory::new()?;
                self.run_with(&directory, ui)
            }
            // Only verification needs the network
            _ => self.run_with(&NoLookups, ui),
        }
    }
}

struct NoLookups;

impl AccountDirectory for NoLookups {
    fn exists(&self, _username: &str) -> anyhow::Result<bool> {
        anyhow::bail!("account lookups are not available here")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use std::path::Path;
    use tempfile::TempDir;

    struct KnownUsers(&'static [&'static str]);

    impl AccountDirectory for KnownUsers {
        fn exists(&self, username: &str) -> anyhow::Result<bool> {
            Ok(self.0.contains(&username))
        }
    }

    fn command(settings: &Path, action: AccountAction) -> AccountCommand {
        let mut context = CommandContext::new("/srv/wp");
        context.settings_path = Some(settings.to_path_buf());
        AccountCommand::new(&context, AccountArgs { action })
    }

    #[test]
    fn verify_saves_username() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        let mut ui = MockUI::new();

        let result = command(
            &path,
            AccountAction::Verify {
                username: " matt ".to_string(),
            },
        )
        .run_with(&KnownUsers(&["matt"]), &mut ui)
        .unwrap();

        assert!(result.success);
        assert!(ui.has_success("Connected as matt"));
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.username(), Some("matt"));
        assert!(settings.verified_at.is_some());
    }

    #[test]
    fn unknown_user_is_not_saved() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        let mut ui = MockUI::new();

        let result = command(
            &path,
            AccountAction::Verify {
                username: "nobody".to_string(),
            },
        )
        .run_with(&KnownUsers(&["matt"]), &mut ui)
        .unwrap();

        assert_eq!(result.exit_code, 1);
        assert!(ui.has_error("not found"));
        assert!(!path.exists());
    }

    #[test]
    fn show_without_account_hints_at_verify() {
        let temp = TempDir::new().unwrap();
        let mut ui = MockUI::new();
        command(&temp.path().join("settings.yml"), AccountAction::Show)
            .run_with(&NoLookups, &mut ui)
            .unwrap();
        assert!(ui.has_warning("No WordPress.org account"));
        assert_eq!(ui.hints().len(), 1);
    }

    #[test]
    fn forget_clears_username() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("settings.yml");
        let mut settings = Settings::default();
        settings.set_username("matt", Utc::now());
        settings.save(&path).unwrap();

        let mut ui = MockUI::new();
        command(&path, AccountAction::Forget)
            .run_with(&NoLookups, &mut ui)
            .unwrap();

        assert!(ui.has_success("Forgot"));
        assert_eq!(Settings::load(&path).unwrap().username(), None);
    }
}
