//! Slash commands.
//!
//! [`registry`] turns user input into a typed [`Command`]; [`execute`]
//! dispatches it to the handler modules below. Handlers print their own
//! progress and return errors for the caller to report.

mod build;
mod cofounder;
mod customer_segment;
mod init;
mod interview;
mod market_analysis;
mod model;
mod problem;
mod problem_analysis;
mod registry;
mod status;

pub use cofounder::ask_questionnaire;
pub use customer_segment::extract_persona_name;
pub use model::update_env_content;
pub use problem::{analysis_section, initial_problem_document, PROBLEM_FILE};
pub use registry::{
    command_names, commands_by_category, find_command, help_text, parse_cli_command, parse_input, BuildStep,
    Command, CommandCategory, CommandDefinition, Input, SubCommand, COMMANDS,
};
pub use status::status_report;

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::ui::Prompter;

/// What the caller should do after a command ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Run one command.
pub async fn execute(command: &Command, ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<Flow> {
    tracing::debug!(?command, "Executing command");

    match command {
        Command::Init => init::run(ctx, ui).await?,
        Command::Build(step) => build::run(*step, ctx, ui).await?,
        Command::Problem(statement) => problem::run(statement.as_deref(), ctx, ui).await?,
        Command::Cofounder => {
            cofounder::run(ctx, ui)?;
        }
        Command::Model => model::run(ctx, ui)?,
        Command::Status => status::run(ctx),
        Command::Clear => {
            ctx.history.clear()?;
            println!("🧹 Conversation history cleared");
        }
        Command::Help => println!("{}", help_text()),
        Command::Exit => {
            println!("👋 Goodbye!");
            return Ok(Flow::Exit);
        }
    }

    Ok(Flow::Continue)
}

/// Commit generated files when auto-commit is enabled.
///
/// A failed commit is reported and otherwise ignored.
pub(crate) fn commit_generated(ctx: &AppContext, paths: &[PathBuf], message: &str, what: &str) {
    if !ctx.config.general.auto_commit {
        tracing::debug!("Auto-commit disabled, leaving {what} uncommitted");
        return;
    }

    match commit_files(&ctx.working_dir, paths, message) {
        Ok(()) => println!("💾 Committed {what}"),
        Err(e) => {
            tracing::warn!("Commit failed: {e:#}");
            println!("{}", ctx.theme.warning("⚠️  Could not commit file (git may not be configured)"));
        }
    }
}

#[cfg(feature = "git")]
fn commit_files(dir: &Path, paths: &[PathBuf], message: &str) -> anyhow::Result<()> {
    let repo = crate::git::GitRepository::discover(dir)
        .ok_or_else(|| anyhow::anyhow!("{} is not inside a git repository", dir.display()))?;
    repo.commit_paths(paths, message)?;
    Ok(())
}

#[cfg(not(feature = "git"))]
fn commit_files(_dir: &Path, _paths: &[PathBuf], _message: &str) -> anyhow::Result<()> {
    anyhow::bail!("git support is not enabled in this build")
}

/// Milliseconds since the Unix epoch, used to name generated reports.
fn timestamp_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::core::Config;
    use crate::ui::ScriptedPrompter;

    #[tokio::test]
    async fn test_exit_stops_loop() {
        let temp = TempDir::new().unwrap();
        let mut ctx = AppContext::new(temp.path().to_path_buf(), Config::default());
        let mut ui = ScriptedPrompter::default();
        assert_eq!(execute(&Command::Exit, &mut ctx, &mut ui).await.unwrap(), Flow::Exit);
        assert_eq!(execute(&Command::Help, &mut ctx, &mut ui).await.unwrap(), Flow::Continue);
    }

    #[tokio::test]
    async fn test_clear_removes_history() {
        let temp = TempDir::new().unwrap();
        let mut ctx = AppContext::new(temp.path().to_path_buf(), Config::default());
        ctx.history.add(crate::core::Role::User, "hello").unwrap();
        assert!(temp.path().join(".startup/history.json").exists());

        let mut ui = ScriptedPrompter::default();
        execute(&Command::Clear, &mut ctx, &mut ui).await.unwrap();
        assert!(ctx.history.is_empty());
        assert!(!temp.path().join(".startup/history.json").exists());
    }

    #[test]
    fn test_commit_outside_repository_is_not_fatal() {
        let temp = TempDir::new().unwrap();
        let ctx = AppContext::new(temp.path().to_path_buf(), Config::default());
        let file = temp.path().join("notes.md");
        std::fs::write(&file, "notes").unwrap();
        commit_generated(&ctx, &[file], "Add notes", "notes");
    }
}
