//! Startup CLI - an AI co-pilot for lean startup founders.
//!
//! Without a command it starts an interactive session; with one it runs
//! that command once and exits.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use startup_cli::app::AppContext;
use startup_cli::commands::{self, help_text, parse_cli_command, Input};
use startup_cli::interactive;
use startup_cli::ui::TerminalPrompter;

/// AI co-pilot for lean startup founders
#[derive(Parser)]
#[command(name = "startup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Working directory (created if it does not exist)
    #[arg(short, long, value_name = "DIR")]
    directory: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Print shell completions and exit
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,

    /// Command to run once, e.g. `build customer-segment`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(io::stderr))
        .with(filter)
        .init();

    if let Some(shell) = cli.completions {
        cmd_completions(shell);
        return Ok(());
    }

    let working_dir = enter_directory(cli.directory.as_deref())?;
    load_env_file(&working_dir);

    if cli.command.is_empty() {
        return cmd_interactive(working_dir);
    }

    match parse_cli_command(&cli.command) {
        Input::Command(command) => cmd_direct(working_dir, &command),
        _ => {
            eprintln!("❌ Unknown command: {}", cli.command.join(" "));
            println!("{}", help_text());
            std::process::exit(1);
        }
    }
}

/// Resolve, create and switch to the working directory.
fn enter_directory(directory: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = directory {
        let expanded = shellexpand::tilde(dir);
        let path = PathBuf::from(expanded.as_ref());
        if !path.exists() {
            std::fs::create_dir_all(&path)
                .with_context(|| format!("Failed to create directory {}", path.display()))?;
            println!("📁 Created directory: {}", path.display());
        }
        std::env::set_current_dir(&path)
            .with_context(|| format!("Failed to change to directory {}", path.display()))?;
    }

    let cwd = std::env::current_dir().context("Failed to get current directory")?;
    tracing::debug!(dir = %cwd.display(), "Working directory");
    Ok(cwd)
}

/// Load `<dir>/.env` into the process environment if present.
fn load_env_file(dir: &Path) {
    let path = dir.join(".env");
    if !path.is_file() {
        return;
    }
    match dotenvy::from_path(&path) {
        Ok(()) => tracing::debug!(path = %path.display(), "Loaded environment file"),
        Err(e) => tracing::warn!("Could not load {}: {e}", path.display()),
    }
}

/// Run one command and exit.
fn cmd_direct(working_dir: PathBuf, command: &commands::Command) -> Result<()> {
    let mut ctx = AppContext::load(working_dir);
    let mut ui = TerminalPrompter::new();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { commands::execute(command, &mut ctx, &mut ui).await })?;
    Ok(())
}

/// Start an interactive session.
fn cmd_interactive(working_dir: PathBuf) -> Result<()> {
    interactive::install_interrupt_handler()?;

    let mut ctx = AppContext::load(working_dir);
    let mut ui = TerminalPrompter::new();

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async { interactive::run(&mut ctx, &mut ui).await })
}

/// Generate shell completions.
fn cmd_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "startup", &mut io::stdout());
}
