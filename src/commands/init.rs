//! `/init`: set up a new startup project in the working directory.

use std::fs;

use anyhow::Context;

use super::{commit_generated, customer_segment, update_env_content};
use crate::app::AppContext;
use crate::core::write_file_atomic;
use crate::ui::Prompter;

const GITIGNORE: &str = "\
# Secrets
.env
.env.local
.env.*.local

# Startup CLI session state
.startup/

# Dependencies and build outputs
node_modules/
dist/
build/
target/

# IDE
.vscode/
.idea/
*.swp
*.swo

# OS
.DS_Store
Thumbs.db

# Logs
logs
*.log
";

/// README for a freshly initialised project.
pub(crate) fn readme(startup_name: &str) -> String {
    format!(
        "# {startup_name}

Welcome to {startup_name}! This project was initialized with Startup CLI.

## Getting Started

This is your lean startup project. Use the Startup CLI to build your customer segments, validate your ideas, and iterate quickly.

## Next Steps

1. Define your customer segments with `startup build customer-segment`
2. Validate your assumptions
3. Build your MVP
4. Iterate based on feedback

---

*Generated with Startup CLI*
"
    )
}

pub(crate) async fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<()> {
    println!("\n🚀 Welcome to Startup CLI!");
    println!("Let's set up your lean startup project...\n");

    let provider = ctx.config.ai.provider;
    let startup_name = ui.input_required("What is your startup name?", "Startup name cannot be empty")?;
    let api_key =
        ui.password_required(&format!("Enter your {} API key:", provider.display_name()), "API key cannot be empty")?;

    let readme_path = ctx.path("README.md");
    write_file_atomic(&readme_path, &readme(&startup_name))?;
    println!("📝 Created README.md");

    let env_path = ctx.path(".env");
    let existing_env = if env_path.exists() {
        fs::read_to_string(&env_path).with_context(|| format!("Failed to read {}", env_path.display()))?
    } else {
        String::new()
    };
    let model = ctx.config.active_model().to_string();
    write_file_atomic(&env_path, &update_env_content(&existing_env, provider, &api_key, &model))?;
    std::env::set_var(provider.api_key_env_var(), &api_key);
    ctx.reset_provider();
    println!("🔐 Created .env file");

    let gitignore_path = ctx.path(".gitignore");
    write_file_atomic(&gitignore_path, GITIGNORE)?;
    println!("📋 Created .gitignore");

    let config_path = ctx.config.save_local(&ctx.working_dir)?;
    println!("⚙️  Created .startup.toml");

    init_repository(ctx);
    commit_generated(
        ctx,
        &[readme_path, gitignore_path, config_path],
        &format!("Initial commit: Setup {startup_name} with Startup CLI"),
        "initial files",
    );

    println!("\n✅ Project initialized successfully!");

    if ui.confirm("Would you like to run the customer-segment command now?", true)? {
        customer_segment::run(ctx, ui).await?;
    }
    Ok(())
}

#[cfg(feature = "git")]
fn init_repository(ctx: &AppContext) {
    match crate::git::GitRepository::init_or_open(&ctx.working_dir) {
        Ok((_, true)) => println!("📦 Initialized git repository"),
        Ok((_, false)) => tracing::debug!("Reusing existing git repository"),
        Err(e) => {
            tracing::warn!("git init failed: {e}");
            println!("⚠️  Git repository could not be initialized");
        }
    }
}

#[cfg(not(feature = "git"))]
fn init_repository(_ctx: &AppContext) {
    tracing::debug!("Built without git support, skipping repository setup");
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;
    use crate::core::Config;
    use crate::ui::ScriptedPrompter;

    #[test]
    fn test_readme_mentions_name() {
        let readme = readme("Acme Robotics");
        assert!(readme.starts_with("# Acme Robotics\n"));
        assert!(readme.contains("Welcome to Acme Robotics!"));
    }

    #[test]
    fn test_gitignore_hides_secrets_and_state() {
        assert!(GITIGNORE.lines().any(|l| l == ".env"));
        assert!(GITIGNORE.lines().any(|l| l == ".startup/"));
    }

    #[tokio::test]
    #[serial]
    async fn test_init_writes_project_files() {
        let temp = TempDir::new().unwrap();
        let mut ctx = AppContext::new(temp.path().to_path_buf(), Config::default());
        let mut ui = ScriptedPrompter::new(["Acme", "sk-test-1234567890", "n"]);

        run(&mut ctx, &mut ui).await.unwrap();

        for file in [".env", ".gitignore", ".startup.toml", "README.md"] {
            assert!(temp.path().join(file).exists(), "missing {file}");
        }
        let env = fs::read_to_string(temp.path().join(".env")).unwrap();
        assert!(env.contains("OPENAI_API_KEY=sk-test-1234567890"));
        assert!(temp.path().join(".git").exists() || !cfg!(feature = "git"));

        std::env::remove_var("OPENAI_API_KEY");
    }
}
