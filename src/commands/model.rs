//! `/model`: choose the AI provider and store its key in `.env`.

use std::fs;

use anyhow::Context;

use crate::ai::ProviderKind;
use crate::app::AppContext;
use crate::core::write_file_atomic;
use crate::ui::Prompter;

/// Rewrite `.env` content for a newly selected provider.
///
/// Drops every existing `AI_PROVIDER`, `*_API_KEY` and `*_MODEL` line for
/// the known providers, keeps everything else, then appends the new
/// provider, key and model.
pub fn update_env_content(existing: &str, provider: ProviderKind, api_key: &str, model: &str) -> String {
    let managed: Vec<String> = std::iter::once("AI_PROVIDER=".to_string())
        .chain(ProviderKind::ALL.iter().flat_map(|kind| {
            [format!("{}=", kind.api_key_env_var()), format!("{}=", kind.model_env_var())]
        }))
        .collect();

    let kept: Vec<&str> =
        existing.lines().filter(|line| !managed.iter().any(|prefix| line.starts_with(prefix.as_str()))).collect();

    let mut content = kept.join("\n").trim().to_string();
    if !content.is_empty() {
        content.push('\n');
    }
    content.push_str(&format!(
        "AI_PROVIDER={}\n{}={api_key}\n{}={model}\n",
        provider.as_str(),
        provider.api_key_env_var(),
        provider.model_env_var()
    ));
    content
}

pub(crate) fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<()> {
    println!("\n🤖 Model Provider Configuration");
    println!("{}", "─".repeat(50));

    let current = ctx.config.ai.provider;
    println!("📋 Current provider: {}", ctx.theme.success(current.display_name()));
    println!("🔧 Model: {}\n", ctx.theme.accent(ctx.config.active_model()));

    let choices: Vec<String> = ProviderKind::ALL
        .iter()
        .map(|kind| format!("{} ({})", kind.display_name(), ctx.config.ai.models.get(*kind)))
        .collect();
    let provider = ProviderKind::ALL[ui.select("Choose your AI provider:", &choices)?];

    let api_key = match std::env::var(provider.api_key_env_var()).ok().filter(|k| !k.trim().is_empty()) {
        Some(existing) if ui.confirm(&format!("Use existing {} API key?", provider.display_name()), true)? => existing,
        _ => {
            println!("\n🔑 {} API Key Required", provider.display_name());
            println!("Get your API key from: {}\n", ctx.theme.command(provider.key_url()));
            ui.password_required(&format!("Enter your {} API key:", provider.display_name()), "API key cannot be empty")?
        }
    };

    let model = ctx.config.ai.models.get(provider).to_string();
    let env_path = ctx.path(".env");
    let existing = if env_path.exists() {
        fs::read_to_string(&env_path).with_context(|| format!("Failed to read {}", env_path.display()))?
    } else {
        String::new()
    };
    write_file_atomic(&env_path, &update_env_content(&existing, provider, &api_key, &model))?;

    std::env::set_var("AI_PROVIDER", provider.as_str());
    std::env::set_var(provider.api_key_env_var(), &api_key);
    std::env::set_var(provider.model_env_var(), &model);
    ctx.config.ai.provider = provider;
    ctx.reset_provider();
    tracing::debug!(provider = provider.as_str(), %model, "Switched AI provider");

    println!("\n✅ Successfully configured {} as your AI provider!", provider.display_name());
    println!("🔧 Model: {model}");
    println!("{}", "─".repeat(50));
    Ok(())
}

#[cfg(test)]
mod tests {
    use serial_test::serial;
    use tempfile::TempDir;

    use super::*;
    use crate::core::Config;
    use crate::ui::ScriptedPrompter;

    #[test]
    fn test_update_empty_env() {
        let content = update_env_content("", ProviderKind::Anthropic, "sk-ant-123", "claude-3-sonnet-20240229");
        assert_eq!(
            content,
            "AI_PROVIDER=anthropic\nANTHROPIC_API_KEY=sk-ant-123\nANTHROPIC_MODEL=claude-3-sonnet-20240229\n"
        );
    }

    #[test]
    fn test_update_replaces_managed_lines_only() {
        let existing = "DATABASE_URL=postgres://x\nAI_PROVIDER=openai\nOPENAI_API_KEY=sk-old\nOPENAI_MODEL=gpt-4\n# comment\n\n";
        let content = update_env_content(existing, ProviderKind::Mistral, "mk-1234567890", "mistral-medium");
        assert_eq!(
            content,
            "DATABASE_URL=postgres://x\n# comment\nAI_PROVIDER=mistral\nMISTRAL_API_KEY=mk-1234567890\nMISTRAL_MODEL=mistral-medium\n"
        );
    }

    #[test]
    fn test_update_is_idempotent() {
        let once = update_env_content("FOO=1\n", ProviderKind::OpenAI, "sk-1234567890", "gpt-3.5-turbo");
        let twice = update_env_content(&once, ProviderKind::OpenAI, "sk-1234567890", "gpt-3.5-turbo");
        assert_eq!(once, twice);
    }

    #[test]
    #[serial]
    fn test_run_writes_env_and_switches_provider() {
        std::env::remove_var("MISTRAL_API_KEY");
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".env"), "OPENAI_API_KEY=sk-old\nOTHER=1\n").unwrap();
        let mut ctx = AppContext::new(temp.path().to_path_buf(), Config::default());
        let mut ui = ScriptedPrompter::new(["3", "mk-secret-key-123"]);

        run(&mut ctx, &mut ui).unwrap();

        assert_eq!(ctx.config.ai.provider, ProviderKind::Mistral);
        let env = std::fs::read_to_string(temp.path().join(".env")).unwrap();
        assert_eq!(env, "OTHER=1\nAI_PROVIDER=mistral\nMISTRAL_API_KEY=mk-secret-key-123\nMISTRAL_MODEL=mistral-medium\n");
        assert_eq!(std::env::var("MISTRAL_API_KEY").unwrap(), "mk-secret-key-123");

        std::env::remove_var("MISTRAL_API_KEY");
        std::env::remove_var("MISTRAL_MODEL");
        std::env::remove_var("AI_PROVIDER");
    }
}
