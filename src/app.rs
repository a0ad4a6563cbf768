//! Application state shared by every command.
//!
//! `AppContext` is created once per run and passed explicitly to command
//! handlers. It owns the working directory, configuration, conversation
//! history and session token counters, and hands out the configured LLM
//! provider.

use std::path::{Path, PathBuf};

use crate::ai::{build_provider, AIError, AIProvider, Completion, CompletionRequest, PromptLibrary, Usage};
use crate::core::{Config, ConversationHistory};
use crate::ui::Theme;

/// Tokens exchanged with the LLM during this session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenUsage {
    pub sent: u64,
    pub received: u64,
}

impl TokenUsage {
    pub fn record(&mut self, usage: &Usage) {
        self.sent += usage.prompt_tokens;
        self.received += usage.completion_tokens;
    }
}

/// Main application state.
pub struct AppContext {
    /// Project directory; every generated file lives under it
    pub working_dir: PathBuf,

    /// Application configuration
    pub config: Config,

    /// Output colors
    pub theme: Theme,

    /// Session token counters
    pub tokens: TokenUsage,

    /// Conversation history for free-text chat
    pub history: ConversationHistory,

    provider: Option<Box<dyn AIProvider>>,
}

impl AppContext {
    /// Create a context with an explicit configuration.
    pub fn new(working_dir: PathBuf, config: Config) -> Self {
        let history = ConversationHistory::open(&working_dir);
        Self {
            working_dir,
            config,
            theme: Theme::default(),
            tokens: TokenUsage::default(),
            history,
            provider: None,
        }
    }

    /// Create a context for `working_dir`, loading its configuration.
    ///
    /// A broken config file is reported and replaced by defaults. Environment
    /// overrides are applied on top.
    pub fn load(working_dir: PathBuf) -> Self {
        let mut config = Config::load(&working_dir).unwrap_or_else(|e| {
            tracing::warn!("Could not load config, using defaults: {e:#}");
            Config::default()
        });
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Self::new(working_dir, config)
    }

    /// Use a specific provider instead of building one from configuration.
    pub fn with_provider(mut self, provider: Box<dyn AIProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Drop the cached provider so the next request rebuilds it.
    pub fn reset_provider(&mut self) {
        self.provider = None;
    }

    /// The active provider, built on first use.
    pub fn provider(&mut self) -> Result<&dyn AIProvider, AIError> {
        let provider = match self.provider.take() {
            Some(provider) => provider,
            None => build_provider(&self.config)?,
        };
        Ok(&**self.provider.insert(provider))
    }

    /// Run a completion with configured limits and record token usage.
    ///
    /// Returns the whole completion so callers can act on tool calls.
    pub async fn complete(&mut self, request: CompletionRequest) -> anyhow::Result<Completion> {
        let request = request.with_limits(&self.config);
        let provider = self.provider()?;
        tracing::debug!(provider = provider.name(), model = provider.model(), "Sending completion request");

        let completion = provider.complete(&request).await?;
        self.tokens.record(&completion.usage);
        Ok(completion)
    }

    /// Generate a document from a single rendered prompt.
    ///
    /// Uses the larger document token limit instead of the chat limit.
    pub async fn generate_document(&mut self, prompt: String) -> anyhow::Result<String> {
        let mut request = CompletionRequest::prompt(prompt).with_limits(&self.config);
        request.max_tokens = self.config.ai.document_max_tokens;

        let provider = self.provider()?;
        let completion = provider.complete(&request).await?;
        self.tokens.record(&completion.usage);
        Ok(completion.text)
    }

    /// Prompt templates, including project overrides.
    pub fn prompts(&self) -> anyhow::Result<PromptLibrary> {
        PromptLibrary::for_project(&self.working_dir)
    }

    /// Resolve a project-relative path.
    pub fn path(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.working_dir.join(relative)
    }
}
