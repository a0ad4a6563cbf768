//! AI integration module.
//!
//! Chat completion against hosted LLM providers.
//!
//! ## Features
//!
//! - OpenAI, Anthropic and Mistral behind one [`AIProvider`] trait
//! - Prompt templates rendered with minijinja, overridable per project
//! - Workspace context gathered from the project's text files
//! - Model configuration checks for the status panel
//! - A file-writing tool the coach can call during chat

mod claude;
mod context;
mod openai;
mod prompts;
mod tools;
mod validation;

use std::fmt;
use std::str::FromStr;

pub use claude::ClaudeProvider;
pub use context::WorkspaceContext;
pub use openai::OpenAIProvider;
pub use prompts::{PromptLibrary, PromptTemplate};
pub use tools::{chat_tools, run_tool_call, ToolCall, ToolDefinition, ToolError, CREATE_OR_UPDATE_FILE};
pub use validation::{validate_model_config, ModelValidation};

pub use crate::core::Role;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Config;

/// Trait for AI providers.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Run a chat completion.
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<Completion>;

    /// Get the provider name.
    fn name(&self) -> &str;

    /// Model used for completions.
    fn model(&self) -> &str;
}

/// AI error types.
#[derive(Debug, thiserror::Error)]
pub enum AIError {
    #[error("{} API key not found. Run \"/model\" to configure your AI provider.", .0.display_name())]
    MissingApiKey(ProviderKind),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("No response from AI")]
    NoResponse,
}

/// One message in a chat request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: Role::Assistant, content: content.into() }
    }
}

/// A provider-neutral chat completion request.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub system: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Tools the model may call; empty for plain completions
    pub tools: Vec<ToolDefinition>,
}

impl CompletionRequest {
    /// A single user prompt with no system message.
    pub fn prompt(text: impl Into<String>) -> Self {
        Self {
            system: None,
            messages: vec![ChatMessage::user(text)],
            max_tokens: 500,
            temperature: 0.7,
            tools: Vec::new(),
        }
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Apply the token limit and temperature from configuration.
    pub fn with_limits(mut self, config: &Config) -> Self {
        self.max_tokens = config.ai.max_tokens;
        self.temperature = config.ai.temperature;
        self
    }
}

/// Token counts reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
}

/// A completion result.
///
/// `text` may be empty when the model only asked for tool calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    pub usage: Usage,
    pub tool_calls: Vec<ToolCall>,
}

/// Supported LLM providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[serde(rename = "openai")]
    OpenAI,
    Anthropic,
    Mistral,
}

impl ProviderKind {
    /// Every provider, in menu order.
    pub const ALL: [Self; 3] = [Self::OpenAI, Self::Anthropic, Self::Mistral];

    /// Configuration identifier.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenAI => "openai",
            Self::Anthropic => "anthropic",
            Self::Mistral => "mistral",
        }
    }

    pub const fn display_name(self) -> &'static str {
        match self {
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Mistral => "Mistral",
        }
    }

    pub const fn api_key_env_var(self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_API_KEY",
            Self::Anthropic => "ANTHROPIC_API_KEY",
            Self::Mistral => "MISTRAL_API_KEY",
        }
    }

    pub const fn model_env_var(self) -> &'static str {
        match self {
            Self::OpenAI => "OPENAI_MODEL",
            Self::Anthropic => "ANTHROPIC_MODEL",
            Self::Mistral => "MISTRAL_MODEL",
        }
    }

    pub const fn default_model(self) -> &'static str {
        match self {
            Self::OpenAI => "gpt-3.5-turbo",
            Self::Anthropic => "claude-3-sonnet-20240229",
            Self::Mistral => "mistral-medium",
        }
    }

    /// Where users can create an API key.
    pub const fn key_url(self) -> &'static str {
        match self {
            Self::OpenAI => "https://platform.openai.com/api-keys",
            Self::Anthropic => "https://console.anthropic.com",
            Self::Mistral => "https://console.mistral.ai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "mistral" => Ok(Self::Mistral),
            other => {
                Err(format!("Provider \"{other}\" is not supported. Use: openai, anthropic, or mistral"))
            }
        }
    }
}

/// Build the configured provider, reading its API key from the environment.
pub fn build_provider(config: &Config) -> Result<Box<dyn AIProvider>, AIError> {
    let kind = config.ai.provider;
    let api_key = std::env::var(kind.api_key_env_var())
        .ok()
        .filter(|k| !k.trim().is_empty())
        .ok_or(AIError::MissingApiKey(kind))?;

    Ok(provider_for(kind, api_key, config.active_model()))
}

/// Construct a provider from explicit settings.
pub fn provider_for(kind: ProviderKind, api_key: String, model: &str) -> Box<dyn AIProvider> {
    tracing::debug!(provider = %kind, model, "Creating AI provider");
    match kind {
        ProviderKind::OpenAI => Box::new(OpenAIProvider::new(api_key).with_model(model)),
        ProviderKind::Mistral => Box::new(OpenAIProvider::mistral(api_key).with_model(model)),
        ProviderKind::Anthropic => Box::new(ClaudeProvider::new(api_key).with_model(model)),
    }
}
