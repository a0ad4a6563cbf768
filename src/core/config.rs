//! Configuration management for Startup CLI.
//!
//! Handles loading and saving configuration from TOML files.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::ai::ProviderKind;

/// Project-local configuration file name.
pub const LOCAL_CONFIG_FILE: &str = ".startup.toml";

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// AI settings
    pub ai: AiConfig,

    /// Goal targets shown in the status panel
    pub goals: GoalsConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Commit generated files to git
    pub auto_commit: bool,
}

/// AI provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Active provider
    pub provider: ProviderKind,

    /// Model per provider
    pub models: ModelsConfig,

    /// Response token limit for chat
    pub max_tokens: u32,

    /// Response token limit for generated documents
    pub document_max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Number of past conversation messages sent with free-text chat
    pub history_messages: usize,

    /// Maximum characters of workspace files included as context
    pub context_max_chars: usize,
}

/// Model names for each provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelsConfig {
    pub openai: String,
    pub anthropic: String,
    pub mistral: String,
}

/// Goal targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoalsConfig {
    /// Customer interviews to complete
    pub customer_interviews_target: u32,

    /// Co-founders to align with
    pub cofounder_target: u32,

    /// Co-founders already aligned
    pub cofounder_completed: u32,
}

impl Config {
    /// Load configuration for a working directory.
    ///
    /// Looks for config in:
    /// 1. `.startup.toml` in `dir`
    /// 2. `~/.config/startup/config.toml`
    /// 3. Falls back to defaults
    pub fn load(dir: &Path) -> anyhow::Result<Self> {
        let local_config = dir.join(LOCAL_CONFIG_FILE);
        if local_config.exists() {
            return Self::load_from_file(&local_config);
        }

        if let Some(global_config) = Self::config_dir().map(|d| d.join("config.toml")) {
            if global_config.exists() {
                return Self::load_from_file(&global_config);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Apply `AI_PROVIDER` and `<PROVIDER>_MODEL` overrides.
    ///
    /// Takes a lookup function so callers can supply something other than
    /// the process environment.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("AI_PROVIDER") {
            match value.parse::<ProviderKind>() {
                Ok(kind) => self.ai.provider = kind,
                Err(e) => tracing::warn!("Ignoring AI_PROVIDER: {e}"),
            }
        }

        for kind in ProviderKind::ALL {
            if let Some(model) = lookup(kind.model_env_var()).filter(|m| !m.trim().is_empty()) {
                self.ai.models.set(kind, model);
            }
        }
    }

    /// Write this configuration as `.startup.toml` in `dir`.
    pub fn save_local(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let path = dir.join(LOCAL_CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Model configured for the active provider.
    pub fn active_model(&self) -> &str {
        self.ai.models.get(self.ai.provider)
    }

    /// Get the global config directory path.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("startup"))
    }
}

impl ModelsConfig {
    pub fn get(&self, kind: ProviderKind) -> &str {
        match kind {
            ProviderKind::OpenAI => &self.openai,
            ProviderKind::Anthropic => &self.anthropic,
            ProviderKind::Mistral => &self.mistral,
        }
    }

    pub fn set(&mut self, kind: ProviderKind, model: String) {
        match kind {
            ProviderKind::OpenAI => self.openai = model,
            ProviderKind::Anthropic => self.anthropic = model,
            ProviderKind::Mistral => self.mistral = model,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            ai: AiConfig::default(),
            goals: GoalsConfig::default(),
        }
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { auto_commit: true }
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::OpenAI,
            models: ModelsConfig::default(),
            max_tokens: 500,
            document_max_tokens: 1500,
            temperature: 0.7,
            history_messages: 20,
            context_max_chars: 100_000,
        }
    }
}

impl Default for ModelsConfig {
    fn default() -> Self {
        Self {
            openai: ProviderKind::OpenAI.default_model().to_string(),
            anthropic: ProviderKind::Anthropic.default_model().to_string(),
            mistral: ProviderKind::Mistral.default_model().to_string(),
        }
    }
}

impl Default for GoalsConfig {
    fn default() -> Self {
        Self { customer_interviews_target: 15, cofounder_target: 3, cofounder_completed: 1 }
    }
}
