//! Model configuration checks.

use crate::core::Config;

/// Outcome of checking the AI configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelValidation {
    pub is_valid: bool,
    pub message: String,
    pub details: Option<String>,
}

impl ModelValidation {
    fn ok(message: impl Into<String>) -> Self {
        Self { is_valid: true, message: message.into(), details: None }
    }

    fn invalid(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self { is_valid: false, message: message.into(), details: Some(details.into()) }
    }
}

/// Minimum plausible API key length.
const MIN_KEY_LEN: usize = 10;

/// Check that the active provider has a usable key and model.
///
/// `lookup` reads environment variables; pass `|k| std::env::var(k).ok()`
/// for the process environment.
pub fn validate_model_config<F>(config: &Config, lookup: F) -> ModelValidation
where
    F: Fn(&str) -> Option<String>,
{
    let provider = config.ai.provider;
    let upper = provider.as_str().to_uppercase();

    let Some(api_key) = lookup(provider.api_key_env_var()).filter(|k| !k.is_empty()) else {
        return ModelValidation::invalid(
            "Missing API key",
            format!("{upper} API key not found. Run \"/model\" to configure your AI provider."),
        );
    };

    if api_key.len() < MIN_KEY_LEN {
        return ModelValidation::invalid(
            "Invalid API key format",
            format!("{upper} API key appears to be invalid. Run \"/model\" to reconfigure."),
        );
    }

    if config.active_model().trim().is_empty() {
        return ModelValidation::invalid(
            "No model specified",
            format!("No model specified for {provider}. Run \"/model\" to configure."),
        );
    }

    ModelValidation::ok("AI ready")
}
