//! OpenAI API integration.
//!
//! Implements the AIProvider trait for the chat completions endpoint. Mistral
//! exposes the same wire format, so it is served by this provider with a
//! different base URL.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AIError, AIProvider, Completion, CompletionRequest, Role, ToolCall, Usage};

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// OpenAI-compatible chat completions provider.
pub struct OpenAIProvider {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    name: &'static str,
}

impl OpenAIProvider {
    /// Create an OpenAI provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: super::ProviderKind::OpenAI.default_model().to_string(),
            base_url: OPENAI_BASE_URL.to_string(),
            name: "openai",
        }
    }

    /// Create a Mistral provider.
    pub fn mistral(api_key: impl Into<String>) -> Self {
        Self {
            model: super::ProviderKind::Mistral.default_model().to_string(),
            base_url: MISTRAL_BASE_URL.to_string(),
            name: "mistral",
            ..Self::new(api_key)
        }
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request(&self, request: &CompletionRequest) -> OpenAIRequest {
        let mut messages = Vec::with_capacity(request.messages.len() + 1);
        if let Some(system) = &request.system {
            messages.push(WireMessage { role: "system".to_string(), content: system.clone() });
        }
        messages.extend(request.messages.iter().map(|m| WireMessage {
            role: match m.role {
                Role::User => "user",
                Role::Assistant => "assistant",
            }
            .to_string(),
            content: m.content.clone(),
        }));

        OpenAIRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(request.max_tokens),
            temperature: Some(request.temperature),
            tools: request
                .tools
                .iter()
                .map(|tool| WireTool {
                    kind: "function",
                    function: WireFunction {
                        name: tool.name,
                        description: tool.description,
                        parameters: tool.parameters.clone(),
                    },
                })
                .collect(),
        }
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<Completion> {
        let body = self.build_request(request);

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AIError::ApiError(format!("{} ({status}): {body}", self.name)).into());
        }

        let response: OpenAIResponse = response.json().await?;
        parse_response(response)
    }

    fn name(&self) -> &str {
        self.name
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn parse_response(response: OpenAIResponse) -> anyhow::Result<Completion> {
    let message = response.choices.into_iter().next().ok_or(AIError::NoResponse)?.message;

    let tool_calls: Vec<ToolCall> = message
        .tool_calls
        .into_iter()
        .map(|call| ToolCall {
            id: call.id,
            // Arguments arrive as a JSON-encoded string
            arguments: serde_json::from_str(&call.function.arguments)
                .unwrap_or(serde_json::Value::String(call.function.arguments)),
            name: call.function.name,
        })
        .collect();

    let text = match message.content {
        Some(text) => text,
        None if !tool_calls.is_empty() => String::new(),
        None => return Err(AIError::NoResponse.into()),
    };

    let usage = response
        .usage
        .map(|u| Usage { prompt_tokens: u.prompt_tokens, completion_tokens: u.completion_tokens })
        .unwrap_or_default();

    Ok(Completion { text, usage, tool_calls })
}

// Request/Response types

#[derive(Debug, Serialize)]
struct OpenAIRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: &'static str,
    description: &'static str,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireToolCall {
    #[serde(default)]
    id: String,
    function: WireToolFunction,
}

#[derive(Debug, Deserialize)]
struct WireToolFunction {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}
