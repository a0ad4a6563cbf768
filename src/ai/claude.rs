//! Claude API integration.
//!
//! Implements the AIProvider trait for the Anthropic messages API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{AIError, AIProvider, Completion, CompletionRequest, ProviderKind, Role, ToolCall, Usage};

const MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Claude API provider.
pub struct ClaudeProvider {
    client: Client,
    api_key: String,
    model: String,
}

impl ClaudeProvider {
    /// Create a new Claude provider.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: ProviderKind::Anthropic.default_model().to_string(),
        }
    }

    /// Create with a specific model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn build_request(&self, request: &CompletionRequest) -> ClaudeRequest {
        ClaudeRequest {
            model: self.model.clone(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: request.system.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| Message {
                    role: match m.role {
                        Role::User => "user",
                        Role::Assistant => "assistant",
                    }
                    .to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            tools: request
                .tools
                .iter()
                .map(|tool| Tool {
                    name: tool.name,
                    description: tool.description,
                    input_schema: tool.parameters.clone(),
                })
                .collect(),
        }
    }
}

#[async_trait]
impl AIProvider for ClaudeProvider {
    async fn complete(&self, request: &CompletionRequest) -> anyhow::Result<Completion> {
        let body = self.build_request(request);

        let response = self
            .client
            .post(MESSAGES_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AIError::ApiError(format!("anthropic ({status}): {body}")).into());
        }

        let response: ClaudeResponse = response.json().await?;
        parse_response(response)
    }

    fn name(&self) -> &str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.model
    }
}

fn parse_response(response: ClaudeResponse) -> anyhow::Result<Completion> {
    let mut text = String::new();
    let mut tool_calls = Vec::new();

    for block in response.content {
        match block.kind.as_str() {
            "tool_use" => tool_calls.push(ToolCall {
                id: block.id.unwrap_or_default(),
                name: block.name.unwrap_or_default(),
                arguments: block.input.unwrap_or_default(),
            }),
            _ => text.push_str(block.text.as_deref().unwrap_or_default()),
        }
    }

    if text.is_empty() && tool_calls.is_empty() {
        return Err(AIError::NoResponse.into());
    }

    let usage = response
        .usage
        .map(|u| Usage { prompt_tokens: u.input_tokens, completion_tokens: u.output_tokens })
        .unwrap_or_default();

    Ok(Completion { text, usage, tool_calls })
}

/// Claude API request structure.
#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
}

/// Tool definition in a Claude request.
#[derive(Debug, Serialize)]
struct Tool {
    name: &'static str,
    description: &'static str,
    input_schema: serde_json::Value,
}

/// Message in a Claude request.
#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Claude API response structure.
#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: Option<ClaudeUsage>,
}

/// Content block in a Claude response.
#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    input: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct ClaudeUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    #[test]
    fn test_system_is_top_level() {
        let provider = ClaudeProvider::new("k").with_model("claude-3-haiku-20240307");
        let request = CompletionRequest::prompt("hello").with_system("You are a startup coach.");

        let body = serde_json::to_value(provider.build_request(&request)).unwrap();
        assert_eq!(body["model"], "claude-3-haiku-20240307");
        assert_eq!(body["system"], "You are a startup coach.");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_no_system_field_when_absent() {
        let provider = ClaudeProvider::new("k");
        let request = CompletionRequest {
            system: None,
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 100,
            temperature: 0.0,
            tools: Vec::new(),
        };
        let body = serde_json::to_value(provider.build_request(&request)).unwrap();
        assert!(body.get("system").is_none());
        assert!(body.get("tools").is_none());
    }

    #[test]
    fn test_tools_use_input_schema() {
        let provider = ClaudeProvider::new("k");
        let request = CompletionRequest::prompt("save it").with_tools(crate::ai::chat_tools());

        let body = serde_json::to_value(provider.build_request(&request)).unwrap();
        assert_eq!(body["tools"][0]["name"], "createOrUpdateFile");
        assert_eq!(body["tools"][0]["input_schema"]["required"][1], "content");
    }

    #[test]
    fn test_parse_tool_use_block() {
        let json = r##"{
            "content": [
                {"type": "text", "text": "Saving your plan."},
                {"type": "tool_use", "id": "toolu_1", "name": "createOrUpdateFile",
                 "input": {"path": "plan.md", "content": "# Plan"}}
            ]
        }"##;
        let completion = parse_response(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(completion.text, "Saving your plan.");
        assert_eq!(completion.tool_calls.len(), 1);
        assert_eq!(completion.tool_calls[0].id, "toolu_1");
        assert_eq!(completion.tool_calls[0].arguments["content"], "# Plan");
    }

    #[test]
    fn test_parse_response() {
        let json = r#"{
            "content": [{"type": "text", "text": "Interview "}, {"type": "text", "text": "ten customers."}],
            "usage": {"input_tokens": 12, "output_tokens": 5}
        }"#;
        let completion = parse_response(serde_json::from_str(json).unwrap()).unwrap();
        assert_eq!(completion.text, "Interview ten customers.");
        assert_eq!(completion.usage.prompt_tokens, 12);
        assert_eq!(completion.usage.completion_tokens, 5);
    }

    #[test]
    fn test_parse_empty_response() {
        let response: ClaudeResponse = serde_json::from_str(r#"{"content": []}"#).unwrap();
        assert!(parse_response(response).is_err());
    }
}
