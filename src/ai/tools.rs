//! Tools the coach may call during chat.
//!
//! Providers advertise [`ToolDefinition`]s and hand back [`ToolCall`]s; the
//! calls are executed here, against the project directory.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::{json, Value};

use crate::core::{create_or_update_file, FileError};

/// Name of the file-writing tool.
pub const CREATE_OR_UPDATE_FILE: &str = "createOrUpdateFile";

/// A function the model may call, described by a JSON schema.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: Value,
}

/// A tool invocation requested by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolCall {
    /// Provider-assigned call id
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

impl ToolCall {
    pub fn new(name: impl Into<String>, arguments: Value) -> Self {
        Self { id: String::new(), name: name.into(), arguments }
    }
}

/// Errors from executing a tool call.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    Unknown(String),

    #[error("Invalid arguments for {tool}: {source}")]
    InvalidArguments { tool: String, source: serde_json::Error },

    #[error(transparent)]
    File(#[from] FileError),
}

#[derive(Debug, Deserialize)]
struct FileArgs {
    path: String,
    content: String,
}

/// Tools offered in free-text chat.
pub fn chat_tools() -> Vec<ToolDefinition> {
    vec![ToolDefinition {
        name: CREATE_OR_UPDATE_FILE,
        description: "Create or update a file with the given content",
        parameters: json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path of the file to create or update"
                },
                "content": {
                    "type": "string",
                    "description": "The content to create or update the file with"
                }
            },
            "required": ["path", "content"]
        }),
    }]
}

/// Execute a tool call inside `root`. Returns the file that was written.
pub fn run_tool_call(root: &Path, call: &ToolCall) -> Result<PathBuf, ToolError> {
    if call.name != CREATE_OR_UPDATE_FILE {
        return Err(ToolError::Unknown(call.name.clone()));
    }

    let args: FileArgs = serde_json::from_value(call.arguments.clone())
        .map_err(|source| ToolError::InvalidArguments { tool: call.name.clone(), source })?;

    tracing::debug!(tool = %call.name, path = %args.path, "Running tool call");
    Ok(create_or_update_file(root, Path::new(&args.path), &args.content)?)
}
