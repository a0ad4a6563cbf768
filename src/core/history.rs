//! Conversation history and command log.
//!
//! Both live under `.startup/` in the project directory:
//! - `history.json` holds the chat transcript sent back to the LLM as context
//! - `history.txt` is an append-only log of slash commands

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-project state directory.
pub const STATE_DIR: &str = ".startup";

const HISTORY_FILE: &str = "history.json";
const COMMAND_LOG_FILE: &str = "history.txt";

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// A single conversation message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct Transcript {
    messages: Vec<Message>,
}

/// Conversation history persisted as JSON.
#[derive(Debug)]
pub struct ConversationHistory {
    path: PathBuf,
    transcript: Transcript,
}

impl ConversationHistory {
    /// Open the history for a project directory.
    ///
    /// A missing file yields an empty history. An unreadable or corrupt file
    /// is logged and replaced by an empty history on the next save.
    pub fn open(project_dir: &Path) -> Self {
        Self::with_path(project_dir.join(STATE_DIR).join(HISTORY_FILE))
    }

    /// Open a history stored at a specific path.
    pub fn with_path(path: PathBuf) -> Self {
        let transcript = match Self::load(&path) {
            Ok(transcript) => transcript,
            Err(e) => {
                tracing::warn!("Could not read conversation history, starting fresh: {e:#}");
                Transcript::default()
            }
        };
        Self { path, transcript }
    }

    fn load(path: &Path) -> anyhow::Result<Transcript> {
        if !path.exists() {
            return Ok(Transcript::default());
        }
        let content = fs::read_to_string(path)?;
        let transcript = serde_json::from_str(&content)
            .with_context(|| format!("Invalid history file {}", path.display()))?;
        Ok(transcript)
    }

    /// Save to disk, creating `.startup/` if needed.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.transcript)?;
        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }

    /// Append a message and persist.
    pub fn add(&mut self, role: Role, content: impl Into<String>) -> anyhow::Result<()> {
        self.transcript.messages.push(Message::new(role, content));
        self.save()
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.transcript.messages
    }

    /// The last `n` messages, oldest first.
    pub fn recent(&self, n: usize) -> &[Message] {
        let messages = &self.transcript.messages;
        &messages[messages.len().saturating_sub(n)..]
    }

    /// Forget every message and delete the file.
    pub fn clear(&mut self) -> anyhow::Result<()> {
        self.transcript.messages.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.transcript.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transcript.messages.is_empty()
    }
}

/// Append `<timestamp> - <command>` to `.startup/history.txt`.
pub fn log_command(project_dir: &Path, command: &str) -> anyhow::Result<()> {
    let dir = project_dir.join(STATE_DIR);
    fs::create_dir_all(&dir)?;

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut file = OpenOptions::new().create(true).append(true).open(dir.join(COMMAND_LOG_FILE))?;
    writeln!(file, "{timestamp} - {command}")?;
    Ok(())
}

/// Logged command lines, oldest first.
pub fn command_log(project_dir: &Path) -> Vec<String> {
    fs::read_to_string(project_dir.join(STATE_DIR).join(COMMAND_LOG_FILE))
        .map(|content| {
            content.lines().filter(|l| !l.trim().is_empty()).map(String::from).collect()
        })
        .unwrap_or_default()
}
