//! Workspace context for AI requests.
//!
//! Collects the project's notes (markdown, text and CSV files) so the LLM can
//! see what the founder has written so far.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extensions included in the context.
const CONTEXT_EXTENSIONS: &[&str] = &["md", "txt", "csv"];

/// Directories never descended into.
const SKIP_DIRS: &[&str] = &["node_modules", ".git", "dist", ".next", "build", "target", ".startup"];

/// A project file included in the context.
#[derive(Debug, Clone)]
pub struct ContextFile {
    /// Path relative to the project root
    pub path: PathBuf,
    pub content: String,
}

/// Workspace context for AI requests.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    /// Name of the project directory
    pub project_name: String,

    /// Project root
    pub root: PathBuf,

    /// Current date (YYYY-MM-DD)
    pub current_date: String,

    /// Files in path order
    pub files: Vec<ContextFile>,

    /// Whether files were left out to stay under the size limit
    pub truncated: bool,
}

impl WorkspaceContext {
    /// Gather context from `root`, stopping once `max_chars` of file content
    /// has been collected.
    pub fn gather(root: &Path, max_chars: usize) -> Self {
        let project_name =
            root.file_name().and_then(|n| n.to_str()).unwrap_or("startup").to_string();

        let mut files = Vec::new();
        let mut total = 0usize;
        let mut truncated = false;

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

        for entry in walker.filter_map(Result::ok) {
            if !entry.file_type().is_file() || !has_context_extension(entry.path()) {
                continue;
            }

            let content = match std::fs::read_to_string(entry.path()) {
                Ok(content) => content,
                Err(e) => {
                    tracing::warn!(path = %entry.path().display(), "Could not read file: {e}");
                    continue;
                }
            };

            let len = content.chars().count();
            if total + len > max_chars {
                truncated = true;
                break;
            }
            total += len;

            let path = entry.path().strip_prefix(root).unwrap_or(entry.path()).to_path_buf();
            files.push(ContextFile { path, content });
        }

        tracing::debug!(files = files.len(), chars = total, truncated, "Gathered workspace context");

        Self {
            project_name,
            root: root.to_path_buf(),
            current_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            files,
            truncated,
        }
    }

    /// Render the context as a prompt fragment.
    pub fn render(&self) -> String {
        let mut out = String::from("Here is the codebase context:\n\n");
        for file in &self.files {
            out.push_str(&format!("=== {} ===\n", file.path.display()));
            out.push_str(&file.content);
            out.push_str("\n\n");
        }
        if self.truncated {
            out.push_str("[Additional files omitted]\n");
        }
        out
    }

    /// Summarize context as a string (for debugging or logging).
    pub fn summarize(&self) -> String {
        format!("Project: {} ({} files)", self.project_name, self.files.len())
    }
}

fn is_skipped_dir(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry.file_name().to_str().is_some_and(|name| SKIP_DIRS.contains(&name))
}

fn has_context_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| CONTEXT_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}
