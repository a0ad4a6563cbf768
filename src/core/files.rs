//! File writes confined to the project directory.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::Context;

/// Errors from project-confined writes.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("File path must be within the project directory: {}", .0.display())]
    OutsideProject(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },
}

/// Resolve `path` against `root`, rejecting anything that escapes it.
///
/// Resolution is lexical so the target does not need to exist yet.
pub fn resolve_in_project(root: &Path, path: &Path) -> Result<PathBuf, FileError> {
    let root = normalize(root);
    let resolved = normalize(&root.join(path));
    if resolved.starts_with(&root) {
        Ok(resolved)
    } else {
        Err(FileError::OutsideProject(path.to_path_buf()))
    }
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Create or overwrite a file inside the project, creating parent directories.
pub fn create_or_update_file(root: &Path, path: &Path, content: &str) -> Result<PathBuf, FileError> {
    let target = resolve_in_project(root, path)?;
    let io_err = |source| FileError::Io { path: target.clone(), source };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::write(&target, content).map_err(io_err)?;

    tracing::debug!(path = %target.display(), bytes = content.len(), "Wrote file");
    Ok(target)
}

/// Append to a file inside the project, creating it if missing.
pub fn append_to_file(root: &Path, path: &Path, content: &str) -> Result<PathBuf, FileError> {
    let target = resolve_in_project(root, path)?;
    let io_err = |source| FileError::Io { path: target.clone(), source };

    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(&target).map_err(io_err)?;
    file.write_all(content.as_bytes()).map_err(io_err)?;

    Ok(target)
}

/// Write a file atomically (write to temp, then rename).
pub fn write_file_atomic(path: &Path, content: &str) -> anyhow::Result<()> {
    let temp_path = path.with_extension("tmp");

    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write to {}", temp_path.display()))?;

    fs::rename(&temp_path, path).with_context(|| {
        format!("Failed to rename {} to {}", temp_path.display(), path.display())
    })?;

    Ok(())
}
