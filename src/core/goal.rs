//! Goal progress tracking.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Directory holding completed customer interview notes.
pub const INTERVIEWS_DIR: &str = "customer-discovery/interviews";

/// A countable goal such as "Customer interviews: 4 of 15".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub description: String,
    pub target: u32,
    pub completed: u32,
}

impl Goal {
    pub fn new(description: impl Into<String>, target: u32, completed: u32) -> Self {
        Self { description: description.into(), target, completed }
    }

    /// Rounded completion percentage.
    ///
    /// A zero target counts as done. Over-achievement is not clamped, so a
    /// goal of 3 with 6 completed reports 200.
    pub fn percentage(&self) -> u32 {
        if self.target == 0 {
            return 100;
        }
        (f64::from(self.completed) / f64::from(self.target) * 100.0).round() as u32
    }
}

/// Count interview notes (`.md` / `.txt`) under `customer-discovery/interviews`.
///
/// A missing or unreadable directory counts as zero.
pub fn completed_customer_interviews(root: &Path) -> u32 {
    let dir = root.join(INTERVIEWS_DIR);
    let Ok(entries) = std::fs::read_dir(&dir) else {
        return 0;
    };

    let count = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == "md" || ext == "txt")
        })
        .count();

    u32::try_from(count).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_percentage_rounds() {
        assert_eq!(Goal::new("Interviews", 15, 0).percentage(), 0);
        assert_eq!(Goal::new("Interviews", 15, 4).percentage(), 27);
        assert_eq!(Goal::new("Co-founders", 3, 1).percentage(), 33);
        assert_eq!(Goal::new("Co-founders", 3, 2).percentage(), 67);
        assert_eq!(Goal::new("Interviews", 15, 15).percentage(), 100);
    }

    #[test]
    fn test_percentage_zero_target() {
        assert_eq!(Goal::new("Nothing", 0, 0).percentage(), 100);
    }

    #[test]
    fn test_percentage_not_clamped() {
        assert_eq!(Goal::new("Co-founders", 3, 6).percentage(), 200);
    }

    #[test]
    fn test_interviews_missing_dir() {
        let temp = TempDir::new().unwrap();
        assert_eq!(completed_customer_interviews(temp.path()), 0);
    }

    #[test]
    fn test_interviews_counts_notes_only() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join(INTERVIEWS_DIR);
        fs::create_dir_all(dir.join("nested.md")).unwrap();
        fs::write(dir.join("alice.md"), "notes").unwrap();
        fs::write(dir.join("bob.txt"), "notes").unwrap();
        fs::write(dir.join("recording.mp3"), "").unwrap();
        fs::write(dir.join("README"), "").unwrap();

        assert_eq!(completed_customer_interviews(temp.path()), 2);
    }
}
