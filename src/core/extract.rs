//! Markdown section extraction.
//!
//! Pulls the prose of the first heading that has content out of a markdown
//! document. Used to recover the problem statement from `problem/problem.md`.
//!
//! Once a section has produced its first content line, the next heading of
//! *any* level ends it. Headings seen before any content restart tracking
//! under the newer heading.

use once_cell::sync::Lazy;
use regex::Regex;

/// ATX heading: 1-6 `#`, at least one space, then title text.
static HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{1,6}\s+.+").expect("valid regex"));

/// Extract the content of the first markdown section that has any.
///
/// Lines before the first heading are ignored, as are blank lines and
/// horizontal rules. Captured lines are trimmed and joined with a single
/// space, so multi-line paragraphs come back flattened onto one line.
///
/// Returns an empty string when no heading with content exists.
///
/// ```
/// use startup_cli::core::extract_section;
///
/// let doc = "## Original Problem Statement\nWe lose customers at onboarding.\n## Analysis Date\n2025-01-01";
/// assert_eq!(extract_section(doc), "We lose customers at onboarding.");
/// ```
pub fn extract_section(document: &str) -> String {
    let mut captured: Vec<&str> = Vec::new();
    let mut tracking = false;

    for line in document.lines() {
        if is_heading(line) {
            if !captured.is_empty() {
                break;
            }
            // No content yet: the newer heading takes over.
            tracking = true;
            continue;
        }

        if !tracking {
            continue;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() || is_horizontal_rule(trimmed) {
            continue;
        }

        captured.push(trimmed);
    }

    captured.join(" ").trim().to_string()
}

/// Whether the line is an ATX heading.
pub fn is_heading(line: &str) -> bool {
    HEADING.is_match(line)
}

/// Three or more dashes and nothing else.
fn is_horizontal_rule(trimmed: &str) -> bool {
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-')
}
