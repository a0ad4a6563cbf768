//! Text formatting for terminal output.

/// Maximum content width of a formatted line, excluding the indent.
pub const WRAP_WIDTH: usize = 70;

const INDENT: &str = "  ";

/// Indent and word-wrap an LLM response for the terminal.
///
/// Each line is trimmed and indented by two spaces. Lines longer than
/// [`WRAP_WIDTH`] characters are wrapped on whitespace; continuation lines
/// keep the indent. A single word wider than the limit gets a line of its
/// own. Blank lines are preserved as empty lines.
pub fn format_llm_response(response: &str) -> String {
    let mut out: Vec<String> = Vec::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push(String::new());
            continue;
        }

        if trimmed.chars().count() <= WRAP_WIDTH {
            out.push(format!("{INDENT}{trimmed}"));
            continue;
        }

        let mut current = String::new();
        let mut current_len = 0;
        for word in trimmed.split_whitespace() {
            let word_len = word.chars().count();
            if current_len > 0 && current_len + 1 + word_len > WRAP_WIDTH {
                out.push(format!("{INDENT}{current}"));
                current.clear();
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current.push_str(word);
            current_len += word_len;
        }
        if !current.is_empty() {
            out.push(format!("{INDENT}{current}"));
        }
    }

    out.join("\n")
}

/// Shorten `text` to at most `max_chars` characters, appending `...` when cut.
pub fn truncate_preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => format!("{}...", &text[..byte_index]),
        None => text.to_string(),
    }
}

/// Lowercase, alphanumeric words joined by single dashes.
pub fn slugify(s: &str) -> String {
    s.to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}
