//! Status panel rendering.

use crate::ai::ModelValidation;
use crate::core::Goal;

use super::Theme;

/// Width of goal progress bars, in cells.
pub const BAR_WIDTH: usize = 30;

/// Current lean-startup stage shown in the panel.
pub const CURRENT_STAGE: &str = "Finding product-market fit";

/// Render a bar of `width` cells filled to `percentage`.
///
/// Percentages above 100 fill the whole bar.
pub fn progress_bar(percentage: u32, width: usize) -> String {
    let clamped = percentage.min(100) as usize;
    let filled = (clamped * width + 50) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

/// Everything the status panel shows.
#[derive(Debug, Clone)]
pub struct StatusReport {
    pub stage: String,
    pub goals: Vec<Goal>,
    pub ai: ModelValidation,
    pub tokens_sent: u64,
    pub tokens_received: u64,
}

impl StatusReport {
    /// Render as plain lines, without color.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![format!("Your current stage: {}", self.stage)];

        for goal in &self.goals {
            lines.push("-".repeat(BAR_WIDTH + 20));
            lines.push(format!("Your goal: {}", goal.description));
            let pct = goal.percentage();
            lines.push(format!(
                "Progress: {} {pct}% ({}/{})",
                progress_bar(pct, BAR_WIDTH),
                goal.completed,
                goal.target
            ));
        }

        lines.push("─".repeat(BAR_WIDTH + 20));
        lines.push(format!("{}    {}", self.ai_line(), self.token_line()));
        lines
    }

    fn ai_line(&self) -> String {
        let icon = if self.ai.is_valid { "✔" } else { "✘" };
        match &self.ai.details {
            Some(details) => format!("{icon} {} - {details}", self.ai.message),
            None => format!("{icon} {}", self.ai.message),
        }
    }

    fn token_line(&self) -> String {
        format!("Tokens: {} sent / {} received", self.tokens_sent, self.tokens_received)
    }

    /// Print with colors.
    pub fn print(&self, theme: &Theme) {
        println!("{}", theme.heading(format!("Your current stage: {}", self.stage)));
        for goal in &self.goals {
            println!("{}", theme.dim("-".repeat(BAR_WIDTH + 20)));
            println!("Your goal: {}", theme.success(&goal.description));
            let pct = goal.percentage();
            println!(
                "Progress: {} {pct}% ({}/{})",
                theme.accent(progress_bar(pct, BAR_WIDTH)),
                goal.completed,
                goal.target
            );
        }
        println!("{}", theme.dim("─".repeat(BAR_WIDTH + 20)));

        let ai = if self.ai.is_valid { theme.success(self.ai_line()) } else { theme.error(self.ai_line()) };
        println!("{ai}    {}", theme.dim(self.token_line()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(valid: bool) -> StatusReport {
        StatusReport {
            stage: CURRENT_STAGE.to_string(),
            goals: vec![
                Goal::new("Interview potential customers", 15, 3),
                Goal::new("Find a co-founder", 3, 1),
            ],
            ai: ModelValidation {
                is_valid: valid,
                message: if valid { "AI ready".into() } else { "Missing API key".into() },
                details: (!valid).then(|| "OPENAI API key not found.".to_string()),
            },
            tokens_sent: 120,
            tokens_received: 45,
        }
    }

    #[test]
    fn test_progress_bar_width_is_fixed() {
        for pct in [0, 1, 33, 50, 99, 100, 250] {
            assert_eq!(progress_bar(pct, BAR_WIDTH).chars().count(), BAR_WIDTH, "pct {pct}");
        }
    }

    #[test]
    fn test_progress_bar_fill() {
        assert_eq!(progress_bar(0, 10), "░".repeat(10));
        assert_eq!(progress_bar(50, 10), format!("{}{}", "█".repeat(5), "░".repeat(5)));
        assert_eq!(progress_bar(100, 10), "█".repeat(10));
        assert_eq!(progress_bar(200, 10), "█".repeat(10));
    }

    #[test]
    fn test_lines_include_goals_and_tokens() {
        let lines = report(true).lines();
        assert_eq!(lines[0], "Your current stage: Finding product-market fit");
        assert!(lines.iter().any(|l| l == "Your goal: Interview potential customers"));
        assert!(lines.iter().any(|l| l.ends_with("20% (3/15)")));
        assert!(lines.iter().any(|l| l.ends_with("33% (1/3)")));
        assert!(lines.last().unwrap().contains("✔ AI ready"));
        assert!(lines.last().unwrap().contains("Tokens: 120 sent / 45 received"));
    }

    #[test]
    fn test_invalid_ai_shows_details() {
        let lines = report(false).lines();
        assert!(lines.last().unwrap().contains("✘ Missing API key - OPENAI API key not found."));
    }
}
