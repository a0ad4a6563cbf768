//! Terminal colors.

use std::fmt::Display;

use crossterm::style::{Color, StyledContent, Stylize};

/// Colors used for console output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Headers and banners
    pub primary: Color,
    /// Command names, prompts
    pub secondary: Color,
    /// Highlights
    pub accent: Color,
    /// Descriptions, secondary info
    pub text_dim: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::Rgb { r: 99, g: 102, b: 241 },   // Indigo
            secondary: Color::Rgb { r: 16, g: 185, b: 129 }, // Emerald
            accent: Color::Rgb { r: 251, g: 146, b: 60 },    // Orange
            text_dim: Color::Rgb { r: 156, g: 163, b: 175 }, // Gray-400
            success: Color::Rgb { r: 34, g: 197, b: 94 },
            warning: Color::Rgb { r: 234, g: 179, b: 8 },
            error: Color::Rgb { r: 239, g: 68, b: 68 },
        }
    }
}

impl Theme {
    pub fn heading<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.primary).bold()
    }

    pub fn command<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.secondary)
    }

    pub fn accent<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.accent)
    }

    pub fn dim<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.text_dim)
    }

    pub fn success<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.success)
    }

    pub fn warning<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.warning)
    }

    pub fn error<D: Display>(&self, text: D) -> StyledContent<String> {
        text.to_string().with(self.error)
    }
}
