//! Console user interface.
//!
//! Styled output, question prompts and the status panel. Everything here is
//! line-oriented text; there is no full-screen mode.

mod prompt;
mod status;
mod theme;

pub use prompt::{PromptError, Prompter, ScriptedPrompter, TerminalPrompter};
pub use status::{progress_bar, StatusReport, BAR_WIDTH, CURRENT_STAGE};
pub use theme::Theme;
