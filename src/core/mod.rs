//! Core types and functionality for Startup CLI.
//!
//! The markdown extractor and questionnaire engine are pure and do no I/O.
//! The remaining modules cover configuration, history and file writes.

mod config;
mod extract;
mod files;
mod format;
mod goal;
mod history;
mod questionnaire;

pub use config::{AiConfig, Config, GeneralConfig, GoalsConfig, ModelsConfig, LOCAL_CONFIG_FILE};
pub use extract::{extract_section, is_heading};
pub use files::{
    append_to_file, create_or_update_file, resolve_in_project, write_file_atomic, FileError,
};
pub use format::{format_llm_response, slugify, truncate_preview, WRAP_WIDTH};
pub use goal::{completed_customer_interviews, Goal, INTERVIEWS_DIR};
pub use history::{command_log, log_command, ConversationHistory, Message, Role, STATE_DIR};
pub use questionnaire::{
    results_file_name, AnswerMap, LoadError, Part, Questionnaire, QuestionnaireResults,
    QuestionnaireSession, SessionState, QUESTIONNAIRE_OVERRIDE,
};
