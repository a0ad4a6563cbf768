//! Sequential questionnaire engine.
//!
//! A [`Questionnaire`] is static data: a topic and ordered parts, each with
//! ordered questions. A [`QuestionnaireSession`] walks a user through it one
//! answer at a time, recording answers per part header in presentation order.
//!
//! The engine does no I/O. Loading the definition and persisting the results
//! document are left to the caller.

use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Built-in co-founder alignment questionnaire.
const BUILTIN_QUESTIONNAIRE: &str = include_str!("../../assets/cofounder-questionnaire.json");

/// Project-local override for the questionnaire definition.
pub const QUESTIONNAIRE_OVERRIDE: &str = "cofounder-questionnaire.json";

/// Errors raised while loading a questionnaire definition.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Failed to read questionnaire {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("Invalid questionnaire definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Questionnaire has no parts")]
    NoParts,

    #[error("Questionnaire part '{0}' has no questions")]
    EmptyPart(String),
}

/// A questionnaire definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    /// What the questionnaire is about
    pub topic: String,

    /// Ordered groups of questions
    pub parts: Vec<Part>,
}

/// A named group of sequential questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    /// Header shown before the part's questions
    pub header: String,

    /// Questions in presentation order
    pub questions: Vec<String>,
}

impl Part {
    /// Create a part from a header and its questions.
    pub fn new<I, S>(header: impl Into<String>, questions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { header: header.into(), questions: questions.into_iter().map(Into::into).collect() }
    }
}

impl Questionnaire {
    /// Create a questionnaire from a topic and parts.
    pub fn new(topic: impl Into<String>, parts: Vec<Part>) -> Self {
        Self { topic: topic.into(), parts }
    }

    /// Parse and validate a JSON definition.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let questionnaire: Self = serde_json::from_str(json)?;
        questionnaire.validate()?;
        Ok(questionnaire)
    }

    /// Load a definition from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&json)
    }

    /// The definition shipped with the binary.
    pub fn builtin() -> Result<Self, LoadError> {
        Self::from_json(BUILTIN_QUESTIONNAIRE)
    }

    /// Load the project override if present, otherwise the built-in definition.
    pub fn for_project(root: &Path) -> Result<Self, LoadError> {
        let override_path = root.join(QUESTIONNAIRE_OVERRIDE);
        if override_path.exists() {
            tracing::debug!(path = %override_path.display(), "Using project questionnaire");
            Self::load(&override_path)
        } else {
            Self::builtin()
        }
    }

    /// Check the definition is usable: at least one part, no empty parts.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.parts.is_empty() {
            return Err(LoadError::NoParts);
        }
        if let Some(part) = self.parts.iter().find(|p| p.questions.is_empty()) {
            return Err(LoadError::EmptyPart(part.header.clone()));
        }
        Ok(())
    }

    /// Total number of questions across all parts.
    pub fn total_questions(&self) -> usize {
        self.parts.iter().map(|p| p.questions.len()).sum()
    }
}

/// Lifecycle of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Started, no answer submitted yet
    NotStarted,
    /// At least one answer recorded
    InProgress,
    /// Every question answered
    Complete,
}

/// Answers keyed by part header, in the order parts were first answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerMap {
    entries: Vec<(String, Vec<String>)>,
}

impl AnswerMap {
    /// Answers recorded for a part header.
    pub fn get(&self, header: &str) -> Option<&[String]> {
        self.entries.iter().find(|(h, _)| h == header).map(|(_, answers)| answers.as_slice())
    }

    /// Append an answer under a header, creating the list on first use.
    pub fn push(&mut self, header: &str, answer: String) {
        match self.entries.iter_mut().find(|(h, _)| h == header) {
            Some((_, answers)) => answers.push(answer),
            None => self.entries.push((header.to_string(), vec![answer])),
        }
    }

    /// Iterate headers with their answers.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(h, a)| (h.as_str(), a.as_slice()))
    }

    /// Number of part headers with answers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been answered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of answers across every part.
    pub fn total_answers(&self) -> usize {
        self.entries.iter().map(|(_, a)| a.len()).sum()
    }
}

impl Serialize for AnswerMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (header, answers) in &self.entries {
            map.serialize_entry(header, answers)?;
        }
        map.end()
    }
}

/// The document produced when a questionnaire is finished.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionnaireResults {
    /// Questionnaire topic
    pub topic: String,

    /// ISO-8601 timestamp of when the results were produced
    pub completed_at: String,

    /// Answers keyed by part header
    pub answers: AnswerMap,
}

impl QuestionnaireResults {
    /// Pretty JSON (two-space indent).
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// File name for results written on the given date.
pub fn results_file_name(at: DateTime<Utc>) -> String {
    format!("cofounder-questionnaire-{}.json", at.format("%Y-%m-%d"))
}

/// Progress through one questionnaire.
#[derive(Debug, Clone)]
pub struct QuestionnaireSession<'q> {
    questionnaire: &'q Questionnaire,
    part_index: usize,
    question_index: usize,
    answers: AnswerMap,
    complete: bool,
}

impl<'q> QuestionnaireSession<'q> {
    /// Start at the first question of the first part.
    pub fn start(questionnaire: &'q Questionnaire) -> Result<Self, LoadError> {
        questionnaire.validate()?;
        Ok(Self {
            questionnaire,
            part_index: 0,
            question_index: 0,
            answers: AnswerMap::default(),
            complete: false,
        })
    }

    /// The questionnaire being answered.
    pub fn questionnaire(&self) -> &'q Questionnaire {
        self.questionnaire
    }

    /// Zero-based (part, question) position.
    pub fn position(&self) -> (usize, usize) {
        (self.part_index, self.question_index)
    }

    /// The question awaiting an answer, if any.
    pub fn current_question(&self) -> Option<&'q str> {
        if self.complete {
            return None;
        }
        self.current_part()?.questions.get(self.question_index).map(String::as_str)
    }

    /// Header of the part being answered, if any.
    pub fn current_part_header(&self) -> Option<&'q str> {
        if self.complete {
            return None;
        }
        self.current_part().map(|p| p.header.as_str())
    }

    fn current_part(&self) -> Option<&'q Part> {
        self.questionnaire.parts.get(self.part_index)
    }

    /// Record an answer for the current question and advance.
    ///
    /// Returns `false` without changing anything when the session is already
    /// complete. Answer content is not validated.
    pub fn submit_answer(&mut self, answer: impl Into<String>) -> bool {
        if self.complete {
            tracing::debug!("Ignoring answer submitted to a completed questionnaire");
            return false;
        }
        let Some(part) = self.current_part() else {
            return false;
        };

        self.answers.push(&part.header, answer.into());

        self.question_index += 1;
        if self.question_index >= part.questions.len() {
            self.question_index = 0;
            self.part_index += 1;
            if self.part_index >= self.questionnaire.parts.len() {
                self.complete = true;
            }
        }

        true
    }

    /// Whether the current question is the final one.
    pub fn is_last_question(&self) -> bool {
        let parts = &self.questionnaire.parts;
        if self.complete || self.part_index + 1 != parts.len() {
            return false;
        }
        self.question_index + 1 == parts[self.part_index].questions.len()
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        if self.complete {
            SessionState::Complete
        } else if self.answers.is_empty() {
            SessionState::NotStarted
        } else {
            SessionState::InProgress
        }
    }

    /// Answers recorded so far.
    pub fn answers(&self) -> &AnswerMap {
        &self.answers
    }

    /// Number of answers recorded so far.
    pub fn answered_count(&self) -> usize {
        self.answers.total_answers()
    }

    /// Results document stamped with the current time.
    pub fn serialize_results(&self) -> QuestionnaireResults {
        self.results_at(Utc::now())
    }

    /// Results document stamped with the given time.
    pub fn results_at(&self, at: DateTime<Utc>) -> QuestionnaireResults {
        QuestionnaireResults {
            topic: self.questionnaire.topic.clone(),
            completed_at: at.to_rfc3339_opts(SecondsFormat::Millis, true),
            answers: self.answers.clone(),
        }
    }
}
