//! User input.
//!
//! Commands ask questions through the [`Prompter`] trait so flows can run
//! against the terminal or against scripted answers in tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

/// Errors raised while reading input.
#[derive(Debug, thiserror::Error)]
pub enum PromptError {
    /// Input stream closed (EOF or Ctrl+D).
    #[error("input closed")]
    Closed,

    #[error("failed to read input: {0}")]
    Io(#[from] io::Error),
}

/// Source of user answers.
pub trait Prompter {
    /// Read one line of input, trimmed.
    fn input(&mut self, message: &str) -> Result<String, PromptError>;

    /// Read a secret without echoing it.
    fn password(&mut self, message: &str) -> Result<String, PromptError>;

    /// Show a non-fatal problem with the last answer.
    fn notice(&mut self, message: &str) {
        println!("{} {message}", ">>".red());
    }

    /// Ask until a non-empty answer is given.
    fn input_required(&mut self, message: &str, error: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.input(message)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.notice(error);
        }
    }

    /// Ask until a non-empty secret is given.
    fn password_required(&mut self, message: &str, error: &str) -> Result<String, PromptError> {
        loop {
            let answer = self.password(message)?;
            if !answer.is_empty() {
                return Ok(answer);
            }
            self.notice(error);
        }
    }

    /// Yes/no question; an empty answer takes `default`.
    fn confirm(&mut self, message: &str, default: bool) -> Result<bool, PromptError> {
        let hint = if default { "(Y/n)" } else { "(y/N)" };
        loop {
            let answer = self.input(&format!("{message} {hint}"))?.to_lowercase();
            match answer.as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.notice("Please answer y or n"),
            }
        }
    }

    /// Pick one of `choices` by number; returns its index.
    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        println!("{}", message.bold());
        for (i, choice) in choices.iter().enumerate() {
            println!("  {}. {choice}", i + 1);
        }
        loop {
            let answer = self.input(&format!("Choose 1-{}", choices.len()))?;
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => self.notice(&format!("Enter a number between 1 and {}", choices.len())),
            }
        }
    }
}

/// Prompter backed by stdin/stdout.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        show_question(message)?;
        read_line()
    }

    fn password(&mut self, message: &str) -> Result<String, PromptError> {
        show_question(message)?;

        let term = console::Term::stdout();
        if !term.is_term() {
            return read_line();
        }
        match term.read_secure_line() {
            Ok(line) => Ok(line.trim().to_string()),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Err(PromptError::Closed),
            Err(e) => Err(e.into()),
        }
    }
}

fn show_question(message: &str) -> io::Result<()> {
    print!("{} {} ", "?".green(), message.bold());
    io::stdout().flush()
}

fn read_line() -> Result<String, PromptError> {
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Err(PromptError::Closed);
    }
    Ok(line.trim().to_string())
}

/// Prompter that replays canned answers.
///
/// Answers are consumed in order by every kind of question. Running out of
/// answers behaves like a closed input stream.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
    notices: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { answers: answers.into_iter().map(Into::into).collect(), ..Self::default() }
    }

    /// Every question asked, in order.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }

    /// Every notice shown, in order.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    /// Answers not yet consumed.
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, message: &str) -> Result<String, PromptError> {
        self.asked.push(message.to_string());
        self.answers.pop_front().map(|a| a.trim().to_string()).ok_or(PromptError::Closed)
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&mut self, message: &str) -> Result<String, PromptError> {
        self.next(message)
    }

    fn password(&mut self, message: &str) -> Result<String, PromptError> {
        self.next(message)
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn select(&mut self, message: &str, choices: &[String]) -> Result<usize, PromptError> {
        loop {
            let answer = self.next(message)?;
            if let Some(i) = choices.iter().position(|c| c == &answer) {
                return Ok(i);
            }
            match answer.parse::<usize>() {
                Ok(n) if (1..=choices.len()).contains(&n) => return Ok(n - 1),
                _ => self.notice(&format!("Enter a number between 1 and {}", choices.len())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_answers_in_order() {
        let mut prompter = ScriptedPrompter::new(["one", "  two  "]);
        assert_eq!(prompter.input("first?").unwrap(), "one");
        assert_eq!(prompter.password("secret?").unwrap(), "two");
        assert!(matches!(prompter.input("third?"), Err(PromptError::Closed)));
        assert_eq!(prompter.asked(), ["first?", "secret?", "third?"]);
    }

    #[test]
    fn test_input_required_reprompts() {
        let mut prompter = ScriptedPrompter::new(["", "   ", "Acme"]);
        let answer = prompter.input_required("Startup name?", "Please enter a name").unwrap();
        assert_eq!(answer, "Acme");
        assert_eq!(prompter.notices().len(), 2);
    }

    #[test]
    fn test_confirm() {
        let mut prompter = ScriptedPrompter::new(["", "n", "maybe", "YES"]);
        assert!(prompter.confirm("Continue?", true).unwrap());
        assert!(!prompter.confirm("Continue?", true).unwrap());
        assert!(prompter.confirm("Continue?", false).unwrap());
        assert_eq!(prompter.notices(), ["Please answer y or n"]);
    }

    #[test]
    fn test_select_by_number_or_label() {
        let choices = vec!["OpenAI".to_string(), "Anthropic".to_string(), "Mistral".to_string()];
        let mut prompter = ScriptedPrompter::new(["2", "Mistral", "9", "1"]);
        assert_eq!(prompter.select("Provider?", &choices).unwrap(), 1);
        assert_eq!(prompter.select("Provider?", &choices).unwrap(), 2);
        assert_eq!(prompter.select("Provider?", &choices).unwrap(), 0);
        assert_eq!(prompter.notices().len(), 1);
    }
}
