//! `/cofounder`: co-founder fit questionnaire.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::app::AppContext;
use crate::core::{create_or_update_file, results_file_name, Questionnaire, QuestionnaireSession};
use crate::ui::{Prompter, Theme};

/// Ask every question of `questionnaire` in order.
///
/// Each part's header is shown before its first question; questions are
/// numbered within their part. Empty answers are asked again.
pub fn ask_questionnaire<'q>(
    questionnaire: &'q Questionnaire,
    ui: &mut dyn Prompter,
    theme: &Theme,
) -> anyhow::Result<QuestionnaireSession<'q>> {
    let mut session = QuestionnaireSession::start(questionnaire)?;

    while let Some(question) = session.current_question() {
        let (_, index) = session.position();
        if index == 0 {
            if let Some(header) = session.current_part_header() {
                println!("\n{}", theme.heading(header));
            }
        }

        let answer = ui.input_required(&format!("{}. {question}", index + 1), "Please provide an answer")?;
        session.submit_answer(answer);
    }

    Ok(session)
}

pub(crate) fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<PathBuf> {
    let questionnaire = Questionnaire::for_project(&ctx.working_dir)?;

    println!("\n🤝 {}", ctx.theme.heading(&questionnaire.topic));
    println!(
        "{} questions in {} parts. Answer honestly; the results are for you and your future co-founder.",
        questionnaire.total_questions(),
        questionnaire.parts.len()
    );

    let session = ask_questionnaire(&questionnaire, ui, &ctx.theme)?;

    let now = Utc::now();
    let file_name = results_file_name(now);
    let json = session.results_at(now).to_json_pretty()?;
    let path = create_or_update_file(&ctx.working_dir, Path::new(&file_name), &json)?;

    println!("\n✅ Questionnaire complete! {} answers recorded.", session.answered_count());
    println!("📄 Results saved to {file_name}");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Part, SessionState};
    use crate::ui::ScriptedPrompter;

    fn sample() -> Questionnaire {
        Questionnaire::new(
            "Co-founder fit",
            vec![
                Part::new("Vision", ["Why this startup?", "Where in five years?"]),
                Part::new("Work style", ["Remote or office?"]),
            ],
        )
    }

    #[test]
    fn test_asks_every_question_in_order() {
        let questionnaire = sample();
        let mut ui = ScriptedPrompter::new(["Impact", "Profitable", "Remote"]);

        let session = ask_questionnaire(&questionnaire, &mut ui, &Theme::default()).unwrap();

        assert_eq!(session.state(), SessionState::Complete);
        assert_eq!(ui.asked(), ["1. Why this startup?", "2. Where in five years?", "1. Remote or office?"]);
        assert_eq!(session.answers().get("Vision").unwrap(), ["Impact", "Profitable"]);
        assert_eq!(session.answers().get("Work style").unwrap(), ["Remote"]);
    }

    #[test]
    fn test_empty_answers_are_asked_again() {
        let questionnaire = sample();
        let mut ui = ScriptedPrompter::new(["", "Impact", "Profitable", "Remote"]);

        let session = ask_questionnaire(&questionnaire, &mut ui, &Theme::default()).unwrap();

        assert_eq!(session.answered_count(), 3);
        assert_eq!(ui.notices(), ["Please provide an answer"]);
    }

    #[test]
    fn test_closed_input_aborts() {
        let questionnaire = sample();
        let mut ui = ScriptedPrompter::new(["Impact"]);
        assert!(ask_questionnaire(&questionnaire, &mut ui, &Theme::default()).is_err());
    }
}
