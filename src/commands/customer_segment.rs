//! `/build customer-segment`: generate a customer persona document.

use std::path::{Path, PathBuf};

use minijinja::context;
use once_cell::sync::Lazy;
use regex::Regex;

use super::commit_generated;
use crate::ai::PromptTemplate;
use crate::app::AppContext;
use crate::core::{create_or_update_file, slugify};
use crate::ui::Prompter;

/// Name used when the response names no persona.
const FALLBACK_PERSONA_NAME: &str = "Customer-Persona";

// Label and name stay on one line; a bare `Persona` label needs a colon.
static LABELLED_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b(?:(?i:persona name|name|meet)[ \t]*:?|(?i:persona)[ \t]*:)[ \t]*(?:(?i:meet)[ \t]+)?([A-Z][a-z]+[ \t]+[A-Z][a-z]+)",
    )
    .expect("persona name pattern is valid")
});

static TWO_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Z][a-z]+[ \t]+[A-Z][a-z]+)").expect("two word pattern is valid"));

/// Find the persona's name in a generated persona document.
///
/// Looks for a labelled `Name: First Last` (also `Persona Name`, `Persona:`,
/// `Meet`) on a single line, then for a capitalised pair on the first line.
pub fn extract_persona_name(persona: &str) -> String {
    let plain = persona.replace('*', "");

    if let Some(caps) = LABELLED_NAME.captures(&plain) {
        return normalize_spaces(&caps[1]);
    }

    let first_line = plain.lines().next().unwrap_or_default().trim_start_matches('#');
    TWO_WORDS
        .captures(first_line)
        .map(|caps| normalize_spaces(&caps[1]))
        .unwrap_or_else(|| FALLBACK_PERSONA_NAME.to_string())
}

fn normalize_spaces(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// File name for a persona document.
pub(crate) fn persona_file_name(name: &str) -> String {
    format!("customer-segment-{}.md", slugify(name))
}

/// Prompt for a customer definition and generate the persona file.
pub(crate) async fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<PathBuf> {
    println!("\n🎯 Let's build your customer segment!");
    println!("We'll create a detailed persona to guide your startup decisions.\n");

    let definition = ui.input_required(
        "Provide a high-level definition of your target customer:",
        "Please provide a customer definition",
    )?;
    let refinement = ui.input("Any additional refinements or specific details? (optional):")?;

    println!("\n🤖 Generating detailed customer persona...");
    let prompt = ctx.prompts()?.render(
        PromptTemplate::CustomerPersona,
        context! { high_level_definition => &definition, additional_refinement => &refinement },
    )?;
    let persona = ctx.generate_document(prompt).await?;

    let name = extract_persona_name(&persona);
    let file_name = persona_file_name(&name);
    let path = create_or_update_file(&ctx.working_dir, Path::new(&file_name), &persona)?;
    println!("📄 Created {file_name}");

    let message = if refinement.is_empty() {
        format!("Add customer segment: {definition}")
    } else {
        format!("Add customer segment: {definition} - {refinement}")
    };
    commit_generated(ctx, &[path.clone()], &message, "customer segment file");

    println!("\n✅ Customer segment created successfully!");
    println!("📖 Check out {file_name} to review {name}.");
    Ok(path)
}
