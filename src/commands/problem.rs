//! `/problem`: define the problem and get AI feedback on it.
//!
//! The definition lives in `problem/problem.md`. When that file exists its
//! first section is analysed; otherwise the statement is taken from the
//! command line or asked for, and the file is created. Every analysis is
//! appended to the file so the history of feedback stays in one place.

use std::fs;
use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use minijinja::context;

use super::commit_generated;
use crate::ai::PromptTemplate;
use crate::app::AppContext;
use crate::core::{append_to_file, create_or_update_file, extract_section, format_llm_response, truncate_preview};
use crate::ui::Prompter;

/// Problem definition file, relative to the project root.
pub const PROBLEM_FILE: &str = "problem/problem.md";

const PREVIEW_CHARS: usize = 200;

/// Document written when the problem is first defined.
pub fn initial_problem_document(statement: &str, date: NaiveDate) -> String {
    format!(
        "# Problem Definition\n\n## Problem Statement\n{statement}\n\n## Analysis Date\n{}\n\n---\n\n",
        date.format("%Y-%m-%d")
    )
}

/// Section appended after each analysis.
pub fn analysis_section(analysis: &str, generated_at: &str) -> String {
    format!("\n## AI Analysis and Feedback\n\n{analysis}\n\n---\n\n*Analysis generated on {generated_at}*\n")
}

pub(crate) async fn run(statement: Option<&str>, ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<()> {
    println!("\n🔍 Problem Definition Analysis");
    println!("{}", "─".repeat(50));

    let file = ctx.path(PROBLEM_FILE);
    let problem = if file.is_file() {
        println!("📄 Found existing problem file. Analyzing current problem definition...");
        if statement.is_some() {
            println!("{}", ctx.theme.dim(format!("Ignoring inline text; edit {PROBLEM_FILE} to change the problem.")));
        }

        let content = fs::read_to_string(&file).with_context(|| format!("Failed to read {}", file.display()))?;
        let problem = extract_section(&content);
        if problem.is_empty() {
            println!(
                "{}",
                ctx.theme.warning(
                    "⚠️  Could not extract problem description from existing file. Please ensure your markdown file has at least one heading with content."
                )
            );
            return Ok(());
        }
        println!("📋 Current problem: {}", truncate_preview(&problem, PREVIEW_CHARS));
        problem
    } else {
        let problem = match statement.map(str::trim).filter(|s| !s.is_empty()) {
            Some(text) => text.to_string(),
            None => ui.input_required("What problem is your startup solving?", "Please describe the problem")?,
        };

        println!("📝 Creating your problem definition...");
        let document = initial_problem_document(&problem, Local::now().date_naive());
        create_or_update_file(&ctx.working_dir, Path::new(PROBLEM_FILE), &document)?;
        println!("📄 Problem saved to: {PROBLEM_FILE}");
        println!("📋 Your problem: {}", truncate_preview(&problem, PREVIEW_CHARS));
        problem
    };

    println!("🤖 Getting AI feedback on your problem definition...");
    let prompt = ctx
        .prompts()?
        .render(PromptTemplate::ProblemDescription, context! { problem_description => problem.trim() })?;
    let analysis = ctx.generate_document(prompt).await?;

    println!("\n✅ Analysis Results:\n");
    println!("{}", format_llm_response(&analysis));

    let generated_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let path = append_to_file(&ctx.working_dir, Path::new(PROBLEM_FILE), &analysis_section(&analysis, &generated_at))?;
    println!("\n📄 Analysis also saved to: {PROBLEM_FILE}");

    commit_generated(ctx, &[path], "Update problem definition analysis", "problem definition");

    println!("{}", "─".repeat(50));
    println!("📋 Next Steps:");
    println!("  1. Review the analysis and action items above");
    println!("  2. Complete the recommended tasks to validate your problem");
    println!("  3. Update your problem definition in {PROBLEM_FILE}");
    println!("  4. Re-run /problem to get fresh analysis after improvements");
    Ok(())
}
