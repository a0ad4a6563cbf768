//! `/build problem-analysis`: rank the customer problems worth solving.

use std::path::{Path, PathBuf};

use minijinja::context;

use super::{commit_generated, timestamp_millis};
use crate::ai::PromptTemplate;
use crate::app::AppContext;
use crate::core::create_or_update_file;
use crate::ui::Prompter;

pub(crate) async fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<PathBuf> {
    println!("\n🔍 Problem Analysis");
    println!("Let's identify the top problems your customers face.\n");

    let product_idea = ui.input_required("What product or service are you building?", "Please describe your product")?;
    let target_customer = ui.input_required("Who is your target customer?", "Please describe your target customer")?;
    let initial_problems = ui.input_required(
        "What problems do you think your customers face? (comma-separated):",
        "Please list at least one problem",
    )?;
    let additional_context =
        ui.input("Any additional context about the market or customer pain points? (optional):")?;

    println!("\n🤖 Analyzing problems...");
    let prompt = ctx.prompts()?.render(
        PromptTemplate::ProblemAnalysis,
        context! {
            product_idea => &product_idea,
            target_customer => &target_customer,
            initial_problems => &initial_problems,
            additional_context => &additional_context,
        },
    )?;
    let analysis = ctx.generate_document(prompt).await?;

    let file_name = format!("problem-analysis-{}.md", timestamp_millis());
    let path = create_or_update_file(&ctx.working_dir, Path::new(&file_name), &analysis)?;
    println!("📄 Created {file_name}");

    commit_generated(
        ctx,
        &[path.clone()],
        &format!("Add problem analysis: {product_idea} - {target_customer}"),
        "problem analysis",
    );

    println!("\n✅ Problem analysis complete!");
    println!("📖 Review {file_name} and validate the top problems with real customers.");
    Ok(path)
}
