//! `/build market-analysis`: size and describe the target market.

use std::path::{Path, PathBuf};

use minijinja::context;

use super::{commit_generated, timestamp_millis};
use crate::ai::PromptTemplate;
use crate::app::AppContext;
use crate::core::create_or_update_file;
use crate::ui::Prompter;

pub(crate) async fn run(ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<PathBuf> {
    println!("\n📊 Market Analysis");
    println!("Let's understand the market you're entering.\n");

    let product = ui.input_required("Describe your product or service:", "Please describe your product")?;
    let market = ui.input_required("What market or industry are you targeting?", "Please name a market")?;
    let additional_context = ui.input("Any additional context about your market? (optional):")?;

    let prompts = ctx.prompts()?;
    if let Some(path) = prompts.override_path(PromptTemplate::MarketAnalysis).filter(|p| p.is_file()) {
        println!("📝 Using custom prompt from {}", path.display());
    }

    println!("\n🤖 Analyzing market...");
    let prompt = prompts.render(
        PromptTemplate::MarketAnalysis,
        context! {
            product_description => &product,
            target_market => &market,
            additional_context => &additional_context,
        },
    )?;
    let analysis = ctx.generate_document(prompt).await?;

    let file_name = format!("market-analysis-{}.md", timestamp_millis());
    let path = create_or_update_file(&ctx.working_dir, Path::new(&file_name), &analysis)?;
    println!("📄 Created {file_name}");

    commit_generated(ctx, &[path.clone()], &format!("Add market analysis: {product} - {market}"), "market analysis");

    println!("\n✅ Market analysis complete!");
    Ok(path)
}
