//! `/build`: menu of startup-building steps.

use super::{customer_segment, interview, market_analysis, problem_analysis, BuildStep};
use crate::app::AppContext;
use crate::ui::Prompter;

/// Run `step`, or ask which step to run.
pub(crate) async fn run(step: Option<BuildStep>, ctx: &mut AppContext, ui: &mut dyn Prompter) -> anyhow::Result<()> {
    let step = match step {
        Some(step) => step,
        None => choose_step(ui)?,
    };
    tracing::debug!(step = step.name(), "Running build step");

    match step {
        BuildStep::CustomerSegment => {
            customer_segment::run(ctx, ui).await?;
        }
        BuildStep::ProblemAnalysis => {
            problem_analysis::run(ctx, ui).await?;
        }
        BuildStep::ProblemInterview => {
            interview::run(ctx, ui).await?;
        }
        BuildStep::MarketAnalysis => {
            market_analysis::run(ctx, ui).await?;
        }
        BuildStep::ValueProposition | BuildStep::BusinessModel | BuildStep::GoToMarket => coming_soon(step),
    }
    Ok(())
}

fn choose_step(ui: &mut dyn Prompter) -> anyhow::Result<BuildStep> {
    println!("\n🚀 Startup Builder");
    let labels: Vec<String> = BuildStep::ALL.iter().map(|step| step.label().to_string()).collect();
    let index = ui.select("What would you like to build?", &labels)?;
    Ok(BuildStep::ALL[index])
}

fn coming_soon(step: BuildStep) {
    println!("\n🚧 {}", step.label());
    println!("Coming soon! This step will help you {}.", step.description().to_lowercase());
}
