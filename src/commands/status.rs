//! `/status`: stage, goal progress and AI readiness.

use crate::ai::validate_model_config;
use crate::app::AppContext;
use crate::core::{completed_customer_interviews, Goal};
use crate::ui::{StatusReport, CURRENT_STAGE};

/// Collect the status panel for the current project.
pub fn status_report(ctx: &AppContext) -> StatusReport {
    let goals_config = &ctx.config.goals;
    let goals = vec![
        Goal::new(
            "Interview potential customers",
            goals_config.customer_interviews_target,
            completed_customer_interviews(&ctx.working_dir),
        ),
        Goal::new("Find a co-founder", goals_config.cofounder_target, goals_config.cofounder_completed),
    ];

    StatusReport {
        stage: CURRENT_STAGE.to_string(),
        goals,
        ai: validate_model_config(&ctx.config, |key| std::env::var(key).ok()),
        tokens_sent: ctx.tokens.sent,
        tokens_received: ctx.tokens.received,
    }
}

pub(crate) fn run(ctx: &AppContext) {
    println!();
    status_report(ctx).print(&ctx.theme);
}
