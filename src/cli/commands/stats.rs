//! scoop stats - Posterior statistics per flavor

use clap::Args;

use crate::app::AppContext;
use crate::cli::commands::recommend::ScopeArg;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, format_counts, robot_ok};
use crate::config::ScopeKind;
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    /// User whose flavors to summarize with `--scope personal`
    #[arg(long)]
    pub user: Option<String>,

    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

pub fn run(ctx: &AppContext, args: &StatsArgs) -> Result<()> {
    let user = ctx.user(args.user.as_deref());
    let recommender = ctx.recommender()?;
    let scope = recommender.scope_for(args.scope.map(ScopeKind::from), &user);
    let stats = recommender.stats(&scope)?;

    if ctx.robot_mode {
        let payload = serde_json::json!({
            "scope": scope,
            "outcomes": recommender.scale().outcomes(),
            "flavors": stats,
        });
        return emit_robot(&robot_ok(payload));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Flavor stats")
        .kv("Outcomes", &recommender.scale().outcomes().to_string())
        .kv("Flavors", &stats.len().to_string())
        .blank();
    for flavor in &stats {
        layout
            .section(&flavor.name)
            .kv("Ratings", &flavor.observations.to_string())
            .kv("Mean rating", &format!("{:.2}", flavor.expected_value))
            .kv("Counts", &format_counts(flavor.counts.as_slice()))
            .blank();
    }
    emit_human(layout);
    Ok(())
}
