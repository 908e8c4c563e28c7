//! scoop show - Show one flavor's pooled counts

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, format_counts, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Flavor name
    pub flavor: String,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let flavor = ctx.recommender()?.flavor(args.flavor.trim())?;

    if ctx.robot_mode {
        let payload = serde_json::json!({
            "flavor": flavor,
            "observations": flavor.counts.observations(),
            "mean_rating": flavor.counts.mean_value(),
        });
        return emit_robot(&robot_ok(payload));
    }

    let mut layout = HumanLayout::new();
    layout
        .title(&flavor.name)
        .kv("Description", &flavor.description)
        .kv("Counts", &format_counts(flavor.counts.as_slice()))
        .kv("Ratings", &flavor.counts.observations().to_string())
        .kv("Mean rating", &format!("{:.2}", flavor.counts.mean_value()));
    emit_human(layout);
    Ok(())
}
