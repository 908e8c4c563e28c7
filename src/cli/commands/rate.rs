//! scoop rate - Record a rating for a flavor

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, format_counts, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RateArgs {
    /// Flavor name
    pub flavor: String,

    /// Score; rounded and clamped onto the rating scale
    #[arg(allow_negative_numbers = true)]
    pub score: f64,

    /// Description stored with a flavor rated for the first time
    #[arg(long)]
    pub description: Option<String>,

    /// User giving the rating
    #[arg(long)]
    pub user: Option<String>,
}

pub fn run(ctx: &AppContext, args: &RateArgs) -> Result<()> {
    let user = ctx.user(args.user.as_deref());
    let recommender = ctx.recommender()?;
    let counts = recommender.rate(
        &user,
        &args.flavor,
        args.description.as_deref(),
        args.score,
    )?;
    let outcome = recommender.scale().coerce(args.score);

    if ctx.robot_mode {
        let payload = serde_json::json!({
            "user": user,
            "flavor": args.flavor.trim(),
            "outcome": outcome,
            "counts": counts,
        });
        return emit_robot(&robot_ok(payload));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Rating saved")
        .kv("Flavor", args.flavor.trim())
        .kv("Outcome", &outcome.to_string());
    match &counts {
        Some(counts) => {
            layout
                .kv("Counts", &format_counts(counts.as_slice()))
                .kv("Mean rating", &format!("{:.2}", counts.mean_value()));
        }
        None => {
            layout.kv("Note", "kept in history only; pass --user to train recommendations");
        }
    }
    emit_human(layout);
    Ok(())
}
