//! scoop history - List past ratings

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct HistoryArgs {
    /// Whose history to list
    #[arg(long)]
    pub user: Option<String>,

    /// Show at most this many entries
    #[arg(long)]
    pub limit: Option<usize>,
}

pub fn run(ctx: &AppContext, args: &HistoryArgs) -> Result<()> {
    let user = ctx.user(args.user.as_deref());
    let mut entries = ctx.recommender()?.history(&user)?;
    if let Some(limit) = args.limit {
        entries.truncate(limit);
    }

    if ctx.robot_mode {
        let payload = serde_json::json!({
            "user": user,
            "count": entries.len(),
            "entries": entries,
        });
        return emit_robot(&robot_ok(payload));
    }

    let mut layout = HumanLayout::new();
    layout.title(&format!("Rating history for {user}"));
    if entries.is_empty() {
        layout.bullet("no ratings yet");
    }
    for entry in &entries {
        layout.bullet(&format!(
            "{}  {:>2}  {}",
            entry.rated_at.format("%Y-%m-%d %H:%M"),
            entry.outcome,
            entry.flavor
        ));
    }
    emit_human(layout);
    Ok(())
}
