//! scoop add - Register a new flavor

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Flavor name
    pub name: String,

    /// Short description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Owner of the new flavor
    #[arg(long)]
    pub user: Option<String>,
}

pub fn run(ctx: &AppContext, args: &AddArgs) -> Result<()> {
    let user = ctx.user(args.user.as_deref());
    let recommender = ctx.recommender()?;
    recommender.add_flavor(&user, &args.name, &args.description)?;

    if ctx.robot_mode {
        let payload = serde_json::json!({
            "user": user,
            "flavor": args.name.trim(),
            "added": true,
        });
        return emit_robot(&robot_ok(payload));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Flavor added")
        .kv("Flavor", args.name.trim())
        .kv("Owner", &user);
    emit_human(layout);
    Ok(())
}
