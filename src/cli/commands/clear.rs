//! scoop clear - Delete a user's flavors and history

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, robot_ok};
use crate::error::Result;

#[derive(Args, Debug, Default)]
pub struct ClearArgs {
    /// Whose data to delete
    #[arg(long)]
    pub user: Option<String>,
}

pub fn run(ctx: &AppContext, args: &ClearArgs) -> Result<()> {
    let user = ctx.user(args.user.as_deref());
    ctx.recommender()?.clear(&user)?;

    if ctx.robot_mode {
        let payload = serde_json::json!({
            "user": user,
            "cleared": true,
        });
        return emit_robot(&robot_ok(payload));
    }

    let mut layout = HumanLayout::new();
    layout.title("Data cleared").kv("User", &user);
    emit_human(layout);
    Ok(())
}
