//! scoop recommend - Pick the next flavor by posterior sampling

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_robot, format_counts, robot_ok};
use crate::config::ScopeKind;
use crate::error::Result;
use crate::recommend::Source;

#[derive(Args, Debug, Default)]
pub struct RecommendArgs {
    /// User to recommend for
    #[arg(long)]
    pub user: Option<String>,

    /// Draw from your own flavors or everyone's
    #[arg(long, value_enum)]
    pub scope: Option<ScopeArg>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScopeArg {
    Personal,
    Community,
}

impl From<ScopeArg> for ScopeKind {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Personal => Self::Personal,
            ScopeArg::Community => Self::Community,
        }
    }
}

pub fn run(ctx: &AppContext, args: &RecommendArgs) -> Result<()> {
    let user = ctx.user(args.user.as_deref());
    let mut recommender = ctx.recommender()?;
    let scope = recommender.scope_for(args.scope.map(ScopeKind::from), &user);
    let pick = recommender.recommend(&scope)?;

    if ctx.robot_mode {
        return emit_robot(&robot_ok(&pick));
    }

    let mut layout = HumanLayout::new();
    layout
        .title("Try this flavor")
        .kv("Flavor", &pick.flavor.name)
        .kv("Description", &pick.flavor.description);
    match pick.source {
        Source::Bandit => {
            layout
                .kv("Sampled score", &format!("{:.2}", pick.score.unwrap_or_default()))
                .kv("Candidates", &pick.candidates.to_string())
                .kv("Counts", &format_counts(pick.flavor.counts.as_slice()));
        }
        Source::Catalog => {
            layout.kv("Source", "built-in catalog (no rated flavors yet)");
        }
    }
    emit_human(layout);
    Ok(())
}
