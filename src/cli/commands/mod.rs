//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod add;
pub mod clear;
pub mod history;
pub mod rate;
pub mod recommend;
pub mod show;
pub mod stats;

use crate::app::AppContext;
use crate::error::Result;

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Recommend(args) => recommend::run(ctx, args),
        Commands::Rate(args) => rate::run(ctx, args),
        Commands::Add(args) => add::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::History(args) => history::run(ctx, args),
        Commands::Stats(args) => stats::run(ctx, args),
        Commands::Clear(args) => clear::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Recommend the next flavor to try
    Recommend(recommend::RecommendArgs),

    /// Rate a flavor on the outcome scale
    Rate(rate::RateArgs),

    /// Add a new flavor (signed-in users only)
    Add(add::AddArgs),

    /// Show one flavor's pooled counts
    Show(show::ShowArgs),

    /// List your past ratings
    History(history::HistoryArgs),

    /// Show posterior statistics for every flavor
    Stats(stats::StatsArgs),

    /// Delete your flavors and rating history
    Clear(clear::ClearArgs),
}
