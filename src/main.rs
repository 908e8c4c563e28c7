//! scoop - flavor recommendations by Thompson sampling
//!
//! Rate the flavors you try; scoop keeps a Dirichlet posterior per flavor and
//! samples from it to pick what to try next.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use scoop::Result;
use scoop::app::AppContext;
use scoop::cli::Cli;
use scoop::cli::output::{emit_robot, robot_error};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: error envelope on stdout
                if emit_robot(&robot_error(&e)).is_err() {
                    eprintln!("Error: {e}");
                }
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let ctx = AppContext::from_cli(cli)?;
    scoop::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli) {
    if cli.quiet {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_log_filter(cli.verbose)));
    let registry = tracing_subscriber::registry().with(env_filter);

    // stdout carries command output, so every log line goes to stderr.
    if cli.robot {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(cli.verbose > 0)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Directive used when `RUST_LOG` is unset. Without `-v` only scoop's own
/// info events (picks, ratings) and other crates' warnings show.
const fn default_log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn,scoop=info",
        1 => "info,scoop=debug",
        2 => "debug,scoop=trace",
        _ => "trace",
    }
}
