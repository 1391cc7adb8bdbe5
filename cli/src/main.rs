//! `tidepool` command line entry point.

mod commands;
mod host;

use std::sync::atomic::{AtomicBool, Ordering};

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use commands::{check, run};

/// Set once Ctrl+C was pressed.
static CANCELLED: AtomicBool = AtomicBool::new(false);

fn set_cancelled() {
    CANCELLED.store(true, Ordering::SeqCst);
}

/// Whether Ctrl+C was pressed.
pub fn is_cancelled() -> bool {
    CANCELLED.load(Ordering::SeqCst)
}

/// Render Tidepool markup.
#[derive(Parser, Debug)]
#[command(name = "tidepool", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a markup file to PNG, optionally reloading it on change.
    Run(run::Args),

    /// Build a markup file and report problems without rendering.
    Check(check::Args),
}

fn main() -> Result<()> {
    color_eyre::config::HookBuilder::default()
        .display_location_section(false)
        .display_env_section(false)
        .install()?;

    let cli = Cli::parse();
    ctrlc::set_handler(set_cancelled)?;

    match cli.command {
        Commands::Run(args) => run::run(args),
        Commands::Check(args) => check::run(&args),
    }
}
