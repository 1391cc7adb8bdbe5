//! `tidepool check` command implementation.

use std::path::PathBuf;

use clap::Args as ClapArgs;
use color_eyre::eyre::{Result, WrapErr};
use tidepool::{Program, logging};

/// Arguments for the check command.
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Markup file to check.
    pub markup: PathBuf,
}

/// Builds the markup and prints a summary of the resulting interface.
pub fn run(args: &Args) -> Result<()> {
    logging::init_tracing("warn");

    let mut program = Program::new();
    program
        .load_file(&args.markup)
        .wrap_err_with(|| format!("{} is not a valid interface", args.markup.display()))?;

    let names: Vec<&str> = program.roots().iter().map(|root| root.type_name()).collect();
    println!(
        "{}: {} root(s), {} widget(s) [{}]",
        args.markup.display(),
        program.roots().len(),
        program.widget_count(),
        names.join(", ")
    );
    Ok(())
}
