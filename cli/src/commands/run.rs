//! `tidepool run` command implementation.

use std::path::PathBuf;

use clap::Args as ClapArgs;
use color_eyre::eyre::{Result, WrapErr, eyre};
use tidepool::{Program, logging};
use tidepool_skia::{Font, SkiaSurface};
use tracing::{info, warn};

use super::load_config;
use crate::host::{PngHost, system_font};

/// Arguments for the run command.
#[derive(ClapArgs, Debug)]
pub struct Args {
    /// Markup file to render.
    pub markup: PathBuf,

    /// Config file (defaults to `tidepool.toml` next to the markup).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Output height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// TrueType/OpenType font for text.
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// PNG file receiving the rendered frames.
    #[arg(short, long, default_value = "frame.png")]
    pub output: PathBuf,

    /// Reload the markup whenever it changes.
    #[arg(long)]
    pub watch: bool,

    /// Stop after this many frames (one frame unless watching).
    #[arg(long)]
    pub frames: Option<u64>,
}

/// Loads the markup and renders it until the frame budget is spent or
/// Ctrl+C is pressed.
pub fn run(args: Args) -> Result<()> {
    let mut config = load_config(args.config.as_deref(), &args.markup)?;
    logging::init_tracing(&config.log_level);

    if let Some(width) = args.width {
        config.window.width = width;
    }
    if let Some(height) = args.height {
        config.window.height = height;
    }
    if args.font.is_some() {
        config.font.path.clone_from(&args.font);
    }
    let watching = args.watch || config.hot_reload.enabled;

    let font_path = config
        .font
        .path
        .clone()
        .or_else(system_font)
        .ok_or_else(|| eyre!("no font found, pass --font or set `path` in [font]"))?;
    let font = Font::load(&font_path, config.font.size)?;
    let surface = SkiaSurface::new(config.window.width, config.window.height, font)?;

    let mut program = Program::new();
    program
        .load_file(&args.markup)
        .wrap_err_with(|| format!("{} is not a valid interface", args.markup.display()))?;
    if watching {
        program.watch(&args.markup)?;
    }

    info!(
        title = %config.window.title,
        width = config.window.width,
        height = config.window.height,
        output = %args.output.display(),
        "rendering"
    );
    let frames = args.frames.or(if watching { None } else { Some(1) });
    let mut host = PngHost::new(surface, &args.output, frames)
        .with_clear_color(config.render.clear_color)
        .with_interval(config.render.frame_interval());
    program.run(&mut host)?;

    if let Some(error) = program.last_reload_error() {
        warn!(%error, "the last reload failed, the saved frame shows the previous interface");
    }
    Ok(())
}
