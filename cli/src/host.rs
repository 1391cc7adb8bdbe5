//! Headless host writing frames to a PNG file.

use std::{
    path::{Path, PathBuf},
    thread,
    time::{Duration, Instant},
};

use tidepool::{Color, Host, HostError};
use tidepool_skia::SkiaSurface;
use tracing::{debug, info};

use crate::is_cancelled;

/// Fonts tried when neither the command line nor the config names one.
const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// First installed font out of a few common locations.
pub fn system_font() -> Option<PathBuf> {
    SYSTEM_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.exists())
}

/// Renders into an offscreen surface and saves every frame that differs from
/// the previous one.
#[derive(Debug)]
pub struct PngHost {
    surface: SkiaSurface,
    output: PathBuf,
    clear_color: Color,
    interval: Duration,
    remaining: Option<u64>,
    last_frame: Option<Instant>,
    last_pixels: Vec<u8>,
    written: u64,
}

impl PngHost {
    /// Creates a host drawing into `surface` and saving to `output`.
    ///
    /// With `frames` set, the loop stops after that many frames; otherwise it
    /// runs until Ctrl+C.
    pub fn new(surface: SkiaSurface, output: impl AsRef<Path>, frames: Option<u64>) -> Self {
        Self {
            surface,
            output: output.as_ref().to_path_buf(),
            clear_color: Color::WHITE,
            interval: Duration::ZERO,
            remaining: frames,
            last_frame: None,
            last_pixels: Vec::new(),
            written: 0,
        }
    }

    /// Color painted before every frame.
    #[must_use]
    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    /// Minimum time between two frames.
    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Number of PNG files written so far.
    #[must_use]
    pub const fn written(&self) -> u64 {
        self.written
    }

    fn pace(&mut self) {
        if let Some(last) = self.last_frame {
            let elapsed = last.elapsed();
            if elapsed < self.interval {
                thread::sleep(self.interval - elapsed);
            }
        }
        self.last_frame = Some(Instant::now());
    }
}

impl Host for PngHost {
    type Surface = SkiaSurface;

    fn next_frame(&mut self) -> Option<&mut SkiaSurface> {
        if is_cancelled() {
            debug!("render loop cancelled");
            return None;
        }
        match &mut self.remaining {
            Some(0) => return None,
            Some(remaining) => *remaining -= 1,
            None => {}
        }
        self.pace();
        self.surface.clear(self.clear_color);
        Some(&mut self.surface)
    }

    fn present(&mut self) -> Result<(), HostError> {
        let pixels = self.surface.pixmap().data();
        if pixels == self.last_pixels.as_slice() {
            return Ok(());
        }
        let png = self
            .surface
            .encode_png()
            .map_err(|error| HostError::with_source("failed to encode frame", error))?;
        std::fs::write(&self.output, png).map_err(|error| {
            HostError::with_source(format!("failed to write {}", self.output.display()), error)
        })?;
        self.last_pixels.clear();
        self.last_pixels.extend_from_slice(pixels);
        self.written += 1;
        info!(path = %self.output.display(), frame = self.written, "frame written");
        Ok(())
    }
}
