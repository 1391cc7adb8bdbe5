//! CPU raster backend built on `tiny-skia`.
//!
//! [`SkiaSurface`] implements the drawing surface on top of a
//! [`tiny_skia::Pixmap`]. Rectangles go through tiny-skia directly; text is
//! laid out with `ab_glyph` and its glyph coverage is blended into the
//! pixmap.

mod font;
mod surface;

use std::path::PathBuf;

use thiserror::Error;

pub use font::Font;
pub use surface::SkiaSurface;
pub use tiny_skia;

/// Failures of the raster backend.
#[derive(Debug, Error)]
pub enum SkiaError {
    /// The font file could not be read.
    #[error("failed to read font {}: {source}", path.display())]
    ReadFont {
        /// Font path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The data is not a usable font.
    #[error("invalid font data: {0}")]
    InvalidFont(#[from] ab_glyph::InvalidFont),
    /// The pixmap size is zero or too large.
    #[error("cannot allocate a {width}x{height} pixmap")]
    Allocation {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// PNG encoding failed.
    #[error("failed to encode png: {0}")]
    Encode(String),
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use tidepool_core::{Alignment, Color, Surface, SurfaceGuard, TextMetrics, Widget};
    use tidepool_widgets::{Button, VerticalPanel};

    use super::*;

    const FONT_CANDIDATES: &[&str] = &[
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans.ttf",
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "C:\\Windows\\Fonts\\arial.ttf",
    ];

    /// A system font, or `None` to skip tests that rasterize text. Skips are
    /// reported on stderr so they show up with `--nocapture`.
    fn test_font(test: &str) -> Option<Font> {
        let from_env = std::env::var_os("TIDEPOOL_TEST_FONT").map(PathBuf::from);
        let font = from_env
            .into_iter()
            .chain(FONT_CANDIDATES.iter().map(PathBuf::from))
            .filter(|path| path.exists())
            .find_map(|path| Font::load(path, 16.0).ok());
        if font.is_none() {
            eprintln!("skipping {test}: no usable font, set TIDEPOOL_TEST_FONT");
        }
        font
    }

    fn pixel(surface: &SkiaSurface, x: u32, y: u32) -> [u8; 4] {
        let pixel = surface
            .pixmap()
            .pixel(x, y)
            .expect("pixel inside the pixmap");
        [pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()]
    }

    #[test]
    fn invalid_font_data_is_rejected() {
        let error = Font::from_bytes(b"not a font".to_vec(), 12.0).expect_err("garbage");
        assert!(matches!(error, SkiaError::InvalidFont(_)));
    }

    #[test]
    fn missing_font_file_reports_its_path() {
        let error = Font::load(Path::new("/nonexistent/font.ttf"), 12.0).expect_err("missing");
        assert!(error.to_string().contains("/nonexistent/font.ttf"));
    }

    #[test]
    fn fills_respect_translation_and_restore() {
        let Some(font) = test_font("fills_respect_translation_and_restore") else {
            return;
        };
        let mut surface = SkiaSurface::new(40, 40, font).expect("pixmap");
        surface.clear(Color::WHITE);
        {
            let mut scoped = SurfaceGuard::new(&mut surface);
            scoped.translate(10.0, 10.0);
            scoped.set_color(Color::rgb8(255, 0, 0));
            scoped.fill_rectangle(0.0, 0.0, 5.0, 5.0);
        }
        surface.fill_rectangle(30.0, 30.0, 5.0, 5.0);

        assert_eq!(pixel(&surface, 12, 12), [255, 0, 0, 255]);
        assert_eq!(pixel(&surface, 2, 2), [255, 255, 255, 255]);
        assert_eq!(pixel(&surface, 32, 32), [0, 0, 0, 255]);
    }

    #[test]
    fn text_is_rasterized_inside_its_box() {
        let Some(font) = test_font("text_is_rasterized_inside_its_box") else {
            return;
        };
        let mut surface = SkiaSurface::new(120, 40, font).expect("pixmap");
        surface.clear(Color::WHITE);
        surface.set_color(Color::BLACK);
        surface.draw_text(0.0, 0.0, 120.0, 20.0, "Hello", Alignment::Left);

        let inked = surface
            .pixmap()
            .pixels()
            .iter()
            .filter(|pixel| pixel.red() < 128)
            .count();
        assert!(inked > 0);
        assert!(surface.metrics().text_width("Hello") > 0.0);
        assert!(surface.metrics().text_width("").abs() < f64::EPSILON);
    }

    #[test]
    fn renders_a_widget_tree_to_png() {
        let Some(font) = test_font("renders_a_widget_tree_to_png") else {
            return;
        };
        let mut panel = VerticalPanel::new();
        panel.add_widget(Box::new(Button::new("OK")));
        panel.add_widget(Box::new(Button::new("Cancel")));
        let panel: Box<dyn Widget> = Box::new(panel);

        let mut surface = SkiaSurface::new(200, 100, font).expect("pixmap");
        surface.clear(Color::WHITE);
        panel.render(&mut surface).expect("tree renders");

        let png = surface.encode_png().expect("png encodes");
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn zero_sized_pixmap_is_an_error() {
        let Some(font) = test_font("zero_sized_pixmap_is_an_error") else {
            return;
        };
        let error = SkiaSurface::new(0, 10, font).expect_err("empty area");
        assert!(matches!(
            error,
            SkiaError::Allocation {
                width: 0,
                height: 10
            }
        ));
    }
}
