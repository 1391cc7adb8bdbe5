use core::fmt;
use std::path::Path;

use ab_glyph::{Font as _, FontArc, Glyph, PxScale, ScaleFont, point};
use tidepool_core::TextMetrics;

use crate::SkiaError;

/// A font at a fixed pixel size.
#[derive(Clone)]
pub struct Font {
    font: FontArc,
    scale: PxScale,
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("size", &self.scale.y)
            .finish_non_exhaustive()
    }
}

impl Font {
    /// Parses TrueType/OpenType data.
    ///
    /// # Errors
    ///
    /// Returns [`SkiaError::InvalidFont`] when the data is not a font.
    pub fn from_bytes(data: Vec<u8>, size: f32) -> Result<Self, SkiaError> {
        let font = FontArc::try_from_vec(data)?;
        Ok(Self {
            font,
            scale: PxScale::from(size),
        })
    }

    /// Reads and parses a font file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or is not a font.
    pub fn load(path: impl AsRef<Path>, size: f32) -> Result<Self, SkiaError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| SkiaError::ReadFont {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(data, size)
    }

    /// Pixel size.
    #[must_use]
    pub const fn size(&self) -> f32 {
        self.scale.y
    }

    /// Distance from the top of a line to the baseline.
    #[must_use]
    pub fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    /// Positions the glyphs of `text` on a baseline starting at `(x, y)`.
    pub(crate) fn layout(&self, text: &str, x: f32, y: f32) -> Vec<Glyph> {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = x;
        let mut previous = None;
        let mut glyphs = Vec::with_capacity(text.len());
        for character in text.chars() {
            let id = scaled.glyph_id(character);
            if let Some(previous) = previous {
                caret += scaled.kern(previous, id);
            }
            glyphs.push(id.with_scale_and_position(self.scale, point(caret, y)));
            caret += scaled.h_advance(id);
            previous = Some(id);
        }
        glyphs
    }

    pub(crate) const fn inner(&self) -> &FontArc {
        &self.font
    }
}

impl TextMetrics for Font {
    fn text_width(&self, text: &str) -> f64 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0_f32;
        let mut previous = None;
        for character in text.chars() {
            let id = scaled.glyph_id(character);
            if let Some(previous) = previous {
                width += scaled.kern(previous, id);
            }
            width += scaled.h_advance(id);
            previous = Some(id);
        }
        f64::from(width)
    }

    fn line_height(&self) -> f64 {
        f64::from(self.font.as_scaled(self.scale).height())
    }
}
