use core::fmt;

use ab_glyph::Font as _;
use tidepool_core::{Alignment, Color, Size, Surface, TextMetrics};
use tiny_skia::{Paint, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Stroke, Transform};
use tracing::warn;

use crate::{Font, SkiaError};

#[derive(Debug, Clone, Copy)]
struct State {
    transform: Transform,
    color: Color,
    line_width: f32,
    antialias: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            transform: Transform::identity(),
            color: Color::BLACK,
            line_width: 1.0,
            antialias: true,
        }
    }
}

/// Drawing surface rasterizing into a `tiny-skia` pixmap.
pub struct SkiaSurface {
    pixmap: Pixmap,
    font: Font,
    state: State,
    saved: Vec<State>,
}

impl fmt::Debug for SkiaSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkiaSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .field("font", &self.font)
            .field("depth", &self.saved.len())
            .finish()
    }
}

impl SkiaSurface {
    /// Creates a transparent surface of `width` x `height` pixels.
    ///
    /// # Errors
    ///
    /// Returns [`SkiaError::Allocation`] for a zero or oversized area.
    pub fn new(width: u32, height: u32, font: Font) -> Result<Self, SkiaError> {
        let pixmap = Pixmap::new(width, height).ok_or(SkiaError::Allocation { width, height })?;
        Ok(Self {
            pixmap,
            font,
            state: State::default(),
            saved: Vec::new(),
        })
    }

    /// Replaces the pixmap with a transparent one of the new size.
    ///
    /// # Errors
    ///
    /// Returns [`SkiaError::Allocation`] and keeps the old pixmap when the
    /// size cannot be allocated.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), SkiaError> {
        self.pixmap = Pixmap::new(width, height).ok_or(SkiaError::Allocation { width, height })?;
        Ok(())
    }

    /// Fills the whole pixmap and resets the drawing state.
    pub fn clear(&mut self, color: Color) {
        self.pixmap.fill(to_skia(color));
        self.state = State::default();
        self.saved.clear();
    }

    /// The painted pixels.
    #[must_use]
    pub const fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// The font used for text.
    #[must_use]
    pub const fn font(&self) -> &Font {
        &self.font
    }

    /// Encodes the pixmap as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`SkiaError::Encode`] when encoding fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, SkiaError> {
        self.pixmap
            .encode_png()
            .map_err(|error| SkiaError::Encode(format!("{error:?}")))
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color(to_skia(self.state.color));
        paint.anti_alias = self.state.antialias;
        paint
    }

    fn blend(&mut self, x: i32, y: i32, coverage: f32) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x >= self.pixmap.width() || y >= self.pixmap.height() {
            return;
        }
        let coverage = if self.state.antialias {
            coverage.clamp(0.0, 1.0)
        } else if coverage >= 0.5 {
            1.0
        } else {
            return;
        };

        let color = self.state.color;
        let alpha = color.a.clamp(0.0, 1.0) * coverage;
        let index = (y * self.pixmap.width() + x) as usize;
        let Some(pixel) = self.pixmap.pixels_mut().get_mut(index) else {
            return;
        };
        let keep = 1.0 - alpha;
        let over = |source: f32, destination: u8| -> u8 {
            let value = source.clamp(0.0, 1.0) * alpha * 255.0 + f32::from(destination) * keep;
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let value = value.round().clamp(0.0, 255.0) as u8;
            value
        };
        let a = over(1.0, pixel.alpha());
        let r = over(color.r, pixel.red()).min(a);
        let g = over(color.g, pixel.green()).min(a);
        let b = over(color.b, pixel.blue()).min(a);
        if let Some(blended) = PremultipliedColorU8::from_rgba(r, g, b, a) {
            *pixel = blended;
        }
    }
}

#[allow(clippy::cast_possible_truncation)]
fn rect(x: f64, y: f64, width: f64, height: f64) -> Option<Rect> {
    Rect::from_xywh(x as f32, y as f32, width as f32, height as f32)
}

fn to_skia(color: Color) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_rgba8();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

#[allow(clippy::cast_possible_truncation)]
impl Surface for SkiaSurface {
    fn metrics(&self) -> &dyn TextMetrics {
        &self.font
    }

    fn size(&self) -> Size {
        Size::new(
            f64::from(self.pixmap.width()),
            f64::from(self.pixmap.height()),
        )
    }

    fn save(&mut self) {
        self.saved.push(self.state);
    }

    fn restore(&mut self) {
        match self.saved.pop() {
            Some(state) => self.state = state,
            None => warn!("restore without a matching save"),
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.transform = self.state.transform.pre_translate(dx as f32, dy as f32);
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.state.antialias = enabled;
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width as f32;
    }

    fn fill_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(area) = rect(x, y, width, height) else {
            return;
        };
        let paint = self.paint();
        self.pixmap
            .fill_rect(area, &paint, self.state.transform, None);
    }

    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let Some(area) = rect(x, y, width, height) else {
            return;
        };
        let path = PathBuilder::from_rect(area);
        let stroke = Stroke {
            width: self.state.line_width,
            ..Stroke::default()
        };
        let paint = self.paint();
        self.pixmap
            .stroke_path(&path, &paint, &stroke, self.state.transform, None);
    }

    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        _height: f64,
        text: &str,
        alignment: Alignment,
    ) {
        if text.is_empty() {
            return;
        }
        let offset = alignment.offset(width, self.font.text_width(text));
        let origin_x = self.state.transform.tx + (x + offset) as f32;
        let baseline = self.state.transform.ty + y as f32 + self.font.ascent();

        let glyphs = self.font.layout(text, origin_x, baseline);
        let font = self.font.inner().clone();
        for glyph in glyphs {
            let Some(outline) = font.outline_glyph(glyph) else {
                continue;
            };
            let bounds = outline.px_bounds();
            let left = bounds.min.x as i32;
            let top = bounds.min.y as i32;
            outline.draw(|dx, dy, coverage| {
                #[allow(clippy::cast_possible_wrap)]
                self.blend(left + dx as i32, top + dy as i32, coverage);
            });
        }
    }
}
