//! The drawing surface abstraction every widget paints through.
//!
//! Widgets never touch a graphics library directly. They receive a
//! `&mut dyn Surface` and issue state changes and primitive calls against it,
//! so the same widget code runs on the raster backend, the recording backend
//! used by tests, or any other implementation.

use core::{
    fmt::{self, Debug},
    ops::{Deref, DerefMut},
};

use crate::{color::Color, geometry::Size};

/// Horizontal alignment of text inside its layout box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Alignment {
    /// Flush with the left edge of the box.
    #[default]
    Left,
    /// Centered inside the box.
    Center,
    /// Flush with the right edge of the box.
    Right,
}

impl Alignment {
    /// Returns the horizontal offset of a run of `text_width` inside a box of
    /// `box_width`.
    #[must_use]
    pub fn offset(self, box_width: f64, text_width: f64) -> f64 {
        match self {
            Self::Left => 0.0,
            Self::Center => (box_width - text_width) / 2.0,
            Self::Right => box_width - text_width,
        }
    }
}

/// Font measurement capability.
///
/// Split from [`Surface`] so that intrinsic sizes can be computed without a
/// paint target.
pub trait TextMetrics {
    /// Measures a run of text in the current font. Returns 0 for empty input.
    fn text_width(&self, text: &str) -> f64;

    /// Height of one line of text in the current font.
    fn line_height(&self) -> f64;
}

/// Capability interface of a drawing backend.
///
/// All operations act on an implicit current target. State changes (color,
/// transform, line width, antialiasing) stay in effect until the matching
/// [`restore`](Surface::restore). Widget code should not call `save`/`restore`
/// directly; use [`SurfaceGuard`] so that the stack stays balanced on every
/// exit path.
pub trait Surface {
    /// Returns the font metrics used by [`draw_text`](Surface::draw_text).
    fn metrics(&self) -> &dyn TextMetrics;

    /// Measures `text` in the current font; no side effect.
    fn get_text_width(&self, text: &str) -> f64 {
        self.metrics().text_width(text)
    }

    /// Size of the paint target.
    fn size(&self) -> Size;

    /// Pushes the current drawing state.
    fn save(&mut self);

    /// Pops the drawing state pushed by the matching [`save`](Surface::save).
    fn restore(&mut self);

    /// Offsets every subsequent coordinate until the next restore.
    fn translate(&mut self, dx: f64, dy: f64);

    /// Sets the color used by subsequent primitives and text.
    fn set_color(&mut self, color: Color);

    /// Toggles edge smoothing for subsequent primitives.
    fn set_antialias(&mut self, enabled: bool);

    /// Sets the stroke width of outline primitives.
    fn set_line_width(&mut self, width: f64);

    /// Fills a rectangle in local coordinates.
    fn fill_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Strokes the outline of a rectangle in local coordinates.
    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Lays out `text` inside the box `(x, y, width, height)`.
    ///
    /// Text exceeding the box is not clipped by this contract.
    #[allow(clippy::too_many_arguments)]
    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: &str,
        alignment: Alignment,
    );
}

/// Scoped save/restore of a [`Surface`].
///
/// Creating the guard saves the drawing state; dropping it restores it. The
/// guard dereferences to the surface, so drawing continues through it.
///
/// ```
/// use tidepool_core::{RecordingSurface, Size, Surface, SurfaceGuard};
///
/// let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
/// {
///     let mut scoped = SurfaceGuard::new(&mut surface);
///     scoped.translate(10.0, 10.0);
///     scoped.fill_rectangle(0.0, 0.0, 5.0, 5.0);
/// }
/// assert_eq!(surface.depth(), 0);
/// ```
pub struct SurfaceGuard<'a> {
    surface: &'a mut dyn Surface,
}

impl<'a> SurfaceGuard<'a> {
    /// Saves the state of `surface` and returns a guard restoring it on drop.
    pub fn new(surface: &'a mut dyn Surface) -> Self {
        surface.save();
        Self { surface }
    }
}

impl Debug for SurfaceGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceGuard")
            .field("size", &self.surface.size())
            .finish_non_exhaustive()
    }
}

impl<'a> Deref for SurfaceGuard<'a> {
    type Target = dyn Surface + 'a;

    fn deref(&self) -> &Self::Target {
        self.surface
    }
}

impl DerefMut for SurfaceGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.surface
    }
}

impl Drop for SurfaceGuard<'_> {
    fn drop(&mut self) {
        self.surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::RecordingSurface;

    fn fails_halfway(surface: &mut dyn Surface) -> Result<(), &'static str> {
        let mut scoped = SurfaceGuard::new(surface);
        scoped.translate(4.0, 4.0);
        if scoped.size() == Size::new(10.0, 10.0) {
            return Err("bail out");
        }
        scoped.fill_rectangle(0.0, 0.0, 1.0, 1.0);
        Ok(())
    }

    #[test]
    fn guard_restores_on_early_return() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        assert!(fails_halfway(&mut surface).is_err());
        assert_eq!(surface.depth(), 0);
        assert_eq!(surface.max_depth(), 1);
        assert_eq!(surface.origin(), crate::Point::ZERO);
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut surface = RecordingSurface::new(Size::new(10.0, 10.0));
        {
            let mut outer = SurfaceGuard::new(&mut surface);
            outer.translate(1.0, 1.0);
            {
                let mut inner = SurfaceGuard::new(&mut *outer);
                inner.translate(2.0, 2.0);
                inner.fill_rectangle(0.0, 0.0, 1.0, 1.0);
            }
            outer.fill_rectangle(0.0, 0.0, 1.0, 1.0);
        }
        let rects = surface.filled_rects();
        assert_eq!(rects[0].origin, crate::Point::new(3.0, 3.0));
        assert_eq!(rects[1].origin, crate::Point::new(1.0, 1.0));
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn alignment_offsets() {
        assert!((Alignment::Left.offset(100.0, 40.0)).abs() < f64::EPSILON);
        assert!((Alignment::Center.offset(100.0, 40.0) - 30.0).abs() < f64::EPSILON);
        assert!((Alignment::Right.offset(100.0, 40.0) - 60.0).abs() < f64::EPSILON);
    }
}
