use core::cell::Cell;

use tidepool_core::{
    Alignment, Color, PaintError, Point, Surface, TextMetrics, Widget, WidgetBase,
};
use tracing::trace;

use crate::{
    HORIZONTAL_CHROME, VERTICAL_CHROME,
    stack::{Axis, render_stacked, stacked_size},
};

/// Menu bar laying out its menus left to right over a filled background.
#[derive(Debug)]
pub struct MainMenu {
    base: WidgetBase,
    background: Color,
}

impl Default for MainMenu {
    fn default() -> Self {
        Self {
            base: WidgetBase::new(),
            background: Self::BACKGROUND,
        }
    }
}

impl MainMenu {
    /// Default bar color.
    pub const BACKGROUND: Color = Color::new(0.95, 0.95, 0.95, 1.0);

    /// Creates an empty menu bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bar color.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Replaces the bar color.
    pub const fn set_background(&mut self, color: Color) {
        self.background = color;
    }
}

impl Widget for MainMenu {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width(&self, metrics: &dyn TextMetrics) -> f64 {
        self.padding().horizontal() + stacked_size(self.children(), Axis::Horizontal, metrics).width
    }

    fn height(&self, metrics: &dyn TextMetrics) -> f64 {
        let content = if self.children().is_empty() {
            metrics.line_height() + 2.0 * VERTICAL_CHROME
        } else {
            stacked_size(self.children(), Axis::Horizontal, metrics).height
        };
        self.padding().vertical() + content
    }

    fn paint(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        let size = self.size(surface.metrics());
        surface.set_color(self.background);
        surface.fill_rectangle(0.0, 0.0, size.width, size.height);
        Ok(())
    }

    fn paint_children(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        let padding = self.padding();
        render_stacked(
            self.children(),
            Axis::Horizontal,
            Point::new(padding.left, padding.top),
            surface,
        )
    }
}

/// Glyph whose advance, together with the line height, identifies the font a
/// cached title width was measured with.
const REFERENCE_GLYPH: &str = "M";

/// Identifies the metrics a measurement was taken with.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FontKey {
    line_height: f64,
    advance: f64,
}

impl FontKey {
    fn of(metrics: &dyn TextMetrics) -> Self {
        Self {
            line_height: metrics.line_height(),
            advance: metrics.text_width(REFERENCE_GLYPH),
        }
    }
}

/// A titled menu.
///
/// The width of the title is measured once per font and cached;
/// [`Menu::set_title`] invalidates the cache so that the next size query
/// measures again.
///
/// The `expanded` flag decides whether the items are shown. When expanded,
/// the menu's items are stacked below the title. A collapsed menu paints only
/// its title and none of its descendants, so `<Menu><Button/></Menu>` renders
/// no button until `expanded="true"` is set.
#[derive(Debug)]
pub struct Menu {
    base: WidgetBase,
    title: String,
    title_width: Cell<Option<(FontKey, f64)>>,
    expanded: bool,
    foreground: Color,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new("Menu")
    }
}

impl Menu {
    /// Creates a collapsed menu with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            title: title.into(),
            title_width: Cell::new(None),
            expanded: false,
            foreground: Color::BLACK,
        }
    }

    /// Current title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replaces the title and drops the cached width.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.title_width.set(None);
    }

    /// Whether the items are shown below the title.
    #[must_use]
    pub const fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Shows or hides the items below the title.
    pub const fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    /// Color of the title text.
    #[must_use]
    pub const fn foreground(&self) -> Color {
        self.foreground
    }

    /// Replaces the color of the title text.
    pub const fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }

    fn title_width(&self, metrics: &dyn TextMetrics) -> f64 {
        let key = FontKey::of(metrics);
        if let Some((_, width)) = self.title_width.get().filter(|(cached, _)| *cached == key) {
            return width;
        }
        let width = metrics.text_width(&self.title) + 2.0 * HORIZONTAL_CHROME;
        self.title_width.set(Some((key, width)));
        trace!(title = %self.title, width, "measured menu title");
        width
    }

    fn title_height(metrics: &dyn TextMetrics) -> f64 {
        metrics.line_height() + 2.0 * VERTICAL_CHROME
    }
}

impl Widget for Menu {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width(&self, metrics: &dyn TextMetrics) -> f64 {
        let mut content = self.title_width(metrics);
        if self.expanded {
            content = content.max(stacked_size(self.children(), Axis::Vertical, metrics).width);
        }
        self.padding().horizontal() + content
    }

    fn height(&self, metrics: &dyn TextMetrics) -> f64 {
        let mut content = Self::title_height(metrics);
        if self.expanded {
            content += stacked_size(self.children(), Axis::Vertical, metrics).height;
        }
        self.padding().vertical() + content
    }

    fn paint(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        let padding = self.padding();
        let title_width = self.title_width(surface.metrics());
        let line_height = surface.metrics().line_height();

        surface.set_color(self.foreground);
        surface.draw_text(
            padding.left,
            padding.top + VERTICAL_CHROME,
            title_width,
            line_height,
            &self.title,
            Alignment::Center,
        );
        Ok(())
    }

    fn paint_children(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        if !self.expanded {
            return Ok(());
        }
        let padding = self.padding();
        let top = padding.top + Self::title_height(surface.metrics());
        render_stacked(
            self.children(),
            Axis::Vertical,
            Point::new(padding.left, top),
            surface,
        )
    }
}
