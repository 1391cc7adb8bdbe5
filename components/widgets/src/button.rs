use tidepool_core::{
    Alignment, Color, PaintError, Surface, TextMetrics, Widget, WidgetBase,
};

use crate::{HORIZONTAL_CHROME, VERTICAL_CHROME};

/// A push button: a filled, outlined box with centered text.
///
/// The intrinsic size is the measured text plus fixed chrome plus padding.
#[derive(Debug)]
pub struct Button {
    base: WidgetBase,
    text: String,
    background: Color,
    foreground: Color,
}

impl Default for Button {
    fn default() -> Self {
        Self::new("Click Me")
    }
}

impl Button {
    /// Default fill color.
    pub const BACKGROUND: Color = Color::new(0.9, 0.9, 0.9, 1.0);

    /// Creates a button showing `text`.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            base: WidgetBase::new(),
            text: text.into(),
            background: Self::BACKGROUND,
            foreground: Color::BLACK,
        }
    }

    /// Displayed text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the displayed text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Fill color of the box.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.background
    }

    /// Replaces the fill color of the box.
    pub const fn set_background(&mut self, color: Color) {
        self.background = color;
    }

    /// Color of the outline and the text.
    #[must_use]
    pub const fn foreground(&self) -> Color {
        self.foreground
    }

    /// Replaces the color of the outline and the text.
    pub const fn set_foreground(&mut self, color: Color) {
        self.foreground = color;
    }
}

impl Widget for Button {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width(&self, metrics: &dyn TextMetrics) -> f64 {
        metrics.text_width(&self.text) + 2.0 * HORIZONTAL_CHROME + self.padding().horizontal()
    }

    fn height(&self, metrics: &dyn TextMetrics) -> f64 {
        metrics.line_height() + 2.0 * VERTICAL_CHROME + self.padding().vertical()
    }

    fn paint(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        let size = self.size(surface.metrics());
        let line_height = surface.metrics().line_height();
        let padding = self.padding();

        surface.set_color(self.background);
        surface.fill_rectangle(0.0, 0.0, size.width, size.height);

        surface.set_color(self.foreground);
        surface.set_line_width(1.0);
        surface.draw_rectangle(0.0, 0.0, size.width, size.height);
        surface.draw_text(
            padding.left,
            padding.top + VERTICAL_CHROME,
            size.width - padding.horizontal(),
            line_height,
            &self.text,
            Alignment::Center,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tidepool_core::{DrawCommand, Edges, FixedMetrics, Rect, RecordingSurface, Size};

    use super::*;

    #[test]
    fn default_text() {
        assert_eq!(Button::default().text(), "Click Me");
    }

    #[test]
    fn size_follows_measured_text() {
        let metrics = FixedMetrics::new(10.0, 20.0);
        let button = Button::new("OK");
        assert!((button.width(&metrics) - (20.0 + 2.0 * HORIZONTAL_CHROME)).abs() < f64::EPSILON);
        assert!((button.height(&metrics) - (20.0 + 2.0 * VERTICAL_CHROME)).abs() < f64::EPSILON);
    }

    #[test]
    fn padding_grows_the_button() {
        let metrics = FixedMetrics::default();
        let mut button = Button::new("OK");
        let plain = button.size(&metrics);
        button.set_padding(Edges::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(button.size(&metrics), Size::new(plain.width + 4.0, plain.height + 6.0));
    }

    #[test]
    fn paints_box_outline_and_centered_text_within_its_size() {
        let mut button = Button::new("Save");
        button.set_padding(Edges::uniform(2.0));
        let button: Box<dyn Widget> = Box::new(button);
        let mut surface = RecordingSurface::new(Size::new(200.0, 100.0));
        let size = button.size(surface.metrics());

        button.render(&mut surface).expect("button paints");

        let bounds = Rect::from_xywh(0.0, 0.0, size.width, size.height);
        assert_eq!(surface.filled_rects(), [bounds]);
        let text = surface
            .commands()
            .iter()
            .find_map(|command| match command {
                DrawCommand::Text {
                    rect,
                    content,
                    alignment,
                    ..
                } => Some((*rect, content.clone(), *alignment)),
                _ => None,
            })
            .expect("text drawn");
        assert_eq!(text.1, "Save");
        assert_eq!(text.2, Alignment::Center);
        assert_eq!(
            text.0,
            Rect::from_xywh(2.0, 2.0 + VERTICAL_CHROME, size.width - 4.0, 16.0)
        );
        assert!(surface.commands().iter().any(|command| matches!(
            command,
            DrawCommand::StrokeRect { rect, .. } if *rect == bounds
        )));
        assert_eq!(surface.depth(), 0);
    }
}
