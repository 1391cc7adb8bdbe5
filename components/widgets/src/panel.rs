use tidepool_core::{PaintError, Point, Surface, TextMetrics, Widget, WidgetBase};

use crate::stack::{Axis, render_stacked, stacked_size};

/// Container stacking its children top to bottom.
///
/// Children start at the panel's padding and each one advances the next by
/// its outer height (margin included). The panel paints nothing itself.
#[derive(Debug, Default)]
pub struct VerticalPanel {
    base: WidgetBase,
}

impl VerticalPanel {
    /// Creates an empty panel.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Widget for VerticalPanel {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }

    fn width(&self, metrics: &dyn TextMetrics) -> f64 {
        self.padding().horizontal() + stacked_size(self.children(), Axis::Vertical, metrics).width
    }

    fn height(&self, metrics: &dyn TextMetrics) -> f64 {
        self.padding().vertical() + stacked_size(self.children(), Axis::Vertical, metrics).height
    }

    fn paint(&self, _surface: &mut dyn Surface) -> Result<(), PaintError> {
        Ok(())
    }

    fn paint_children(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        let padding = self.padding();
        render_stacked(
            self.children(),
            Axis::Vertical,
            Point::new(padding.left, padding.top),
            surface,
        )
    }
}

#[cfg(test)]
mod tests {
    use tidepool_core::{Edges, FixedMetrics, Rect, RecordingSurface, Size};

    use super::*;
    use crate::test_support::Block;

    fn panel_of(heights: &[f64]) -> VerticalPanel {
        let mut panel = VerticalPanel::new();
        for (index, height) in heights.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            panel.add_widget(Block::boxed(10.0 + index as f64, *height));
        }
        panel
    }

    #[test]
    fn stacks_children_by_height() {
        let panel: Box<dyn Widget> = Box::new(panel_of(&[10.0, 20.0, 15.0]));
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        panel.render(&mut surface).expect("panel renders");

        let offsets: Vec<f64> = surface.filled_rects().iter().map(|rect| rect.origin.y).collect();
        assert_eq!(offsets, [0.0, 10.0, 30.0]);
        assert_eq!(surface.depth(), 0);
    }

    #[test]
    fn size_is_widest_child_by_total_height() {
        let metrics = FixedMetrics::default();
        let panel = panel_of(&[10.0, 20.0, 15.0]);
        assert_eq!(panel.size(&metrics), Size::new(12.0, 45.0));
        assert_eq!(VerticalPanel::new().size(&metrics), Size::ZERO);
    }

    #[test]
    fn honors_padding_and_child_margins() {
        let mut panel = panel_of(&[]);
        panel.set_padding(Edges::new(5.0, 7.0, 1.0, 1.0));
        let mut first = Block::boxed(10.0, 10.0);
        first.set_margin(Edges::new(2.0, 3.0, 0.0, 4.0));
        panel.add_widget(first);
        panel.add_widget(Block::boxed(10.0, 10.0));

        let metrics = FixedMetrics::default();
        assert_eq!(panel.size(&metrics), Size::new(18.0, 35.0));

        let panel: Box<dyn Widget> = Box::new(panel);
        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        panel.render(&mut surface).expect("panel renders");
        assert_eq!(
            surface.filled_rects(),
            [
                Rect::from_xywh(7.0, 10.0, 10.0, 10.0),
                Rect::from_xywh(5.0, 24.0, 10.0, 10.0)
            ]
        );
    }

    #[test]
    fn nested_panels_offset_their_content() {
        let mut outer = panel_of(&[5.0]);
        outer.add_widget(Box::new(panel_of(&[4.0, 6.0])));
        let outer: Box<dyn Widget> = Box::new(outer);

        let mut surface = RecordingSurface::new(Size::new(100.0, 100.0));
        outer.render(&mut surface).expect("panels render");
        let offsets: Vec<f64> = surface.filled_rects().iter().map(|rect| rect.origin.y).collect();
        assert_eq!(offsets, [0.0, 5.0, 9.0]);
    }
}
