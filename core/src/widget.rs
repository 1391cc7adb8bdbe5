//! The widget composition model.
//!
//! A widget owns its children exclusively (`Box<dyn Widget>`), so a child can
//! never be shared between two parents and the tree cannot contain cycles.
//! Insertion order is paint order: later children paint over earlier ones.

use core::fmt::Debug;

use thiserror::Error;
use tracing::trace;

use crate::{
    geometry::{Margin, Padding, Size},
    surface::{Surface, SurfaceGuard, TextMetrics},
};

/// Failure raised while painting a widget tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaintError {
    /// The drawing backend could not complete an operation.
    #[error("drawing backend failed: {0}")]
    Backend(String),
    /// A widget could not paint itself.
    #[error("`{widget}` failed to paint: {reason}")]
    Widget {
        /// Type name of the failing widget.
        widget: &'static str,
        /// Human readable reason.
        reason: String,
    },
}

/// State every widget carries: owned children, margin and padding.
#[derive(Debug, Default)]
pub struct WidgetBase {
    children: Vec<Box<dyn Widget>>,
    margin: Margin,
    padding: Padding,
}

impl WidgetBase {
    /// Creates an empty base with zero margin and padding.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Owned children in paint order.
    #[must_use]
    pub fn children(&self) -> &[Box<dyn Widget>] {
        &self.children
    }

    /// Appends a child; it paints after (over) every existing child.
    pub fn push(&mut self, child: Box<dyn Widget>) {
        self.children.push(child);
    }

    /// Current margin.
    #[must_use]
    pub const fn margin(&self) -> Margin {
        self.margin
    }

    /// Replaces the margin.
    pub const fn set_margin(&mut self, margin: Margin) {
        self.margin = margin;
    }

    /// Current padding.
    #[must_use]
    pub const fn padding(&self) -> Padding {
        self.padding
    }

    /// Replaces the padding.
    pub const fn set_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }
}

/// A node of the UI tree.
///
/// Concrete widgets report their intrinsic size and paint their own visuals;
/// [`render`](#method.render) does the rest. The base never aggregates the
/// sizes of children: a container computes its own size from its children and
/// positions them by overriding [`paint_children`](Widget::paint_children).
///
/// Implementations must keep the save/restore stack of the surface they
/// receive balanced, must not touch siblings, and must report a size that
/// matches what they paint.
pub trait Widget: Debug {
    /// Shared widget state.
    fn base(&self) -> &WidgetBase;

    /// Shared widget state, mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Intrinsic width, excluding margin.
    fn width(&self, metrics: &dyn TextMetrics) -> f64;

    /// Intrinsic height, excluding margin.
    fn height(&self, metrics: &dyn TextMetrics) -> f64;

    /// Paints the widget's own visuals in local coordinates starting at (0, 0).
    ///
    /// Padding is not applied for the widget; honor it here if the widget
    /// needs interior spacing.
    ///
    /// # Errors
    ///
    /// Returns an error when the widget cannot paint itself.
    fn paint(&self, surface: &mut dyn Surface) -> Result<(), PaintError>;

    /// Renders the children after [`paint`](Widget::paint).
    ///
    /// The default renders every child in insertion order at the widget's
    /// origin.
    ///
    /// # Errors
    ///
    /// Propagates the first child failure.
    fn paint_children(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        for child in self.children() {
            child.render(surface)?;
        }
        Ok(())
    }

    /// Intrinsic size, excluding margin.
    fn size(&self, metrics: &dyn TextMetrics) -> Size {
        Size::new(self.width(metrics), self.height(metrics))
    }

    /// Short type name used in logs and error messages.
    fn type_name(&self) -> &'static str {
        let full = core::any::type_name::<Self>();
        full.rsplit("::").next().unwrap_or(full)
    }

    /// Owned children in paint order.
    fn children(&self) -> &[Box<dyn Widget>] {
        self.base().children()
    }

    /// Appends a child to the owned child sequence.
    fn add_widget(&mut self, child: Box<dyn Widget>) {
        self.base_mut().push(child);
    }

    /// Current margin.
    fn margin(&self) -> Margin {
        self.base().margin()
    }

    /// Replaces the margin.
    fn set_margin(&mut self, margin: Margin) {
        self.base_mut().set_margin(margin);
    }

    /// Current padding.
    fn padding(&self) -> Padding {
        self.base().padding()
    }

    /// Replaces the padding.
    fn set_padding(&mut self, padding: Padding) {
        self.base_mut().set_padding(padding);
    }
}

impl dyn Widget + '_ {
    /// Renders the widget and its subtree.
    ///
    /// Saves the surface state, translates by the margin's left/top offsets,
    /// paints the widget, renders the children and restores the state. The
    /// restore happens on every exit path, including failures.
    ///
    /// # Errors
    ///
    /// Propagates the first paint failure in the subtree.
    pub fn render(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
        trace!(widget = self.type_name(), "render");
        let margin = self.margin();
        let mut scoped = SurfaceGuard::new(surface);
        scoped.translate(margin.left, margin.top);
        self.paint(&mut *scoped)?;
        self.paint_children(&mut *scoped)
    }

    /// Outer size: the intrinsic size plus the margin on every side.
    #[must_use]
    pub fn outer_size(&self, metrics: &dyn TextMetrics) -> Size {
        let margin = self.margin();
        Size::new(
            margin.horizontal() + self.width(metrics),
            margin.vertical() + self.height(metrics),
        )
    }

    /// Number of widgets in this subtree, including this one.
    #[must_use]
    pub fn count(&self) -> usize {
        1 + self.children().iter().map(|child| child.count()).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{
        Color, Edges, Point, Rect,
        scene::{DrawCommand, RecordingSurface},
    };

    /// Paints its label as text and a square, optionally failing afterwards.
    #[derive(Debug)]
    struct Tag {
        base: WidgetBase,
        label: String,
        fails: bool,
    }

    impl Tag {
        fn new(label: &str) -> Self {
            Self {
                base: WidgetBase::new(),
                label: label.to_string(),
                fails: false,
            }
        }

        fn failing(label: &str) -> Self {
            Self {
                fails: true,
                ..Self::new(label)
            }
        }

        fn with(mut self, child: Self) -> Self {
            self.add_widget(Box::new(child));
            self
        }
    }

    impl Widget for Tag {
        fn base(&self) -> &WidgetBase {
            &self.base
        }

        fn base_mut(&mut self) -> &mut WidgetBase {
            &mut self.base
        }

        fn width(&self, _metrics: &dyn TextMetrics) -> f64 {
            4.0
        }

        fn height(&self, _metrics: &dyn TextMetrics) -> f64 {
            4.0
        }

        fn paint(&self, surface: &mut dyn Surface) -> Result<(), PaintError> {
            surface.set_color(Color::WHITE);
            surface.draw_text(0.0, 0.0, 4.0, 4.0, &self.label, crate::Alignment::Left);
            surface.fill_rectangle(0.0, 0.0, 4.0, 4.0);
            if self.fails {
                return Err(PaintError::Widget {
                    widget: self.type_name(),
                    reason: format!("{} refused", self.label),
                });
            }
            Ok(())
        }
    }

    fn surface() -> RecordingSurface {
        RecordingSurface::new(Size::new(100.0, 100.0))
    }

    fn balanced(surface: &RecordingSurface) -> bool {
        let saves = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Save))
            .count();
        let restores = surface
            .commands()
            .iter()
            .filter(|command| matches!(command, DrawCommand::Restore))
            .count();
        saves == restores && surface.depth() == 0 && surface.unbalanced_restores() == 0
    }

    #[test]
    fn render_is_balanced_when_paint_fails() {
        let tree: Box<dyn Widget> = Box::new(
            Tag::new("root")
                .with(Tag::new("a"))
                .with(Tag::failing("b").with(Tag::new("b1")))
                .with(Tag::new("c")),
        );
        let mut surface = surface();

        let error = tree.render(&mut surface).expect_err("b fails");
        assert_eq!(
            error,
            PaintError::Widget {
                widget: "Tag",
                reason: "b refused".to_string()
            }
        );
        assert!(balanced(&surface));
        assert_eq!(surface.color(), Color::BLACK);
        assert_eq!(surface.texts(), ["root", "a", "b"]);
    }

    #[test]
    fn renders_in_pre_order_and_insertion_order() {
        let tree: Box<dyn Widget> = Box::new(
            Tag::new("root")
                .with(Tag::new("a").with(Tag::new("a1")).with(Tag::new("a2")))
                .with(Tag::new("b"))
                .with(Tag::new("c").with(Tag::new("c1"))),
        );
        let mut surface = surface();
        tree.render(&mut surface).expect("render succeeds");
        assert_eq!(surface.texts(), ["root", "a", "a1", "a2", "b", "c", "c1"]);
        assert!(balanced(&surface));
    }

    #[test]
    fn margin_translation_is_additive() {
        let mut tag = Tag::new("inner");
        tag.set_margin(Edges::new(10.0, 5.0, 0.0, 0.0));
        let tag: Box<dyn Widget> = Box::new(tag);

        let mut surface = surface();
        surface.translate(3.0, 3.0);
        tag.render(&mut surface).expect("render succeeds");

        assert_eq!(surface.filled_rects(), [Rect::from_xywh(13.0, 8.0, 4.0, 4.0)]);
        assert_eq!(surface.origin(), Point::new(3.0, 3.0));
    }

    #[test]
    fn nested_margins_accumulate() {
        let mut child = Tag::new("child");
        child.set_margin(Edges::uniform(2.0));
        let mut parent = Tag::new("parent").with(child);
        parent.set_margin(Edges::new(10.0, 5.0, 0.0, 0.0));
        let parent: Box<dyn Widget> = Box::new(parent);

        let mut surface = surface();
        parent.render(&mut surface).expect("render succeeds");
        assert_eq!(
            surface.filled_rects(),
            [
                Rect::from_xywh(10.0, 5.0, 4.0, 4.0),
                Rect::from_xywh(12.0, 7.0, 4.0, 4.0)
            ]
        );
    }

    #[test]
    fn outer_size_adds_margin() {
        let mut tag = Tag::new("t");
        tag.set_margin(Edges::new(1.0, 2.0, 3.0, 4.0));
        let tag: Box<dyn Widget> = Box::new(tag);
        let metrics = crate::FixedMetrics::default();
        assert_eq!(tag.outer_size(&metrics), Size::new(8.0, 10.0));
    }

    #[test]
    fn count_includes_every_descendant() {
        let tree: Box<dyn Widget> =
            Box::new(Tag::new("r").with(Tag::new("a").with(Tag::new("a1"))).with(Tag::new("b")));
        assert_eq!(tree.count(), 4);
        assert_eq!(tree.children().len(), 2);
    }

    #[derive(Debug, Clone)]
    struct Shape {
        fails: bool,
        children: Vec<Shape>,
    }

    fn shape() -> impl Strategy<Value = Shape> {
        let leaf = prop::bool::weighted(0.1).prop_map(|fails| Shape {
            fails,
            children: Vec::new(),
        });
        leaf.prop_recursive(4, 48, 4, |inner| {
            (prop::bool::weighted(0.1), prop::collection::vec(inner, 0..4))
                .prop_map(|(fails, children)| Shape { fails, children })
        })
    }

    fn build(shape: &Shape, order: &mut Vec<(String, bool)>) -> Tag {
        let label = order.len().to_string();
        order.push((label.clone(), shape.fails));
        let mut tag = if shape.fails {
            Tag::failing(&label)
        } else {
            Tag::new(&label)
        };
        for child in &shape.children {
            let child = build(child, order);
            tag.add_widget(Box::new(child));
        }
        tag
    }

    proptest! {
        #[test]
        fn any_tree_renders_balanced_in_pre_order(shape in shape()) {
            let mut order = Vec::new();
            let tree: Box<dyn Widget> = Box::new(build(&shape, &mut order));
            let mut surface = surface();

            let result = tree.render(&mut surface);

            let first_failure = order.iter().position(|(_, fails)| *fails);
            let expected: Vec<&str> = match first_failure {
                Some(index) => order[..=index].iter().map(|(label, _)| label.as_str()).collect(),
                None => order.iter().map(|(label, _)| label.as_str()).collect(),
            };
            prop_assert_eq!(result.is_err(), first_failure.is_some());
            prop_assert_eq!(surface.texts(), expected);
            prop_assert!(balanced(&surface));
        }
    }
}
