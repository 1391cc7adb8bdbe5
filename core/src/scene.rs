//! A surface that records draw calls instead of rasterizing them.
//!
//! Used to test widget paint logic without a display: every call is captured
//! as a [`DrawCommand`] with translations already applied, and the save/restore
//! stack depth is tracked so that leaks show up as assertions instead of
//! corrupted pixels.

use tracing::warn;

use crate::{
    color::Color,
    geometry::{Point, Rect, Size},
    surface::{Alignment, Surface, TextMetrics},
};

/// Primitive drawing operations captured by [`RecordingSurface`].
///
/// Rectangles are in absolute surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The drawing state was pushed.
    Save,
    /// The drawing state was popped.
    Restore,
    /// The origin moved by the given offset.
    Translate {
        /// Horizontal offset.
        dx: f64,
        /// Vertical offset.
        dy: f64,
    },
    /// The current color changed.
    SetColor(Color),
    /// Antialiasing was toggled.
    SetAntialias(bool),
    /// The stroke width changed.
    SetLineWidth(f64),
    /// A filled rectangle.
    FillRect {
        /// Rectangle in absolute coordinates.
        rect: Rect,
        /// Color at the time of the call.
        color: Color,
    },
    /// An outlined rectangle.
    StrokeRect {
        /// Rectangle in absolute coordinates.
        rect: Rect,
        /// Color at the time of the call.
        color: Color,
        /// Stroke width at the time of the call.
        line_width: f64,
    },
    /// A run of text laid out inside a box.
    Text {
        /// Layout box in absolute coordinates.
        rect: Rect,
        /// Text content.
        content: String,
        /// Horizontal alignment inside the box.
        alignment: Alignment,
        /// Color at the time of the call.
        color: Color,
    },
}

/// Monospaced metrics: every character advances by the same amount.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedMetrics {
    /// Horizontal advance of one character.
    pub advance: f64,
    /// Height of one line.
    pub line_height: f64,
}

impl FixedMetrics {
    /// Creates metrics with the given advance and line height.
    #[must_use]
    pub const fn new(advance: f64, line_height: f64) -> Self {
        Self {
            advance,
            line_height,
        }
    }
}

impl Default for FixedMetrics {
    fn default() -> Self {
        Self::new(8.0, 16.0)
    }
}

impl TextMetrics for FixedMetrics {
    #[allow(clippy::cast_precision_loss)]
    fn text_width(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.advance
    }

    fn line_height(&self) -> f64 {
        self.line_height
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct State {
    origin: Point,
    color: Color,
    line_width: f64,
    antialias: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            color: Color::BLACK,
            line_width: 1.0,
            antialias: true,
        }
    }
}

/// [`Surface`] implementation that records every call.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    size: Size,
    metrics: FixedMetrics,
    state: State,
    stack: Vec<State>,
    commands: Vec<DrawCommand>,
    max_depth: usize,
    unbalanced_restores: usize,
}

impl RecordingSurface {
    /// Creates a recording surface of the given size with [`FixedMetrics::default`].
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self::with_metrics(size, FixedMetrics::default())
    }

    /// Creates a recording surface with custom metrics.
    #[must_use]
    pub fn with_metrics(size: Size, metrics: FixedMetrics) -> Self {
        Self {
            size,
            metrics,
            state: State::default(),
            stack: Vec::new(),
            commands: Vec::new(),
            max_depth: 0,
            unbalanced_restores: 0,
        }
    }

    /// Returns every recorded command in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Removes and returns the recorded commands, keeping the current state.
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        core::mem::take(&mut self.commands)
    }

    /// Current save/restore stack depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Deepest stack depth reached so far.
    #[must_use]
    pub const fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Number of `restore` calls made with an empty stack.
    #[must_use]
    pub const fn unbalanced_restores(&self) -> usize {
        self.unbalanced_restores
    }

    /// Current absolute origin after all active translations.
    #[must_use]
    pub const fn origin(&self) -> Point {
        self.state.origin
    }

    /// Current color.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.state.color
    }

    /// Absolute rectangles of every fill, in call order.
    #[must_use]
    pub fn filled_rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect()
    }

    /// Every text run, in call order.
    #[must_use]
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Text { content, .. } => Some(content.as_str()),
                _ => None,
            })
            .collect()
    }

    fn absolute(&self, x: f64, y: f64, width: f64, height: f64) -> Rect {
        Rect::from_xywh(
            self.state.origin.x + x,
            self.state.origin.y + y,
            width,
            height,
        )
    }
}

impl Surface for RecordingSurface {
    fn metrics(&self) -> &dyn TextMetrics {
        &self.metrics
    }

    fn size(&self) -> Size {
        self.size
    }

    fn save(&mut self) {
        self.stack.push(self.state);
        self.max_depth = self.max_depth.max(self.stack.len());
        self.commands.push(DrawCommand::Save);
    }

    fn restore(&mut self) {
        if let Some(state) = self.stack.pop() {
            self.state = state;
        } else {
            warn!("restore called without a matching save");
            self.unbalanced_restores += 1;
        }
        self.commands.push(DrawCommand::Restore);
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.state.origin.x += dx;
        self.state.origin.y += dy;
        self.commands.push(DrawCommand::Translate { dx, dy });
    }

    fn set_color(&mut self, color: Color) {
        self.state.color = color;
        self.commands.push(DrawCommand::SetColor(color));
    }

    fn set_antialias(&mut self, enabled: bool) {
        self.state.antialias = enabled;
        self.commands.push(DrawCommand::SetAntialias(enabled));
    }

    fn set_line_width(&mut self, width: f64) {
        self.state.line_width = width;
        self.commands.push(DrawCommand::SetLineWidth(width));
    }

    fn fill_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.absolute(x, y, width, height);
        self.commands.push(DrawCommand::FillRect {
            rect,
            color: self.state.color,
        });
    }

    fn draw_rectangle(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let rect = self.absolute(x, y, width, height);
        self.commands.push(DrawCommand::StrokeRect {
            rect,
            color: self.state.color,
            line_width: self.state.line_width,
        });
    }

    fn draw_text(
        &mut self,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        text: &str,
        alignment: Alignment,
    ) {
        let rect = self.absolute(x, y, width, height);
        self.commands.push(DrawCommand::Text {
            rect,
            content: text.to_string(),
            alignment,
            color: self.state.color,
        });
    }
}
