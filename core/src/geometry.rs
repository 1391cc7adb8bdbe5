//! Geometry primitives shared by widgets and surfaces.

use core::str::FromStr;

use thiserror::Error;

/// Two-dimensional size expressed in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// A size with both extents set to zero.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new [`Size`].
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A position in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    /// Creates a new [`Point`].
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Upper-left corner.
    pub origin: Point,
    /// Extent of the rectangle.
    pub size: Size,
}

impl Rect {
    /// Creates a rectangle from its origin and size.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates a rectangle from its four components.
    #[must_use]
    pub const fn from_xywh(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self::new(Point::new(x, y), Size::new(width, height))
    }
}

/// Four independent offsets, one per side.
///
/// Used both as [`Margin`] (space outside a widget, consumed before it paints)
/// and as [`Padding`] (space inside a widget, honored by the widget itself).
/// Offsets are non-negative by convention; nothing enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    /// Offset on the left side.
    pub left: f64,
    /// Offset on the top side.
    pub top: f64,
    /// Offset on the right side.
    pub right: f64,
    /// Offset on the bottom side.
    pub bottom: f64,
}

/// Space outside a widget's painted bounds.
pub type Margin = Edges;

/// Space inside a widget's bounds, available for the widget's own layout.
pub type Padding = Edges;

impl Edges {
    /// No offset on any side.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Creates edges from the four offsets.
    #[must_use]
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Creates edges with the same offset on every side.
    #[must_use]
    pub const fn uniform(all: f64) -> Self {
        Self::new(all, all, all, all)
    }

    /// Sum of the left and right offsets.
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom offsets.
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Error returned when an edges string has the wrong shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid edges `{0}`, expected one value or four values (left top right bottom)")]
pub struct ParseEdgesError(pub String);

impl FromStr for Edges {
    type Err = ParseEdgesError;

    /// Parses `"4"` or `"left top right bottom"`; values may be separated by
    /// whitespace or commas and must be finite.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let values = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(|part| part.parse::<f64>().ok().filter(|value| value.is_finite()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ParseEdgesError(s.to_string()))?;

        match values.as_slice() {
            [all] => Ok(Self::uniform(*all)),
            [left, top, right, bottom] => Ok(Self::new(*left, *top, *right, *bottom)),
            _ => Err(ParseEdgesError(s.to_string())),
        }
    }
}
