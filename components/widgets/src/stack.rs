//! Sequential placement of children along one axis.

use tidepool_core::{PaintError, Point, Size, Surface, SurfaceGuard, TextMetrics, Widget};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    const fn main(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    const fn cross(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.height,
            Self::Vertical => size.width,
        }
    }
}

/// Size of `children` placed one after another: outer extents summed along
/// `axis`, the largest outer extent across it.
pub fn stacked_size(children: &[Box<dyn Widget>], axis: Axis, metrics: &dyn TextMetrics) -> Size {
    let (main, cross) = children
        .iter()
        .map(|child| child.outer_size(metrics))
        .fold((0.0_f64, 0.0_f64), |(main, cross), size| {
            (main + axis.main(size), cross.max(axis.cross(size)))
        });
    match axis {
        Axis::Horizontal => Size::new(main, cross),
        Axis::Vertical => Size::new(cross, main),
    }
}

/// Renders `children` starting at `origin`, advancing by each child's outer
/// extent along `axis`.
pub fn render_stacked(
    children: &[Box<dyn Widget>],
    axis: Axis,
    origin: Point,
    surface: &mut dyn Surface,
) -> Result<(), PaintError> {
    let advances: Vec<f64> = children
        .iter()
        .map(|child| axis.main(child.outer_size(surface.metrics())))
        .collect();

    let mut scoped = SurfaceGuard::new(surface);
    scoped.translate(origin.x, origin.y);
    for (child, advance) in children.iter().zip(advances) {
        child.render(&mut *scoped)?;
        match axis {
            Axis::Horizontal => scoped.translate(advance, 0.0),
            Axis::Vertical => scoped.translate(0.0, advance),
        }
    }
    Ok(())
}
