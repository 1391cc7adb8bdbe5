//! Core contracts of the Tidepool toolkit.
//!
//! Every widget paints exclusively through the [`Surface`] capability, and every
//! widget tree is composed of exclusively owned [`Widget`] nodes. The public
//! [`render`](trait@Widget) entry point applies margins, paints the widget and then
//! recurses into its children while a [`SurfaceGuard`] keeps the drawing state
//! stack balanced on every exit path.
//!
//! [`RecordingSurface`] is a backend that records calls instead of rasterizing,
//! which lets widget paint logic be tested without a display.

pub mod color;
pub mod geometry;
pub mod scene;
pub mod surface;
pub mod widget;

#[doc(inline)]
pub use color::{Color, ParseColorError};
#[doc(inline)]
pub use geometry::{Edges, Margin, Padding, ParseEdgesError, Point, Rect, Size};
#[doc(inline)]
pub use scene::{DrawCommand, FixedMetrics, RecordingSurface};
#[doc(inline)]
pub use surface::{Alignment, Surface, SurfaceGuard, TextMetrics};
#[doc(inline)]
pub use widget::{PaintError, Widget, WidgetBase};
