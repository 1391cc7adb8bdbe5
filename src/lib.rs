//! # Tidepool
//!
//! A minimal retained-mode widget toolkit. An in-memory tree of widgets is
//! rendered every frame through an abstract drawing surface, and the shape of
//! the tree comes from declarative markup that can be reloaded while the
//! program runs.
//!
//! ```
//! use tidepool::{Program, RecordingSurface, Size};
//!
//! let mut program = Program::new();
//! program
//!     .load_user_interface_from_xml(
//!         r#"<Interface>
//!             <VerticalPanel padding="4">
//!                 <Button text="OK"/>
//!                 <Button text="Cancel" margin="0 2 0 0"/>
//!             </VerticalPanel>
//!         </Interface>"#,
//!     )
//!     .unwrap();
//!
//! let mut surface = RecordingSurface::new(Size::new(320.0, 240.0));
//! program.render(&mut surface).unwrap();
//! assert_eq!(surface.texts(), ["OK", "Cancel"]);
//! ```
//!
//! The pieces live in separate crates, re-exported here:
//!
//! - [`tidepool_core`]: the drawing surface, the widget contract and geometry;
//! - [`widgets`]: the built-in widget catalog;
//! - [`markup`]: markup parsing and the tree builder.
//!
//! This crate adds the [`Program`], which owns the live widget tree, swaps it
//! atomically on reload and drives the render loop against a [`Host`].

pub mod config;
mod error;
mod host;
pub mod logging;
mod program;
pub mod watch;

pub use error::Error;
pub use host::{Host, HostError};
pub use program::{Program, ReloadHandle, ReloadRequest};
pub use tidepool_core::{
    Alignment, Color, DrawCommand, Edges, FixedMetrics, Margin, Padding, PaintError, Point,
    Rect, RecordingSurface, Size, Surface, SurfaceGuard, TextMetrics, Widget, WidgetBase,
};
pub use tidepool_markup as markup;
pub use tidepool_widgets as widgets;
pub use watch::FileWatcher;
