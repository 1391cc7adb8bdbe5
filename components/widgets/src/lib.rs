//! Built-in widgets.
//!
//! Every widget here follows the same contract: report an intrinsic size
//! through `width`/`height`, paint only inside that size, honor its own
//! padding, and position its children itself when it is a container.

mod button;
mod menu;
mod panel;
mod stack;

pub use button::Button;
pub use menu::{MainMenu, Menu};
pub use panel::VerticalPanel;

/// Space between a widget's border and its text, horizontally.
pub const HORIZONTAL_CHROME: f64 = 8.0;

/// Space between a widget's border and its text, vertically.
pub const VERTICAL_CHROME: f64 = 4.0;
