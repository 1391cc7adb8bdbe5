//! Declarative construction of widget trees.
//!
//! Markup is first reduced to a generic [`Node`] tree (tag, attributes,
//! ordered children). The [`TreeBuilder`] then resolves every tag through a
//! [`WidgetRegistry`], constructs the widget with defaults and applies the
//! attributes its type understands.
//!
//! ```
//! use tidepool_markup::TreeBuilder;
//!
//! let roots = TreeBuilder::default()
//!     .build_xml(r#"<Interface><Button text="OK"/></Interface>"#)
//!     .unwrap();
//! assert_eq!(roots.len(), 1);
//! ```

pub mod attributes;
mod builder;
mod error;
mod node;
mod registry;
pub mod xml;

pub use attributes::{Markup, Setter};
pub use builder::{INTERFACE_TAG, TreeBuilder};
pub use error::{AttributeError, BuildError, MarkupError, RejectedAttribute};
pub use node::Node;
pub use registry::{Constructor, WidgetRegistry};
