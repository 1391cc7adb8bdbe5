use core::fmt;
use std::collections::HashMap;

use tidepool_core::Widget;
use tidepool_widgets::{Button, MainMenu, Menu, VerticalPanel};

use crate::{
    Node, RejectedAttribute,
    attributes::{Markup, construct},
};

/// Creates a widget for a node, applying its type-specific attributes.
pub type Constructor = Box<dyn Fn(&Node) -> Result<Box<dyn Widget>, RejectedAttribute>>;

/// Maps markup tags to widget constructors.
pub struct WidgetRegistry {
    constructors: HashMap<String, Constructor>,
}

impl WidgetRegistry {
    /// A registry without any tag.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// A registry holding the built-in catalog.
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::empty();
        registry.register::<Button>();
        registry.register::<VerticalPanel>();
        registry.register::<MainMenu>();
        registry.register::<Menu>();
        registry
    }

    /// Registers `W` under [`Markup::TAG`], replacing any previous entry.
    pub fn register<W: Markup>(&mut self) -> &mut Self {
        self.register_with(W::TAG, construct::<W>)
    }

    /// Registers a custom constructor under `tag`, replacing any previous
    /// entry.
    pub fn register_with(
        &mut self,
        tag: impl Into<String>,
        constructor: impl Fn(&Node) -> Result<Box<dyn Widget>, RejectedAttribute> + 'static,
    ) -> &mut Self {
        self.constructors.insert(tag.into(), Box::new(constructor));
        self
    }

    /// Constructor for `tag`.
    #[must_use]
    pub fn get(&self, tag: &str) -> Option<&Constructor> {
        self.constructors.get(tag)
    }

    /// Whether `tag` has a constructor.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.constructors.contains_key(tag)
    }

    /// Registered tags, sorted.
    #[must_use]
    pub fn tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        tags.sort_unstable();
        tags
    }
}

impl Default for WidgetRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for WidgetRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRegistry")
            .field("tags", &self.tags())
            .finish()
    }
}
