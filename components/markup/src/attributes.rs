//! Per-type attribute tables.
//!
//! Every widget that can appear in markup lists the attributes it accepts
//! together with a typed setter. Attributes missing from the table are
//! ignored, so markup written for a newer or older widget set still loads.

use tidepool_core::{Color, Edges, Widget};
use tidepool_widgets::{Button, MainMenu, Menu, VerticalPanel};
use tracing::debug;

use crate::{AttributeError, Node, RejectedAttribute};

/// Applies one attribute value to a widget of type `W`.
pub type Setter<W> = fn(&mut W, &str) -> Result<(), AttributeError>;

/// Attributes every widget accepts. The tree builder applies them.
pub const COMMON_ATTRIBUTES: &[&str] = &["margin", "padding"];

/// A widget constructible from markup.
pub trait Markup: Widget + Default + 'static {
    /// Tag naming the widget in markup.
    const TAG: &'static str;

    /// Attribute names understood by this type with their setters.
    fn attributes() -> &'static [(&'static str, Setter<Self>)];
}

/// Creates a `W` with defaults and applies the recognized attributes of
/// `node`. Children and the common attributes are left to the caller.
///
/// # Errors
///
/// Fails on the first recognized attribute whose value the setter rejects.
pub fn construct<W: Markup>(node: &Node) -> Result<Box<dyn Widget>, RejectedAttribute> {
    let mut widget = W::default();
    let table = W::attributes();
    for (name, value) in node.attributes() {
        if let Some((_, setter)) = table.iter().find(|(known, _)| *known == name) {
            setter(&mut widget, value).map_err(|source| RejectedAttribute {
                attribute: name.to_string(),
                source,
            })?;
        } else if !COMMON_ATTRIBUTES.contains(&name) {
            debug!(tag = W::TAG, attribute = name, "ignoring unrecognized attribute");
        }
    }
    Ok(Box::new(widget))
}

/// Parses a `#rgb`, `#rrggbb` or `#rrggbbaa` color.
///
/// # Errors
///
/// Rejects anything else.
pub fn color(value: &str) -> Result<Color, AttributeError> {
    value
        .parse()
        .map_err(|_| AttributeError::new("a color like #rrggbb or #rrggbbaa", value))
}

/// Parses edges given as one value or four (left, top, right, bottom).
///
/// # Errors
///
/// Rejects other value counts and non-numeric values.
pub fn edges(value: &str) -> Result<Edges, AttributeError> {
    value
        .parse()
        .map_err(|_| AttributeError::new("one or four numbers", value))
}

/// Parses `true`/`false` (also `1`/`0`).
///
/// # Errors
///
/// Rejects anything else.
pub fn boolean(value: &str) -> Result<bool, AttributeError> {
    match value.trim() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(AttributeError::new("`true` or `false`", value)),
    }
}

const BUTTON_ATTRIBUTES: &[(&str, Setter<Button>)] = &[
    ("text", |button, value| {
        button.set_text(value);
        Ok(())
    }),
    ("background", |button, value| {
        button.set_background(color(value)?);
        Ok(())
    }),
    ("foreground", |button, value| {
        button.set_foreground(color(value)?);
        Ok(())
    }),
];

impl Markup for Button {
    const TAG: &'static str = "Button";

    fn attributes() -> &'static [(&'static str, Setter<Self>)] {
        BUTTON_ATTRIBUTES
    }
}

impl Markup for VerticalPanel {
    const TAG: &'static str = "VerticalPanel";

    fn attributes() -> &'static [(&'static str, Setter<Self>)] {
        &[]
    }
}

const MAIN_MENU_ATTRIBUTES: &[(&str, Setter<MainMenu>)] = &[("background", |bar, value| {
    bar.set_background(color(value)?);
    Ok(())
})];

impl Markup for MainMenu {
    const TAG: &'static str = "MainMenu";

    fn attributes() -> &'static [(&'static str, Setter<Self>)] {
        MAIN_MENU_ATTRIBUTES
    }
}

const MENU_ATTRIBUTES: &[(&str, Setter<Menu>)] = &[
    ("title", |menu, value| {
        menu.set_title(value);
        Ok(())
    }),
    ("expanded", |menu, value| {
        menu.set_expanded(boolean(value)?);
        Ok(())
    }),
    ("foreground", |menu, value| {
        menu.set_foreground(color(value)?);
        Ok(())
    }),
];

impl Markup for Menu {
    const TAG: &'static str = "Menu";

    fn attributes() -> &'static [(&'static str, Setter<Self>)] {
        MENU_ATTRIBUTES
    }
}
