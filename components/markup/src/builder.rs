use tidepool_core::Widget;
use tracing::debug;

use crate::{
    BuildError, MarkupError, Node, WidgetRegistry,
    attributes::{COMMON_ATTRIBUTES, edges},
    xml,
};

/// Document element whose children are each a root widget.
pub const INTERFACE_TAG: &str = "Interface";

/// Turns node trees into widget trees.
///
/// A build either produces the complete tree or fails as a whole; an unknown
/// tag or a malformed attribute value anywhere aborts it and nothing built so
/// far is returned.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    registry: WidgetRegistry,
}

impl TreeBuilder {
    /// Creates a builder resolving tags through `registry`.
    #[must_use]
    pub const fn new(registry: WidgetRegistry) -> Self {
        Self { registry }
    }

    /// The tag registry.
    #[must_use]
    pub const fn registry(&self) -> &WidgetRegistry {
        &self.registry
    }

    /// The tag registry, for registering more widget types.
    pub const fn registry_mut(&mut self) -> &mut WidgetRegistry {
        &mut self.registry
    }

    /// Builds the widget subtree rooted at `node`.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] for the first unknown tag or malformed
    /// attribute value, in document order.
    pub fn build(&self, node: &Node) -> Result<Box<dyn Widget>, BuildError> {
        self.build_at(node, node.tag())
    }

    /// Builds the root widgets of a document.
    ///
    /// An `<Interface>` document element contributes one root per child;
    /// any other element is the single root.
    ///
    /// # Errors
    ///
    /// Same as [`TreeBuilder::build`].
    pub fn build_roots(&self, document: &Node) -> Result<Vec<Box<dyn Widget>>, BuildError> {
        if document.tag() != INTERFACE_TAG {
            return Ok(vec![self.build(document)?]);
        }
        let roots = document
            .children()
            .iter()
            .enumerate()
            .map(|(index, child)| self.build_at(child, &child_path(INTERFACE_TAG, child, index)))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            roots = roots.len(),
            widgets = roots.iter().map(|root| root.count()).sum::<usize>(),
            "built interface"
        );
        Ok(roots)
    }

    /// Parses XML `source` and builds its root widgets.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::Syntax`] for malformed XML and
    /// [`MarkupError::Build`] when the tree cannot be built.
    pub fn build_xml(&self, source: &str) -> Result<Vec<Box<dyn Widget>>, MarkupError> {
        let document = xml::parse(source)?;
        Ok(self.build_roots(&document)?)
    }

    fn build_at(&self, node: &Node, path: &str) -> Result<Box<dyn Widget>, BuildError> {
        let constructor = self
            .registry
            .get(node.tag())
            .ok_or_else(|| BuildError::UnknownTag {
                tag: node.tag().to_string(),
                path: path.to_string(),
            })?;

        let mut widget = constructor(node).map_err(|rejected| BuildError::InvalidAttribute {
            attribute: rejected.attribute,
            path: path.to_string(),
            source: rejected.source,
        })?;
        apply_common_attributes(widget.as_mut(), node, path)?;

        for (index, child) in node.children().iter().enumerate() {
            let child_widget = self.build_at(child, &child_path(path, child, index))?;
            widget.add_widget(child_widget);
        }
        Ok(widget)
    }
}

fn apply_common_attributes(
    widget: &mut dyn Widget,
    node: &Node,
    path: &str,
) -> Result<(), BuildError> {
    for name in COMMON_ATTRIBUTES {
        let Some(value) = node.attribute(name) else {
            continue;
        };
        let parsed = edges(value).map_err(|source| BuildError::InvalidAttribute {
            attribute: (*name).to_string(),
            path: path.to_string(),
            source,
        })?;
        match *name {
            "margin" => widget.set_margin(parsed),
            _ => widget.set_padding(parsed),
        }
    }
    Ok(())
}

fn child_path(parent: &str, child: &Node, index: usize) -> String {
    format!("{parent}/{}[{index}]", child.tag())
}

#[cfg(test)]
mod tests {
    use tidepool_core::{Edges, FixedMetrics, RecordingSurface, Size, TextMetrics};
    use tidepool_widgets::{Button, HORIZONTAL_CHROME, VERTICAL_CHROME};

    use super::*;
    use crate::AttributeError;

    #[test]
    fn button_measures_its_text() {
        let builder = TreeBuilder::default();
        let button = builder
            .build(&Node::new("Button").with_attribute("text", "OK"))
            .expect("button builds");

        let metrics = FixedMetrics::new(7.0, 12.0);
        assert!(
            (button.width(&metrics) - (metrics.text_width("OK") + 2.0 * HORIZONTAL_CHROME)).abs()
                < f64::EPSILON
        );
        assert!((button.height(&metrics) - (12.0 + 2.0 * VERTICAL_CHROME)).abs() < f64::EPSILON);
    }

    #[test]
    fn unrecognized_attributes_are_ignored() {
        let builder = TreeBuilder::default();
        let plain = builder
            .build(&Node::new("Button").with_attribute("text", "OK"))
            .expect("builds");
        let extra = builder
            .build(
                &Node::new("Button")
                    .with_attribute("text", "OK")
                    .with_attribute("onclick", "quit()")
                    .with_attribute("width", "400"),
            )
            .expect("unknown attributes are ignored");
        assert_eq!(format!("{plain:?}"), format!("{extra:?}"));
    }

    #[test]
    fn common_attributes_apply_to_every_widget() {
        let builder = TreeBuilder::default();
        let panel = builder
            .build(
                &Node::new("VerticalPanel")
                    .with_attribute("margin", "10 5 0 0")
                    .with_attribute("padding", "2"),
            )
            .expect("panel builds");
        assert_eq!(panel.margin(), Edges::new(10.0, 5.0, 0.0, 0.0));
        assert_eq!(panel.padding(), Edges::uniform(2.0));
    }

    #[test]
    fn children_attach_in_document_order() {
        let tree = TreeBuilder::default()
            .build_xml(
                r#"<VerticalPanel>
                    <Button text="one"/>
                    <Button text="two"/>
                    <VerticalPanel><Button text="three"/></VerticalPanel>
                </VerticalPanel>"#,
            )
            .expect("tree builds");
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].count(), 5);

        let mut surface = RecordingSurface::new(Size::new(200.0, 200.0));
        tree[0].render(&mut surface).expect("tree renders");
        assert_eq!(surface.texts(), ["one", "two", "three"]);
    }

    #[test]
    fn unknown_tag_fails_the_whole_build_with_its_path() {
        let error = TreeBuilder::default()
            .build_xml(
                r#"<Interface>
                    <Button/>
                    <VerticalPanel><Button/><Slider value="3"/></VerticalPanel>
                </Interface>"#,
            )
            .expect_err("Slider is unknown");
        let MarkupError::Build(error) = error else {
            panic!("expected a build error, got {error:?}");
        };
        assert_eq!(
            error,
            BuildError::UnknownTag {
                tag: "Slider".to_string(),
                path: "Interface/VerticalPanel[1]/Slider[1]".to_string(),
            }
        );
    }

    #[test]
    fn malformed_attribute_fails_the_build() {
        let error = TreeBuilder::default()
            .build(
                &Node::new("VerticalPanel")
                    .with_child(Node::new("Button").with_attribute("margin", "wide")),
            )
            .expect_err("margin is malformed");
        assert_eq!(
            error,
            BuildError::InvalidAttribute {
                attribute: "margin".to_string(),
                path: "VerticalPanel/Button[0]".to_string(),
                source: AttributeError::new("one or four numbers", "wide"),
            }
        );

        let error = TreeBuilder::default()
            .build(&Node::new("Button").with_attribute("background", "red"))
            .expect_err("color is malformed");
        assert!(matches!(
            error,
            BuildError::InvalidAttribute { ref attribute, .. } if attribute == "background"
        ));
    }

    #[test]
    fn infinite_margin_fails_the_build() {
        let error = TreeBuilder::default()
            .build(&Node::new("Button").with_attribute("margin", "inf"))
            .expect_err("margin is not finite");
        assert_eq!(
            error,
            BuildError::InvalidAttribute {
                attribute: "margin".to_string(),
                path: "Button".to_string(),
                source: AttributeError::new("one or four numbers", "inf"),
            }
        );
    }

    #[test]
    fn interface_yields_one_root_per_child() {
        let roots = TreeBuilder::default()
            .build_xml(
                r#"<Interface>
                    <MainMenu><Menu title="File"/><Menu title="Edit"/></MainMenu>
                    <VerticalPanel><Button/></VerticalPanel>
                </Interface>"#,
            )
            .expect("interface builds");
        let names: Vec<_> = roots.iter().map(|root| root.type_name()).collect();
        assert_eq!(names, ["MainMenu", "VerticalPanel"]);

        let empty = TreeBuilder::default()
            .build_xml("<Interface/>")
            .expect("an empty interface is valid");
        assert!(empty.is_empty());
    }

    #[test]
    fn registered_types_become_available() {
        let mut builder = TreeBuilder::new(WidgetRegistry::empty());
        assert!(builder.build(&Node::new("Button")).is_err());
        builder.registry_mut().register::<Button>();
        let button = builder.build(&Node::new("Button")).expect("now registered");
        assert_eq!(button.type_name(), "Button");
    }
}
