//! XML to [`Node`] conversion.
//!
//! Only elements and their attributes are kept. Text, comments and
//! processing instructions are dropped, and namespaces are reduced to local
//! names.

use crate::{MarkupError, Node};

/// Parses `source` and converts its document element into a [`Node`] tree.
///
/// # Errors
///
/// Returns [`MarkupError::Syntax`] when `source` is not well-formed XML.
pub fn parse(source: &str) -> Result<Node, MarkupError> {
    let document = roxmltree::Document::parse(source)?;
    Ok(convert(document.root_element()))
}

fn convert(element: roxmltree::Node<'_, '_>) -> Node {
    let mut node = Node::new(element.tag_name().name());
    for attribute in element.attributes() {
        node.set_attribute(attribute.name(), attribute.value());
    }
    for child in element.children().filter(roxmltree::Node::is_element) {
        node.push(convert(child));
    }
    node
}
