use thiserror::Error;

/// A recognized attribute carried a value its setter could not accept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found `{value}`")]
pub struct AttributeError {
    /// What the setter accepts, e.g. "a color like #rrggbb".
    pub expected: &'static str,
    /// The rejected value.
    pub value: String,
}

impl AttributeError {
    /// Creates an error for `value`.
    #[must_use]
    pub fn new(expected: &'static str, value: impl Into<String>) -> Self {
        Self {
            expected,
            value: value.into(),
        }
    }
}

/// Failure turning a node tree into widgets. The whole build is discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// No constructor is registered for the tag.
    #[error("unknown widget `{tag}` at {path}")]
    UnknownTag {
        /// The unresolved tag.
        tag: String,
        /// Slash-separated path of the node, e.g. `Interface/VerticalPanel[1]`.
        path: String,
    },
    /// A recognized attribute had a malformed value.
    #[error("invalid `{attribute}` on {path}: {source}")]
    InvalidAttribute {
        /// Attribute name.
        attribute: String,
        /// Slash-separated path of the node.
        path: String,
        /// Why the value was rejected.
        source: AttributeError,
    },
}

/// Failure loading markup text into widgets.
#[derive(Debug, Error)]
pub enum MarkupError {
    /// The text is not well-formed XML.
    #[error("malformed markup: {0}")]
    Syntax(#[from] roxmltree::Error),
    /// The document parsed but could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// An attribute rejected while constructing a single widget.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid `{attribute}`: {source}")]
pub struct RejectedAttribute {
    /// Attribute name.
    pub attribute: String,
    /// Why the value was rejected.
    pub source: AttributeError,
}
