//! Error types for schema building, serialization, and deserialization.

use thiserror::Error;

/// Error raised by a host value accessor when a raw document value cannot be
/// converted into the host's field type.
#[derive(Debug, Error)]
#[error("invalid value '{value}' for {target}: {reason}")]
pub struct ValueError {
    /// The element or attribute whose setter rejected the value.
    pub target: String,
    /// The raw value taken from the document.
    pub value: String,
    /// Host-supplied reason, typically a conversion error message.
    pub reason: String,
}

impl ValueError {
    /// Creates a value error for the given target and raw value.
    pub fn new(
        target: impl Into<String>,
        value: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self {
            target: target.into(),
            value: value.into(),
            reason: reason.to_string(),
        }
    }
}

/// Error type for serialization.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The root element produced no output at all.
    #[error("root element '{element}' produced no output and is not required")]
    RootSuppressed {
        /// Root element name.
        element: String,
    },

    /// A required element resolved no value.
    #[error("missing required value for element '{element}'")]
    MissingRequiredValue {
        /// Element name.
        element: String,
    },

    /// A required attribute resolved no value.
    #[error("missing required value for attribute '{attribute}' on element '{element}'")]
    MissingRequiredAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// An element resolved a text value while also declaring children.
    #[error("element '{element}' resolves a text value but also has children")]
    MixedContent {
        /// Element name.
        element: String,
    },
}

impl WriteError {
    /// Creates a root-suppressed error.
    pub fn root_suppressed(element: impl Into<String>) -> Self {
        Self::RootSuppressed {
            element: element.into(),
        }
    }

    /// Creates a missing required element value error.
    pub fn missing_value(element: impl Into<String>) -> Self {
        Self::MissingRequiredValue {
            element: element.into(),
        }
    }

    /// Creates a missing required attribute value error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates a mixed content error.
    pub fn mixed_content(element: impl Into<String>) -> Self {
        Self::MixedContent {
            element: element.into(),
        }
    }
}

/// Error type for deserialization.
#[derive(Debug, Error)]
pub enum ReadError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Malformed attribute syntax.
    #[error("malformed attribute: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),

    /// Entity escape error.
    #[error("entity escape error: {0}")]
    Escape(#[from] quick_xml::escape::EscapeError),

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The document's root element does not match the schema's root.
    #[error("expected root element '{expected}', found '{actual}'")]
    RootMismatch {
        /// Root name the schema declares.
        expected: String,
        /// Root name found in the document.
        actual: String,
    },

    /// The document ended while an element was still open.
    #[error("unexpected end of document while reading '{context}'")]
    UnexpectedEof {
        /// Element being read when the document ended.
        context: String,
    },

    /// An element with no matching schema child.
    #[error("unknown element '{element}' under '{parent}'")]
    UnknownElement {
        /// Element name found in the document.
        element: String,
        /// Schema element it appeared under.
        parent: String,
    },

    /// An attribute with no matching schema attribute.
    #[error("unknown attribute '{attribute}' on element '{element}'")]
    UnknownAttribute {
        /// Attribute name found in the document.
        attribute: String,
        /// Element it appeared on.
        element: String,
    },

    /// Text content arrived for an element that has no setter.
    #[error("element '{element}' has text content but no setter")]
    ElementWithoutSetter {
        /// Element name.
        element: String,
    },

    /// A matched attribute has no setter.
    #[error("attribute '{attribute}' on element '{element}' has no setter")]
    AttributeWithoutSetter {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// A host setter rejected a document value.
    #[error(transparent)]
    Value(#[from] ValueError),
}

impl ReadError {
    /// Creates a root mismatch error.
    pub fn root_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::RootMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates an unexpected end-of-document error.
    pub fn unexpected_eof(context: impl Into<String>) -> Self {
        Self::UnexpectedEof {
            context: context.into(),
        }
    }

    /// Creates an unknown element error.
    pub fn unknown_element(element: impl Into<String>, parent: impl Into<String>) -> Self {
        Self::UnknownElement {
            element: element.into(),
            parent: parent.into(),
        }
    }

    /// Creates an unknown attribute error.
    pub fn unknown_attribute(attribute: impl Into<String>, element: impl Into<String>) -> Self {
        Self::UnknownAttribute {
            attribute: attribute.into(),
            element: element.into(),
        }
    }

    /// Creates an element-without-setter error.
    pub fn element_without_setter(element: impl Into<String>) -> Self {
        Self::ElementWithoutSetter {
            element: element.into(),
        }
    }

    /// Creates an attribute-without-setter error.
    pub fn attribute_without_setter(
        element: impl Into<String>,
        attribute: impl Into<String>,
    ) -> Self {
        Self::AttributeWithoutSetter {
            element: element.into(),
            attribute: attribute.into(),
        }
    }
}
