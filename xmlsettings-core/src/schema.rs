//! The finished schema description.

use crate::element::ElementNode;

/// Identifier of an element node within a schema's node arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub(crate) usize);

/// Global options affecting how a schema reads documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOptions {
    /// Silently skip document attributes with no matching schema attribute.
    pub discard_unknown_attributes: bool,
    /// Silently skip values for matched attributes/elements with no setter.
    pub discard_attributes_without_setter: bool,
}

/// A complete description of an XML settings document, used to serialize or
/// deserialize host objects of type `T`.
///
/// `P` is the repeat-item payload type; schemas without repeating elements
/// leave it at the `()` default. A schema is immutable once built and can be
/// reused across any number of sequential read and write calls — per-call
/// state lives in the engines and in the host.
pub struct SettingsSchema<T, P = ()> {
    namespace: Option<String>,
    nodes: Vec<ElementNode<T, P>>,
    root: ElementId,
    options: SchemaOptions,
}

impl<T, P> SettingsSchema<T, P> {
    pub(crate) fn new(
        namespace: Option<String>,
        nodes: Vec<ElementNode<T, P>>,
        root: ElementId,
        options: SchemaOptions,
    ) -> Self {
        Self {
            namespace,
            nodes,
            root,
            options,
        }
    }

    /// The schema's default namespace, written as `xmlns` on the root.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// The root element id.
    #[must_use]
    pub fn root(&self) -> ElementId {
        self.root
    }

    /// Looks up an element node by id.
    #[must_use]
    pub fn node(&self, id: ElementId) -> &ElementNode<T, P> {
        &self.nodes[id.0]
    }

    /// The global read options.
    #[must_use]
    pub fn options(&self) -> SchemaOptions {
        self.options
    }

    /// Finds a child of `parent` by element name.
    #[must_use]
    pub fn find_child(&self, parent: ElementId, name: &str) -> Option<ElementId> {
        self.nodes[parent.0]
            .children()
            .iter()
            .copied()
            .find(|&id| self.nodes[id.0].name() == name)
    }
}
