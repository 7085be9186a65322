//! Schema element nodes and value accessors.

use crate::attribute::AttributeNode;
use crate::error::ValueError;
use crate::repeat::{RepeatBinding, RepeatItem};
use crate::schema::ElementId;

/// Boxed getter: resolves a node's text value from the host, or `None` when
/// the host has no value for it.
///
/// The second argument is the repeat item for the current iteration when the
/// node sits inside a repeating element.
pub type GetValueFn<T, P> = Box<dyn Fn(&T, Option<&RepeatItem<P>>) -> Option<String>>;

/// Boxed setter: folds a raw document value into the host.
pub type SetValueFn<T, P> =
    Box<dyn Fn(&mut T, &str, Option<&RepeatItem<P>>) -> Result<(), ValueError>>;

/// Wraps a closure as an optional boxed getter for builder calls.
pub fn getter<T, P, F>(f: F) -> Option<GetValueFn<T, P>>
where
    F: Fn(&T, Option<&RepeatItem<P>>) -> Option<String> + 'static,
{
    Some(Box::new(f))
}

/// Wraps a closure as an optional boxed setter for builder calls.
pub fn setter<T, P, F>(f: F) -> Option<SetValueFn<T, P>>
where
    F: Fn(&mut T, &str, Option<&RepeatItem<P>>) -> Result<(), ValueError> + 'static,
{
    Some(Box::new(f))
}

/// A declared, named position in the XML tree, with optional value accessors,
/// attributes, and children.
pub struct ElementNode<T, P> {
    name: String,
    namespace: Option<String>,
    required: bool,
    get: Option<GetValueFn<T, P>>,
    set: Option<SetValueFn<T, P>>,
    children: Vec<ElementId>,
    attributes: Vec<AttributeNode<T, P>>,
    repeat: Option<RepeatBinding<T, P>>,
    stop_after_attributes: bool,
    stop_after_element: bool,
}

impl<T, P> ElementNode<T, P> {
    pub(crate) fn new(
        name: impl Into<String>,
        namespace: Option<String>,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
    ) -> Self {
        Self {
            name: name.into(),
            namespace,
            required: false,
            get,
            set,
            children: Vec::new(),
            attributes: Vec::new(),
            repeat: None,
            stop_after_attributes: false,
            stop_after_element: false,
        }
    }

    /// The element name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The element's namespace override, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns true if the element must resolve a value when writing.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if the element is marked repeating.
    #[must_use]
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Returns true if the element has a value getter.
    #[must_use]
    pub fn has_getter(&self) -> bool {
        self.get.is_some()
    }

    /// Returns true if the element has a value setter.
    #[must_use]
    pub fn has_setter(&self) -> bool {
        self.set.is_some()
    }

    /// Child element ids, in declaration order.
    #[must_use]
    pub fn children(&self) -> &[ElementId] {
        &self.children
    }

    /// Attributes, in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeNode<T, P>] {
        &self.attributes
    }

    /// The repeat binding, when the element is repeating.
    #[must_use]
    pub fn repeat(&self) -> Option<&RepeatBinding<T, P>> {
        self.repeat.as_ref()
    }

    /// Returns true if parsing stops after this element's attributes.
    #[must_use]
    pub fn stops_after_attributes(&self) -> bool {
        self.stop_after_attributes
    }

    /// Returns true if parsing stops after this whole element.
    #[must_use]
    pub fn stops_after_element(&self) -> bool {
        self.stop_after_element
    }

    /// Finds a declared attribute by name.
    #[must_use]
    pub fn find_attribute(&self, name: &str) -> Option<&AttributeNode<T, P>> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    /// Resolves the element's text value through its getter.
    ///
    /// Returns `None` when the element has no getter or the getter resolves
    /// no value.
    #[must_use]
    pub fn get_value(&self, host: &T, item: Option<&RepeatItem<P>>) -> Option<String> {
        self.get.as_ref().and_then(|get| get(host, item))
    }

    /// Sets the element's value through its setter.
    ///
    /// A no-op when the element has no setter; the engines decide beforehand
    /// whether a missing setter is an error.
    pub fn set_value(
        &self,
        host: &mut T,
        value: &str,
        item: Option<&RepeatItem<P>>,
    ) -> Result<(), ValueError> {
        match &self.set {
            Some(set) => set(host, value, item),
            None => Ok(()),
        }
    }

    pub(crate) fn add_child(&mut self, child: ElementId) {
        self.children.push(child);
    }

    pub(crate) fn add_attribute(&mut self, attribute: AttributeNode<T, P>) {
        self.attributes.push(attribute);
    }

    pub(crate) fn set_repeating(&mut self, binding: RepeatBinding<T, P>) {
        self.repeat = Some(binding);
    }

    pub(crate) fn mark_required(&mut self) {
        self.required = true;
    }

    pub(crate) fn mark_stop_after_attributes(&mut self) {
        self.stop_after_attributes = true;
    }

    pub(crate) fn mark_stop_after_element(&mut self) {
        self.stop_after_element = true;
    }
}
