//! Schema attribute nodes.

use crate::element::{GetValueFn, SetValueFn};
use crate::error::ValueError;
use crate::repeat::RepeatItem;

/// A declared, named attribute on an element, with its own value accessors.
///
/// Attributes share the accessor shape of elements — including the repeat
/// item argument, so an attribute on a repeating element (a map key, say)
/// reads and writes the item currently in flight.
pub struct AttributeNode<T, P> {
    name: String,
    namespace: Option<String>,
    required: bool,
    get: Option<GetValueFn<T, P>>,
    set: Option<SetValueFn<T, P>>,
}

impl<T, P> AttributeNode<T, P> {
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
        }
    }

    /// The attribute name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The attribute's namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Returns true if the attribute must resolve a value when writing.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Returns true if the attribute has a value setter.
    #[must_use]
    pub fn has_setter(&self) -> bool {
        self.set.is_some()
    }

    /// Resolves the attribute value through its getter.
    #[must_use]
    pub fn get_value(&self, host: &T, item: Option<&RepeatItem<P>>) -> Option<String> {
        self.get.as_ref().and_then(|get| get(host, item))
    }

    /// Sets the attribute value through its setter.
    ///
    /// A no-op when the attribute has no setter; the reader decides
    /// beforehand whether a missing setter is an error.
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

    pub(crate) fn mark_required(&mut self) {
        self.required = true;
    }
}
