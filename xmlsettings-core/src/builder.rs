//! Fluent builder producing a [`SettingsSchema`].
//!
//! The builder keeps an explicit stack of current-element handles:
//!
//! - [`SchemaBuilder::add_child_element`] adds below the current element and
//!   pushes the new element as the current one.
//! - [`SchemaBuilder::add_element`] adds a sibling of the current element
//!   (pops, then adds a child of the new top).
//! - [`SchemaBuilder::pop`] pops one level, needed for shapes like
//!   `<Parent><Child1><Grandchild/></Child1><Child2/></Parent>` where
//!   `Child2` sits two levels above `Grandchild`.
//!
//! Attribute, repeat, termination, and option calls all apply to the current
//! element. [`SchemaBuilder::build`] finalizes the immutable schema.

use crate::attribute::AttributeNode;
use crate::element::{ElementNode, GetValueFn, SetValueFn};
use crate::repeat::{RepeatBinding, RepeatItem};
use crate::schema::{ElementId, SchemaOptions, SettingsSchema};

/// Builder for a [`SettingsSchema`].
pub struct SchemaBuilder<T, P = ()> {
    namespace: Option<String>,
    nodes: Vec<ElementNode<T, P>>,
    stack: Vec<ElementId>,
    options: SchemaOptions,
}

impl<T, P> SchemaBuilder<T, P> {
    /// Creates a builder whose root element is `root_name`; the root becomes
    /// the current element.
    #[must_use]
    pub fn new(root_name: &str) -> Self {
        let root = ElementNode::new(root_name, None, None, None);
        Self {
            namespace: None,
            nodes: vec![root],
            stack: vec![ElementId(0)],
            options: SchemaOptions::default(),
        }
    }

    /// Sets the schema's default namespace, written as `xmlns` on the root.
    #[must_use]
    pub fn default_namespace(mut self, namespace: &str) -> Self {
        self.namespace = Some(namespace.to_string());
        self
    }

    /// Adds a new element as a child of the current element and makes it the
    /// current element.
    ///
    /// # Panics
    /// Panics if the root has been popped, or if the current element already
    /// has a child with this name.
    #[must_use]
    pub fn add_child_element(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
    ) -> Self {
        self.push_child(name, get, set, None)
    }

    /// [`Self::add_child_element`] with a namespace override for the element.
    #[must_use]
    pub fn add_child_element_ns(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
        namespace: &str,
    ) -> Self {
        self.push_child(name, get, set, Some(namespace.to_string()))
    }

    /// Adds a new element as a sibling of the current element: pops the
    /// current element, then adds a child of the new top.
    ///
    /// # Panics
    /// Panics if popping would leave no element to add to, or on a duplicate
    /// sibling name.
    #[must_use]
    pub fn add_element(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
    ) -> Self {
        self.pop().add_child_element(name, get, set)
    }

    /// [`Self::add_element`] with a namespace override for the element.
    #[must_use]
    pub fn add_element_ns(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
        namespace: &str,
    ) -> Self {
        self.pop().add_child_element_ns(name, get, set, namespace)
    }

    /// Pops the current element off the stack.
    ///
    /// # Panics
    /// Panics if the stack is already empty — there cannot be a second root.
    #[must_use]
    pub fn pop(mut self) -> Self {
        assert!(
            !self.stack.is_empty(),
            "schema builder stack is empty; cannot pop past the root"
        );
        self.stack.pop();
        self
    }

    /// Adds an attribute to the current element.
    ///
    /// # Panics
    /// Panics if the root has been popped, or if the current element already
    /// has an attribute with this name.
    #[must_use]
    pub fn add_attribute(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
    ) -> Self {
        self.push_attribute(name, get, set, None, false)
    }

    /// [`Self::add_attribute`] with a namespace for the attribute.
    #[must_use]
    pub fn add_attribute_ns(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
        namespace: &str,
    ) -> Self {
        self.push_attribute(name, get, set, Some(namespace.to_string()), false)
    }

    /// Adds an attribute that must resolve a value when writing.
    #[must_use]
    pub fn add_required_attribute(
        self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
    ) -> Self {
        self.push_attribute(name, get, set, None, true)
    }

    /// Marks the current element as required: it always appears in output,
    /// and must resolve a value when writing.
    #[must_use]
    pub fn required(mut self) -> Self {
        let current = self.current();
        self.nodes[current.0].mark_required();
        self
    }

    /// Marks the current element as repeating, binding the repeat callbacks.
    ///
    /// # Panics
    /// Panics if the current element is already repeating.
    #[must_use]
    pub fn set_repeating<C, R, M>(mut self, create: C, has_remaining: R, commit: M) -> Self
    where
        C: Fn(&mut T, Option<&RepeatItem<P>>) -> P + 'static,
        R: Fn(&mut T, Option<&RepeatItem<P>>) -> bool + 'static,
        M: Fn(&mut T, &RepeatItem<P>) + 'static,
    {
        let current = self.current();
        let node = &mut self.nodes[current.0];
        assert!(
            !node.is_repeating(),
            "element '{}' is already repeating",
            node.name()
        );
        node.set_repeating(RepeatBinding::new(
            Box::new(create),
            Box::new(has_remaining),
            Box::new(commit),
        ));
        self
    }

    /// Stops parsing cleanly once the current element's attributes have been
    /// read; no children are visited.
    #[must_use]
    pub fn terminate_after_reading_attributes(mut self) -> Self {
        let current = self.current();
        self.nodes[current.0].mark_stop_after_attributes();
        self
    }

    /// Stops parsing cleanly once the current element has been fully read
    /// (attributes, children, value, and any commit).
    #[must_use]
    pub fn terminate_after_reading_element(mut self) -> Self {
        let current = self.current();
        self.nodes[current.0].mark_stop_after_element();
        self
    }

    /// Silently skips document attributes with no matching schema attribute.
    #[must_use]
    pub fn discard_unknown_attributes(mut self) -> Self {
        self.options.discard_unknown_attributes = true;
        self
    }

    /// Silently skips values for matched attributes and elements that have
    /// no setter.
    #[must_use]
    pub fn discard_attributes_without_setter(mut self) -> Self {
        self.options.discard_attributes_without_setter = true;
        self
    }

    /// Finalizes and returns the immutable schema.
    #[must_use]
    pub fn build(self) -> SettingsSchema<T, P> {
        SettingsSchema::new(self.namespace, self.nodes, ElementId(0), self.options)
    }

    fn current(&self) -> ElementId {
        *self
            .stack
            .last()
            .expect("schema builder stack is empty; no current element")
    }

    fn push_child(
        mut self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
        namespace: Option<String>,
    ) -> Self {
        let parent = self.current();
        let duplicate = self.nodes[parent.0]
            .children()
            .iter()
            .any(|&id| self.nodes[id.0].name() == name);
        assert!(
            !duplicate,
            "element '{}' already has a child named '{name}'",
            self.nodes[parent.0].name()
        );

        let id = ElementId(self.nodes.len());
        self.nodes.push(ElementNode::new(name, namespace, get, set));
        self.nodes[parent.0].add_child(id);
        self.stack.push(id);
        self
    }

    fn push_attribute(
        mut self,
        name: &str,
        get: Option<GetValueFn<T, P>>,
        set: Option<SetValueFn<T, P>>,
        namespace: Option<String>,
        required: bool,
    ) -> Self {
        let current = self.current();
        let node = &mut self.nodes[current.0];
        assert!(
            node.find_attribute(name).is_none(),
            "element '{}' already has an attribute named '{name}'",
            node.name()
        );

        let mut attribute = AttributeNode::new(name, namespace, get, set);
        if required {
            attribute.mark_required();
        }
        node.add_attribute(attribute);
        self
    }
}
