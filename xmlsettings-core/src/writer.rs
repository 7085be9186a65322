//! Schema-driven serialization.
//!
//! Walks the schema tree against a host object and emits XML through
//! [`XmlEmitter`]. Elements are *latent*: an element's start tag is not
//! written when the element is entered but queued, and the queue is flushed
//! — oldest first — the moment something inside the subtree proves the
//! element must exist (a present attribute value, a required flag, a
//! resolved text value). An optional subtree whose every descendant resolves
//! nothing therefore produces no output at all, not even an empty tag.

use std::rc::Rc;

use crate::emit::XmlEmitter;
use crate::error::WriteError;
use crate::repeat::RepeatItem;
use crate::schema::{ElementId, SettingsSchema};

/// Serializes `host` into an XML document described by `schema`.
///
/// The host is borrowed mutably because write-side repeat callbacks may
/// advance host-held enumeration cursors.
///
/// # Errors
/// Returns `WriteError` if the root produces no output, a required element
/// or attribute resolves no value, or an element resolves both a text value
/// and children.
pub fn serialize<T, P>(schema: &SettingsSchema<T, P>, host: &mut T) -> Result<String, WriteError> {
    let mut serializer = Serializer {
        schema,
        emitter: XmlEmitter::new(),
        latent: Vec::new(),
    };

    serializer.emitter.start_document();

    let root = schema.root();
    if !serializer.write_element(host, root, None)? {
        return Err(WriteError::root_suppressed(schema.node(root).name()));
    }

    Ok(serializer.emitter.into_string())
}

struct Serializer<'a, T, P> {
    schema: &'a SettingsSchema<T, P>,
    emitter: XmlEmitter,
    latent: Vec<ElementId>,
}

impl<T, P> Serializer<'_, T, P> {
    /// Writes one schema element, enumerating instances when it repeats.
    /// Returns true if anything was emitted for this slot.
    fn write_element(
        &mut self,
        host: &mut T,
        id: ElementId,
        parent_item: Option<&Rc<RepeatItem<P>>>,
    ) -> Result<bool, WriteError> {
        let schema = self.schema;
        let node = schema.node(id);

        match node.repeat() {
            Some(binding) => {
                let mut wrote = false;
                while binding.has_remaining(host, parent_item) {
                    let item = binding.create_item(host, parent_item, id);
                    wrote |= self.write_single(host, id, Some(&item))?;
                }
                Ok(wrote)
            }
            None => self.write_single(host, id, parent_item),
        }
    }

    /// Writes a single element instance. Returns true if the element was
    /// opened (and therefore closed); false if it stayed latent throughout.
    fn write_single(
        &mut self,
        host: &mut T,
        id: ElementId,
        item: Option<&Rc<RepeatItem<P>>>,
    ) -> Result<bool, WriteError> {
        let schema = self.schema;
        let node = schema.node(id);
        let value = node.get_value(host, item.map(Rc::as_ref));

        // latent until something in the subtree proves it exists
        self.latent.push(id);
        let mut wrote = false;

        for attribute in node.attributes() {
            wrote |= self.write_attribute(host, node.name(), attribute, item)?;
        }

        if node.is_required() && value.is_none() {
            return Err(WriteError::missing_value(node.name()));
        }
        if node.is_required() || value.is_some() {
            self.flush_latent();
            wrote = true;
        }

        if let Some(text) = value {
            if !node.children().is_empty() {
                return Err(WriteError::mixed_content(node.name()));
            }
            self.emitter.write_text(&text);
            self.emitter.end_element();
            return Ok(true);
        }

        for &child in node.children() {
            wrote |= self.write_element(host, child, item)?;
        }

        if wrote {
            self.emitter.end_element();
        } else {
            // never opened: drop our own latent entry, so a later sibling's
            // flush cannot resurrect this empty subtree
            let dropped = self.latent.pop();
            debug_assert_eq!(dropped, Some(id));
            tracing::trace!(element = node.name(), "suppressed empty optional subtree");
        }

        Ok(wrote)
    }

    /// Resolves and conditionally writes one attribute, opening any latent
    /// elements first. Returns true if the attribute was written.
    fn write_attribute(
        &mut self,
        host: &T,
        element: &str,
        attribute: &crate::attribute::AttributeNode<T, P>,
        item: Option<&Rc<RepeatItem<P>>>,
    ) -> Result<bool, WriteError> {
        let value = attribute.get_value(host, item.map(Rc::as_ref));

        if attribute.is_required() && value.is_none() {
            return Err(WriteError::missing_attr(element, attribute.name()));
        }

        match value {
            Some(value) => {
                self.flush_latent();
                self.emitter.write_attribute(attribute.name(), &value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Opens every queued start tag, oldest first.
    fn flush_latent(&mut self) {
        for id in std::mem::take(&mut self.latent) {
            let node = self.schema.node(id);
            self.emitter.start_element(node.name());

            if id == self.schema.root() {
                if let Some(ns) = self.schema.namespace() {
                    self.emitter.write_attribute("xmlns", ns);
                }
            } else if let Some(ns) = node.namespace()
                && Some(ns) != self.schema.namespace()
            {
                self.emitter.write_attribute("xmlns", ns);
            }
        }
    }
}
