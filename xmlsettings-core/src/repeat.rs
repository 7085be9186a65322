//! Repeat-item contexts for repeating elements.
//!
//! Repeating elements are the tricky part of a generic settings schema.
//!
//! On read, an item has to be created when its element starts, filled in by
//! the setters of the element's subtree, and committed into the host's
//! collection once the subtree is fully parsed.
//!
//! On write, the engine has to know whether more items remain and which item
//! the getters of the current iteration should read from.
//!
//! Both directions are served by a [`RepeatItem`]: the item being built on
//! read, or the item being queried on write. The element that actually
//! repeats is the one marked repeating — not its container. For
//! `<Foos><Foo/><Foo/></Foos>`, `Foo` is the repeating element.
//!
//! Marking an element repeating binds three callbacks:
//!
//! - `create` — on read, produces a fresh payload to build into; on write,
//!   surfaces the payload for the item a host-held cursor currently points
//!   at. Only the payload is supplied; the engine wraps it into a
//!   [`RepeatItem`] chained to the enclosing item.
//! - `has_remaining` — consulted only while writing, before each iteration,
//!   to decide whether to keep enumerating; this is also where a host-held
//!   cursor advances (and, for repeatable serialization, resets once the
//!   enumeration is exhausted).
//! - `commit` — consulted only while reading, after the item's subtree
//!   (nested repeats included) has been fully parsed, to fold the item into
//!   the host's collection or map, keyed however the host chooses.
//!
//! A nested repeating element reaches the enclosing item through
//! [`RepeatItem::parent`], e.g. to push a collection entry into the map
//! value currently being built.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;

use crate::schema::ElementId;

/// Callback producing the payload for a new repeat item.
pub type CreateItemFn<T, P> = Box<dyn Fn(&mut T, Option<&RepeatItem<P>>) -> P>;

/// Callback deciding whether another item remains to be written.
pub type HasRemainingFn<T, P> = Box<dyn Fn(&mut T, Option<&RepeatItem<P>>) -> bool>;

/// Callback folding a fully-read item into the host.
pub type CommitItemFn<T, P> = Box<dyn Fn(&mut T, &RepeatItem<P>)>;

/// The callback triple bound to a repeating schema element.
pub struct RepeatBinding<T, P> {
    create: CreateItemFn<T, P>,
    has_remaining: HasRemainingFn<T, P>,
    commit: CommitItemFn<T, P>,
}

impl<T, P> RepeatBinding<T, P> {
    pub(crate) fn new(
        create: CreateItemFn<T, P>,
        has_remaining: HasRemainingFn<T, P>,
        commit: CommitItemFn<T, P>,
    ) -> Self {
        Self {
            create,
            has_remaining,
            commit,
        }
    }

    /// Creates the next repeat item, chained to `parent`.
    pub(crate) fn create_item(
        &self,
        host: &mut T,
        parent: Option<&Rc<RepeatItem<P>>>,
        node: ElementId,
    ) -> Rc<RepeatItem<P>> {
        let payload = (self.create)(host, parent.map(Rc::as_ref));
        Rc::new(RepeatItem::new(node, payload, parent.cloned()))
    }

    /// Returns true if another item remains to be written for this slot.
    pub(crate) fn has_remaining(&self, host: &mut T, parent: Option<&Rc<RepeatItem<P>>>) -> bool {
        (self.has_remaining)(host, parent.map(Rc::as_ref))
    }

    /// Folds a fully-read item into the host.
    pub(crate) fn commit(&self, host: &mut T, item: &RepeatItem<P>) {
        (self.commit)(host, item);
    }
}

/// The runtime handle to "which repeated instance are we on".
///
/// Created per iteration during a single read or write call and discarded
/// when the iteration ends; items never outlive one traversal. The payload
/// is opaque to the engines — only the host's own callbacks interpret it.
/// Hosts with heterogeneous repeating structures (a list and a map in one
/// schema) use a closed enum of payload variants as `P`.
pub struct RepeatItem<P> {
    node: ElementId,
    payload: RefCell<P>,
    parent: Option<Rc<RepeatItem<P>>>,
}

impl<P> RepeatItem<P> {
    pub(crate) fn new(node: ElementId, payload: P, parent: Option<Rc<RepeatItem<P>>>) -> Self {
        Self {
            node,
            payload: RefCell::new(payload),
            parent,
        }
    }

    /// The schema element this item belongs to.
    #[must_use]
    pub fn node(&self) -> ElementId {
        self.node
    }

    /// Borrows the item payload.
    ///
    /// # Panics
    /// Panics if the payload is currently mutably borrowed.
    #[must_use]
    pub fn payload(&self) -> Ref<'_, P> {
        self.payload.borrow()
    }

    /// Mutably borrows the item payload.
    ///
    /// # Panics
    /// Panics if the payload is currently borrowed.
    #[must_use]
    pub fn payload_mut(&self) -> RefMut<'_, P> {
        self.payload.borrow_mut()
    }

    /// The enclosing repeat item, if this item sits inside another repeat.
    ///
    /// Parents never reference their children, so the chain cannot form a
    /// cycle.
    #[must_use]
    pub fn parent(&self) -> Option<&RepeatItem<P>> {
        self.parent.as_deref()
    }
}
