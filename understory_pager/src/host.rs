// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interfaces to the pager's external collaborators.
//!
//! - [`ContentProvider`]: supplies content per page index and, optionally, a
//!   page count.
//! - [`PageHost`]: the rendering/layout host that actually places content
//!   into slots and owns the scrollable surface.
//! - [`PageListener`]: receives lifecycle notifications. Any number of
//!   listeners may be registered in a [`ListenerSet`]; none is a valid
//!   configuration.

use std::fmt;

use kurbo::{Rect, Size};

use crate::pool::SlotId;

/// Supplies the content shown on each page.
pub trait ContentProvider {
    /// Handle to one page's content.
    ///
    /// The engine only stores and compares handles; equality is used to detect
    /// re-attaching the same content, so it should mean identity (for example
    /// an `Rc` compared by pointer, or an id).
    type Content: Clone + PartialEq;

    /// Returns the content for `page`, or `None` if the page has no content.
    ///
    /// Without a page count, `None` marks the end of the sequence.
    fn content_for_page(&mut self, page: usize) -> Option<Self::Content>;

    /// Returns an explicit page count, if the provider knows one.
    fn page_count(&self) -> Option<usize> {
        None
    }
}

/// The rendering and layout host the pager drives.
pub trait PageHost<C> {
    /// Places `content` into `slot` and positions the slot at `frame`.
    fn place_content(&mut self, content: &C, slot: SlotId, frame: Rect);

    /// Removes `content` from `slot`; the slot is parked offscreen.
    fn remove_content(&mut self, content: &C, slot: SlotId);

    /// Hands back content that left the pager's neighborhood.
    ///
    /// Called once per assignment, after any [`PageHost::remove_content`].
    fn release_content(&mut self, page: usize, content: C) {
        let _ = (page, content);
    }

    /// Sets the scrollable content size.
    fn set_content_size(&mut self, size: Size);

    /// Scrolls the viewport so that `frame` is visible.
    fn scroll_to_frame(&mut self, frame: Rect, animated: bool);
}

/// Receives page lifecycle notifications.
///
/// Every method has an empty default so listeners implement only what they
/// need.
#[expect(unused_variables, reason = "Default no-op implementations")]
pub trait PageListener<C> {
    /// `content` was obtained from the provider and placed for the first time.
    fn content_created(&mut self, page: usize, content: &C) {}

    /// `page` became the current page; `content` is `None` for an empty page.
    fn page_presented(&mut self, page: usize, content: Option<&C>) {}

    /// The content of `page` became active, replacing `previous`.
    fn page_activated(&mut self, page: usize, content: &C, previous: Option<usize>) {}

    /// The content of `page` stopped being active because `next` became current.
    fn page_deactivated(&mut self, page: usize, content: &C, next: usize) {}
}

/// Identifier returned by [`ListenerSet::add`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// Registered listeners, notified in registration order.
pub struct ListenerSet<C> {
    listeners: Vec<(ListenerId, Box<dyn PageListener<C>>)>,
    next_id: u64,
}

impl<C> Default for ListenerSet<C> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C> fmt::Debug for ListenerSet<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSet")
            .field("len", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<C> ListenerSet<C> {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener.
    pub fn add(&mut self, listener: impl PageListener<C> + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Unregisters a listener; returns `false` if `id` was not registered.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    fn each(&mut self, mut f: impl FnMut(&mut dyn PageListener<C>)) {
        for (_, listener) in &mut self.listeners {
            f(listener.as_mut());
        }
    }

    pub(crate) fn content_created(&mut self, page: usize, content: &C) {
        self.each(|l| l.content_created(page, content));
    }

    pub(crate) fn page_presented(&mut self, page: usize, content: Option<&C>) {
        self.each(|l| l.page_presented(page, content));
    }

    pub(crate) fn page_activated(&mut self, page: usize, content: &C, previous: Option<usize>) {
        self.each(|l| l.page_activated(page, content, previous));
    }

    pub(crate) fn page_deactivated(&mut self, page: usize, content: &C, next: usize) {
        self.each(|l| l.page_deactivated(page, content, next));
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::{ListenerSet, PageListener};

    struct Log(Rc<RefCell<Vec<(&'static str, usize)>>>);

    impl PageListener<u32> for Log {
        fn page_presented(&mut self, page: usize, _content: Option<&u32>) {
            self.0.borrow_mut().push(("presented", page));
        }
    }

    struct Silent;

    impl PageListener<u32> for Silent {}

    #[test]
    fn listeners_are_notified_in_registration_order_and_removable() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut set = ListenerSet::new();
        let first = set.add(Log(log.clone()));
        set.add(Silent);
        let third = set.add(Log(log.clone()));
        assert_eq!(set.len(), 3);

        set.page_presented(2, Some(&7));
        assert_eq!(*log.borrow(), [("presented", 2), ("presented", 2)]);

        assert!(set.remove(first));
        assert!(!set.remove(first));
        set.page_presented(3, None);
        assert_eq!(log.borrow().last(), Some(&("presented", 3)));
        assert_eq!(log.borrow().len(), 3);

        assert!(set.remove(third));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn empty_set_is_valid() {
        let mut set = ListenerSet::<u32>::new();
        assert!(set.is_empty());
        set.page_activated(0, &1, None);
        set.page_deactivated(0, &1, 1);
        set.content_created(0, &1);
    }
}
