// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page index → content assignments for the current neighborhood.
//!
//! The [`PageAssignmentTable`] is the single source of truth for which content
//! belongs to which page. An entry exists for every page in the neighborhood
//! that has been materialized at least once; it may or may not currently sit
//! in a slot. The table owns the content lifecycle calls on the [`PageHost`]:
//! placing content into slots, removing it from slots, and releasing it when
//! the entry is dropped.

use hashbrown::HashMap;
use kurbo::Rect;
use smallvec::SmallVec;

use crate::host::PageHost;
use crate::pool::{ContainerPool, SlotId};

/// Where an assignment's content came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Created on demand by the content provider.
    Provider,
    /// Supplied pre-built by the caller.
    Supplied,
}

/// Result of [`PageAssignmentTable::attach`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttachOutcome {
    /// The page already held this content in a slot; nothing changed.
    AlreadyPlaced(SlotId),
    /// The content was placed into `slot`.
    Placed {
        /// Slot the content now occupies.
        slot: SlotId,
        /// `true` the first time provider-created content is placed.
        first_placement: bool,
    },
    /// Every slot is in view; nothing was placed or recorded.
    NoFreeSlot,
}

#[derive(Clone, Debug)]
struct Assignment<C> {
    content: C,
    slot: Option<SlotId>,
    origin: ContentOrigin,
    announced: bool,
}

/// Bounded mapping from page index to content handle.
#[derive(Clone, Debug)]
pub struct PageAssignmentTable<C> {
    entries: HashMap<usize, Assignment<C>>,
}

impl<C> Default for PageAssignmentTable<C> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<C: Clone + PartialEq> PageAssignmentTable<C> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of assigned pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no page is assigned.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if `page` has an assignment.
    #[must_use]
    pub fn contains(&self, page: usize) -> bool {
        self.entries.contains_key(&page)
    }

    /// Returns the content assigned to `page`.
    #[must_use]
    pub fn content(&self, page: usize) -> Option<&C> {
        self.entries.get(&page).map(|entry| &entry.content)
    }

    /// Returns the slot holding `page`'s content, if it is placed.
    #[must_use]
    pub fn slot_of(&self, page: usize) -> Option<SlotId> {
        self.entries.get(&page).and_then(|entry| entry.slot)
    }

    /// Returns the assigned pages in increasing order.
    #[must_use]
    pub fn pages(&self) -> SmallVec<[usize; 4]> {
        let mut pages: SmallVec<[usize; 4]> = self.entries.keys().copied().collect();
        pages.sort_unstable();
        pages
    }

    /// Iterates over placed assignments as `(page, slot, content)`.
    pub fn placed(&self) -> impl Iterator<Item = (usize, SlotId, &C)> + '_ {
        self.entries
            .iter()
            .filter_map(|(page, entry)| entry.slot.map(|slot| (*page, slot, &entry.content)))
    }

    /// Places `content` for `page` into a free slot at `frame` and records it.
    ///
    /// Attaching content that is already placed for `page` is a no-op.
    /// Attaching different content drops the previous assignment first. When
    /// no slot is free relative to `viewport`, the new content is neither
    /// placed nor recorded.
    pub fn attach<H: PageHost<C> + ?Sized>(
        &mut self,
        page: usize,
        content: C,
        origin: ContentOrigin,
        frame: Rect,
        viewport: Rect,
        pool: &mut ContainerPool,
        host: &mut H,
    ) -> AttachOutcome {
        if let Some(entry) = self.entries.get(&page)
            && entry.content == content
        {
            if let Some(slot) = entry.slot {
                return AttachOutcome::AlreadyPlaced(slot);
            }
            return self.place_assigned(page, frame, viewport, pool, host);
        }

        self.detach(page, pool, host);
        let Some(slot) = pool.find_free(viewport) else {
            return AttachOutcome::NoFreeSlot;
        };
        self.entries.insert(
            page,
            Assignment {
                content,
                slot: None,
                origin,
                announced: false,
            },
        );
        self.place_into(page, slot, frame, pool, host)
    }

    /// Records `content` for `page` without placing it.
    ///
    /// An existing assignment with equal content is kept as is; different
    /// content replaces it.
    pub(crate) fn assign<H: PageHost<C> + ?Sized>(
        &mut self,
        page: usize,
        content: C,
        origin: ContentOrigin,
        pool: &mut ContainerPool,
        host: &mut H,
    ) {
        if self.content(page) == Some(&content) {
            return;
        }
        self.detach(page, pool, host);
        self.entries.insert(
            page,
            Assignment {
                content,
                slot: None,
                origin,
                announced: false,
            },
        );
    }

    /// Places the already-assigned content of `page` into a free slot.
    pub(crate) fn place_assigned<H: PageHost<C> + ?Sized>(
        &mut self,
        page: usize,
        frame: Rect,
        viewport: Rect,
        pool: &mut ContainerPool,
        host: &mut H,
    ) -> AttachOutcome {
        if let Some(slot) = self.slot_of(page) {
            return AttachOutcome::AlreadyPlaced(slot);
        }
        match pool.find_free(viewport) {
            Some(slot) if self.contains(page) => self.place_into(page, slot, frame, pool, host),
            _ => AttachOutcome::NoFreeSlot,
        }
    }

    fn place_into<H: PageHost<C> + ?Sized>(
        &mut self,
        page: usize,
        slot: SlotId,
        frame: Rect,
        pool: &mut ContainerPool,
        host: &mut H,
    ) -> AttachOutcome {
        if let Some(stale) = pool.release(slot) {
            self.unplace(stale, slot, host);
        }
        let Some(entry) = self.entries.get_mut(&page) else {
            return AttachOutcome::NoFreeSlot;
        };
        pool.place(slot, page, frame);
        host.place_content(&entry.content, slot, frame);
        entry.slot = Some(slot);
        let first_placement = !entry.announced && entry.origin == ContentOrigin::Provider;
        entry.announced = true;
        AttachOutcome::Placed {
            slot,
            first_placement,
        }
    }

    /// Unparents `page`'s content after its slot was released from the pool.
    pub(crate) fn unplace<H: PageHost<C> + ?Sized>(
        &mut self,
        page: usize,
        slot: SlotId,
        host: &mut H,
    ) {
        if let Some(entry) = self.entries.get_mut(&page)
            && entry.slot == Some(slot)
        {
            host.remove_content(&entry.content, slot);
            entry.slot = None;
        }
    }

    /// Drops every assignment whose page does not satisfy `keep`.
    ///
    /// Returns the evicted pages in increasing order.
    pub fn trim<H: PageHost<C> + ?Sized>(
        &mut self,
        keep: impl Fn(usize) -> bool,
        pool: &mut ContainerPool,
        host: &mut H,
    ) -> SmallVec<[usize; 4]> {
        let mut evicted: SmallVec<[usize; 4]> =
            self.entries.keys().copied().filter(|page| !keep(*page)).collect();
        evicted.sort_unstable();
        for page in &evicted {
            self.detach(*page, pool, host);
        }
        evicted
    }

    /// Drops the assignment for `page`, releasing its slot and content.
    ///
    /// Returns `false` if `page` had no assignment.
    pub fn detach<H: PageHost<C> + ?Sized>(
        &mut self,
        page: usize,
        pool: &mut ContainerPool,
        host: &mut H,
    ) -> bool {
        let Some(entry) = self.entries.remove(&page) else {
            return false;
        };
        if let Some(slot) = entry.slot {
            pool.release(slot);
            host.remove_content(&entry.content, slot);
        }
        host.release_content(page, entry.content);
        true
    }

    /// Drops every assignment.
    pub fn clear<H: PageHost<C> + ?Sized>(&mut self, pool: &mut ContainerPool, host: &mut H) {
        for page in self.pages() {
            self.detach(page, pool, host);
        }
    }
}
