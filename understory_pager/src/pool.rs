// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed pool of reusable presentation slots.
//!
//! A [`ContainerPool`] owns exactly [`SLOT_COUNT`] slots for the lifetime of
//! the engine. Each slot is either parked offscreen (no frame) or positioned
//! at a page's frame while holding that page's content. Whether a slot is
//! "offscreen" is always relative to the current viewport bounds: a slot whose
//! frame no longer intersects the viewport is free for reuse even before it has
//! been released.

use kurbo::Rect;
use smallvec::SmallVec;

use crate::geometry::intersects;

/// Number of presentation slots; this bounds simultaneous materialization.
pub const SLOT_COUNT: usize = 2;

/// Identifier of one presentation slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the slot's position in the pool, in `0..SLOT_COUNT`.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }

    fn all() -> impl Iterator<Item = Self> {
        (0..SLOT_COUNT).map(Self)
    }
}

/// State of one presentation slot.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Slot {
    occupied_by: Option<usize>,
    frame: Option<Rect>,
}

impl Slot {
    /// Page whose content this slot holds, if any.
    #[must_use]
    pub fn occupied_by(&self) -> Option<usize> {
        self.occupied_by
    }

    /// Page this slot is geometrically positioned at.
    ///
    /// A slot holding content is always positioned at the page it holds.
    #[must_use]
    pub fn positioned_at(&self) -> Option<usize> {
        self.frame.and(self.occupied_by)
    }

    /// Current frame in content coordinates, or `None` when parked offscreen.
    #[must_use]
    pub fn frame(&self) -> Option<Rect> {
        self.frame
    }

    /// Returns `true` if this slot does not intersect `viewport`.
    #[must_use]
    pub fn is_offscreen(&self, viewport: Rect) -> bool {
        self.frame.is_none_or(|frame| !intersects(frame, viewport))
    }
}

/// The fixed set of [`SLOT_COUNT`] reusable slots.
#[derive(Clone, Debug, Default)]
pub struct ContainerPool {
    slots: [Slot; SLOT_COUNT],
}

impl ContainerPool {
    /// Creates a pool with every slot parked offscreen.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the state of `id`.
    #[must_use]
    pub fn slot(&self, id: SlotId) -> &Slot {
        &self.slots[id.index()]
    }

    /// Returns every slot, indexed by [`SlotId::index`].
    #[must_use]
    pub fn slots(&self) -> &[Slot; SLOT_COUNT] {
        &self.slots
    }

    /// Iterates over all slots in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &Slot)> + '_ {
        SlotId::all().map(|id| (id, self.slot(id)))
    }

    /// Returns a slot that does not intersect `viewport`, or `None` when every
    /// slot is in view.
    ///
    /// Empty slots are preferred over offscreen slots that still hold content.
    /// `None` means materialization must be skipped for this pass.
    #[must_use]
    pub fn find_free(&self, viewport: Rect) -> Option<SlotId> {
        let mut offscreen = self.iter().filter(|(_, slot)| slot.is_offscreen(viewport));
        let first = offscreen.next()?;
        if first.1.occupied_by.is_none() {
            return Some(first.0);
        }
        Some(
            offscreen
                .find(|(_, slot)| slot.occupied_by.is_none())
                .unwrap_or(first)
                .0,
        )
    }

    /// Returns the slots that hold content but no longer intersect `viewport`.
    #[must_use]
    pub fn stale_slots(&self, viewport: Rect) -> SmallVec<[SlotId; SLOT_COUNT]> {
        self.iter()
            .filter(|(_, slot)| slot.occupied_by.is_some() && slot.is_offscreen(viewport))
            .map(|(id, _)| id)
            .collect()
    }

    /// Returns the pages held by slots that intersect `viewport`, in slot order.
    #[must_use]
    pub fn positions_of(&self, viewport: Rect) -> SmallVec<[usize; SLOT_COUNT]> {
        self.iter()
            .filter(|(_, slot)| !slot.is_offscreen(viewport))
            .filter_map(|(_, slot)| slot.positioned_at())
            .collect()
    }

    /// Returns the slot currently holding `page`.
    #[must_use]
    pub fn slot_for_page(&self, page: usize) -> Option<SlotId> {
        self.iter()
            .find(|(_, slot)| slot.occupied_by == Some(page))
            .map(|(id, _)| id)
    }

    /// Returns the number of slots holding content.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| slot.occupied_by.is_some())
            .count()
    }

    /// Positions `id` at `frame` holding `page`.
    pub(crate) fn place(&mut self, id: SlotId, page: usize, frame: Rect) {
        debug_assert!(
            self.iter()
                .all(|(other, slot)| other == id || slot.occupied_by != Some(page)),
            "page {page} is already held by another slot"
        );
        self.slots[id.index()] = Slot {
            occupied_by: Some(page),
            frame: Some(frame),
        };
    }

    /// Moves an occupied slot to a new frame for the page it already holds.
    pub(crate) fn reframe(&mut self, id: SlotId, frame: Rect) {
        let slot = &mut self.slots[id.index()];
        if slot.occupied_by.is_some() {
            slot.frame = Some(frame);
        }
    }

    /// Parks `id` offscreen and clears its occupant, returning the page it held.
    pub(crate) fn release(&mut self, id: SlotId) -> Option<usize> {
        let slot = &mut self.slots[id.index()];
        slot.frame = None;
        slot.occupied_by.take()
    }
}
