// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording collaborators shared by the integration tests.

#![allow(
    dead_code,
    unreachable_pub,
    reason = "Each test binary uses a different subset of the helpers"
)]

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use kurbo::{Rect, Size};
use understory_pager::{ContentProvider, PageHost, PageListener, Pager, PagerConfig, SlotId};

/// Side length of the square test viewport.
pub const PAGE: f64 = 100.0;

/// One page's content: the page it was made for plus a serial number, so two
/// cards for the same page compare unequal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Card {
    pub page: usize,
    pub serial: u32,
}

/// Provider with content for pages `0..len`, optionally reporting `count`.
#[derive(Debug, Default)]
pub struct Deck {
    pub len: usize,
    pub count: Option<usize>,
    pub requests: Vec<usize>,
    next_serial: u32,
}

impl Deck {
    pub fn counted(count: usize) -> Self {
        Self {
            len: count,
            count: Some(count),
            ..Self::default()
        }
    }

    pub fn open_ended(len: usize) -> Self {
        Self {
            len,
            ..Self::default()
        }
    }
}

impl ContentProvider for Deck {
    type Content = Card;

    fn content_for_page(&mut self, page: usize) -> Option<Card> {
        self.requests.push(page);
        if page >= self.len {
            return None;
        }
        self.next_serial += 1;
        Some(Card {
            page,
            serial: self.next_serial,
        })
    }

    fn page_count(&self) -> Option<usize> {
        self.count
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum HostCall {
    Place { page: usize, slot: usize, frame: Rect },
    Remove { page: usize, slot: usize },
    Release { page: usize },
    ContentSize(Size),
    ScrollTo { frame: Rect, animated: bool },
}

/// Host that logs every call into a shared log and tracks what sits in each
/// slot.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub calls: Rc<RefCell<Vec<HostCall>>>,
    pub placed: BTreeMap<usize, Card>,
    pub content_size: Size,
}

impl RecordingHost {
    pub fn take_calls(&self) -> Vec<HostCall> {
        self.calls.borrow_mut().drain(..).collect()
    }
}

impl PageHost<Card> for RecordingHost {
    fn place_content(&mut self, content: &Card, slot: SlotId, frame: Rect) {
        self.placed.insert(slot.index(), content.clone());
        self.calls.borrow_mut().push(HostCall::Place {
            page: content.page,
            slot: slot.index(),
            frame,
        });
    }

    fn remove_content(&mut self, content: &Card, slot: SlotId) {
        assert_eq!(
            self.placed.remove(&slot.index()).as_ref(),
            Some(content),
            "removed content must be the content placed in that slot"
        );
        self.calls.borrow_mut().push(HostCall::Remove {
            page: content.page,
            slot: slot.index(),
        });
    }

    fn release_content(&mut self, page: usize, _content: Card) {
        self.calls.borrow_mut().push(HostCall::Release { page });
    }

    fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
        self.calls.borrow_mut().push(HostCall::ContentSize(size));
    }

    fn scroll_to_frame(&mut self, frame: Rect, animated: bool) {
        self.calls
            .borrow_mut()
            .push(HostCall::ScrollTo { frame, animated });
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Created(usize),
    Presented { page: usize, has_content: bool },
    Activated { page: usize, previous: Option<usize> },
    Deactivated { page: usize, next: usize },
}

/// Listener that appends every notification to a shared log.
#[derive(Clone, Debug, Default)]
pub struct Recorder(pub Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub fn take(&self) -> Vec<Event> {
        self.0.borrow_mut().drain(..).collect()
    }
}

impl PageListener<Card> for Recorder {
    fn content_created(&mut self, page: usize, content: &Card) {
        assert_eq!(content.page, page, "content created for the wrong page");
        self.0.borrow_mut().push(Event::Created(page));
    }

    fn page_presented(&mut self, page: usize, content: Option<&Card>) {
        self.0.borrow_mut().push(Event::Presented {
            page,
            has_content: content.is_some(),
        });
    }

    fn page_activated(&mut self, page: usize, _content: &Card, previous: Option<usize>) {
        self.0
            .borrow_mut()
            .push(Event::Activated { page, previous });
    }

    fn page_deactivated(&mut self, page: usize, content: &Card, next: usize) {
        assert_eq!(content.page, page, "deactivated content for the wrong page");
        self.0.borrow_mut().push(Event::Deactivated { page, next });
    }
}

pub type TestPager = Pager<Deck, RecordingHost>;

/// Viewport bounds with the leading edge at `offset` along the paging axis.
pub fn bounds_at(offset: f64) -> Rect {
    Rect::new(offset, 0.0, offset + PAGE, PAGE)
}

/// A laid-out horizontal pager with a recorder attached; the logs are
/// cleared after the initial layout has presented page 0.
pub fn laid_out(deck: Deck) -> (TestPager, Recorder) {
    laid_out_with(deck, PagerConfig::default())
}

pub fn laid_out_with(deck: Deck, config: PagerConfig) -> (TestPager, Recorder) {
    let recorder = Recorder::default();
    let mut pager = Pager::new(deck, config);
    pager.add_listener(recorder.clone());
    pager.attach_host(RecordingHost::default());
    pager.set_viewport_size(Size::new(PAGE, PAGE));
    recorder.take();
    host(&pager).take_calls();
    pager.provider_mut().requests.clear();
    (pager, recorder)
}

pub fn host(pager: &TestPager) -> &RecordingHost {
    pager.host().expect("test pagers always have a host")
}

/// Pages held by the pool's slots, in slot order.
pub fn occupied_pages(pager: &TestPager) -> Vec<usize> {
    pager
        .engine()
        .pool()
        .iter()
        .filter_map(|(_, slot)| slot.occupied_by())
        .collect()
}
