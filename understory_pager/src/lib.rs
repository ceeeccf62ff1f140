// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pager --heading-base-level=0

//! Understory Pager: a headless paged content host.
//!
//! This crate drives a scrollable surface divided into equal-sized pages laid
//! out along one axis. Only the current page and its immediate neighbors are
//! ever materialized, and at most two of them sit in presentation slots at a
//! time. The host framework owns the actual views and scroll surface; this
//! crate decides what goes where.
//!
//! The core concepts are:
//!
//! - [`Axis`]: the paging direction, with projections that let all windowing
//!   math be written for one direction.
//! - [`ScrollGeometry`]: the viewport expressed along the paging axis, with
//!   queries for the leading page and the pages visible at either edge.
//! - [`ContainerPool`]: the fixed pool of [`SLOT_COUNT`] reusable slots.
//! - [`PageAssignmentTable`]: page index to content handle for the current
//!   neighborhood.
//! - [`WindowingEngine`]: the state machine that runs a *windowing pass* on
//!   every viewport change or explicit navigation.
//! - [`NavigationSequencer`]: a FIFO that serializes passes and supports
//!   suspension and disposal.
//! - [`Pager`]: the facade that owns all of the above together with a
//!   [`ContentProvider`], a [`PageHost`] and any number of [`PageListener`]s.
//!
//! Host frameworks are responsible for:
//!
//! - Supplying content per page through [`ContentProvider`].
//! - Implementing [`PageHost`]: placing content into slots at the given
//!   frames, sizing the scroll surface and scrolling it on request.
//! - Reporting layout with [`Pager::set_viewport_size`] and viewport movement
//!   with [`Pager::scrolled`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use understory_pager::{ContentProvider, PageHost, Pager, PagerConfig, SlotId};
//!
//! struct Pages;
//!
//! impl ContentProvider for Pages {
//!     type Content = &'static str;
//!
//!     fn content_for_page(&mut self, page: usize) -> Option<&'static str> {
//!         ["intro", "middle", "outro"].get(page).copied()
//!     }
//! }
//!
//! struct Surface;
//!
//! impl PageHost<&'static str> for Surface {
//!     fn place_content(&mut self, _: &&'static str, _: SlotId, _: Rect) {}
//!     fn remove_content(&mut self, _: &&'static str, _: SlotId) {}
//!     fn set_content_size(&mut self, _: Size) {}
//!     fn scroll_to_frame(&mut self, _: Rect, _: bool) {}
//! }
//!
//! let mut pager = Pager::new(Pages, PagerConfig::default());
//! pager.attach_host(Surface);
//! pager.set_viewport_size(Size::new(100.0, 100.0));
//! assert_eq!(pager.current_page(), Some(0));
//!
//! // Dragging halfway to the next page materializes it without changing the
//! // current page.
//! pager.scrolled(Rect::new(50.0, 0.0, 150.0, 100.0));
//! assert_eq!(pager.current_page(), Some(0));
//! assert_eq!(pager.engine().pool().occupied_count(), 2);
//!
//! pager.scrolled(Rect::new(100.0, 0.0, 200.0, 100.0));
//! assert_eq!(pager.current_page(), Some(1));
//! assert_eq!(pager.previous_page(), Some(0));
//!
//! // The provider has nothing for page 3, so the sequence ends at 3 pages.
//! pager.goto_page(2, false).unwrap();
//! assert!(pager.goto_next(false).is_err());
//! assert_eq!(pager.page_count(), Some(3));
//! ```
//!
//! Logging goes through [`tracing`]: `debug` for transitions, navigation and
//! disposal, `trace` for per-pass detail.
//!
//! This crate requires `std`: the navigation queue is shared across threads
//! through a mutex and atomics.

mod axis;
mod config;
mod engine;
mod error;
mod geometry;
mod host;
mod page_count;
mod pager;
mod pool;
mod sequencer;
mod table;

pub use axis::{Axis, AxisPair, AxisRect};
pub use config::PagerConfig;
pub use engine::{
    EngineDebugInfo, EngineState, PageChange, PageTarget, PassContext, PassReport,
    WindowingEngine,
};
pub use error::NavigationError;
pub use geometry::{
    DEFAULT_TRAILING_EDGE_INSET, ScrollGeometry, content_size_for_pages, frame_for_page,
    intersects,
};
pub use host::{ContentProvider, ListenerId, ListenerSet, PageHost, PageListener};
pub use page_count::{PageCountSource, PageCountSources, ResolvedPageCount};
pub use pager::{CommandOutcome, Pager, PagerCommand, PagerDebugInfo};
pub use pool::{ContainerPool, SLOT_COUNT, Slot, SlotId};
pub use sequencer::{DisposeToken, NavigationSequencer, Submitter, Ticket};
pub use table::{AttachOutcome, ContentOrigin, PageAssignmentTable};
