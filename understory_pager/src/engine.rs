// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The windowing engine.
//!
//! [`WindowingEngine`] decides, from a viewport position, which page is
//! current, which pages must be materialized into the two slots, and which
//! assignments fell out of the neighborhood. One *windowing pass* runs these
//! phases in order:
//!
//! 1. Observe the page under the viewport's leading edge.
//! 2. Record a page-change transition if it differs from the current page.
//! 3. Release every slot that no longer intersects the viewport.
//! 4. Diff the pages under the leading/trailing probes against the pages held
//!    by in-view slots.
//! 5. Attach the newly visible page, if any, reusing its assignment or asking
//!    the provider for content.
//! 6. Trim the assignment table to `{current - 1, current, current + 1}`.
//! 7. Notify listeners if a transition happened.
//!
//! Explicit navigation sets the current page itself, scrolls the host to the
//! target frame, and then runs phases 3–7 synchronously on the target frame.
//!
//! The engine is usable on its own; [`Pager`](crate::Pager) wraps it with a
//! [`NavigationSequencer`](crate::NavigationSequencer) and owns the
//! collaborators.

use std::fmt;

use kurbo::{Rect, Size};
use smallvec::SmallVec;
use tracing::{debug, debug_span, trace};

use crate::axis::Axis;
use crate::config::PagerConfig;
use crate::error::NavigationError;
use crate::geometry::{ScrollGeometry, content_size_for_pages, frame_for_page};
use crate::host::{ContentProvider, ListenerSet, PageHost};
use crate::page_count::{PageCountSources, ResolvedPageCount};
use crate::pool::{ContainerPool, SLOT_COUNT, Slot, SlotId};
use crate::sequencer::DisposeToken;
use crate::table::{AttachOutcome, ContentOrigin, PageAssignmentTable};

/// Target of an explicit navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageTarget {
    /// A specific page.
    Index(usize),
    /// The page after the current one, or page 0 before any page is current.
    Next,
    /// The page before the current one.
    Previous,
}

impl From<usize> for PageTarget {
    fn from(page: usize) -> Self {
        Self::Index(page)
    }
}

/// A page-change transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageChange {
    /// Page that was current before, if any.
    pub from: Option<usize>,
    /// New current page.
    pub to: usize,
}

/// Current/previous page bookkeeping.
///
/// `previous` is a single step of history: it is updated to the prior value of
/// `current` once per transition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineState {
    current: Option<usize>,
    previous: Option<usize>,
}

impl EngineState {
    /// Current page, or `None` before the first observation.
    #[must_use]
    pub fn current(&self) -> Option<usize> {
        self.current
    }

    /// Page that was current before the last transition.
    #[must_use]
    pub fn previous(&self) -> Option<usize> {
        self.previous
    }

    fn transition_to(&mut self, page: usize) -> Option<PageChange> {
        if self.current == Some(page) {
            return None;
        }
        let change = PageChange {
            from: self.current,
            to: page,
        };
        self.previous = self.current;
        self.current = Some(page);
        Some(change)
    }
}

/// What one windowing pass did.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PassReport {
    /// Page under the leading edge, or `None` when nothing could be observed.
    pub observed: Option<usize>,
    /// Page change recorded by this pass.
    pub transition: Option<PageChange>,
    /// Slots released because they left the viewport.
    pub released: SmallVec<[SlotId; SLOT_COUNT]>,
    /// Newly visible page and how attaching it went.
    pub attached: Option<(usize, AttachOutcome)>,
    /// Newly visible page for which there was no content.
    pub empty_page: Option<usize>,
    /// Pages dropped from the assignment table.
    pub evicted: SmallVec<[usize; 4]>,
    /// `true` if the pass stopped early because the pager was disposed.
    pub cancelled: bool,
}

/// Borrowed collaborators for one engine operation.
pub struct PassContext<'a, P: ContentProvider, H: ?Sized> {
    provider: &'a mut P,
    host: &'a mut H,
    listeners: &'a mut ListenerSet<P::Content>,
    token: Option<&'a DisposeToken>,
}

impl<P: ContentProvider, H: ?Sized> fmt::Debug for PassContext<'_, P, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassContext")
            .field("listeners", &self.listeners)
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

impl<'a, P: ContentProvider, H: PageHost<P::Content> + ?Sized> PassContext<'a, P, H> {
    /// Bundles the collaborators an engine operation needs.
    pub fn new(
        provider: &'a mut P,
        host: &'a mut H,
        listeners: &'a mut ListenerSet<P::Content>,
    ) -> Self {
        Self {
            provider,
            host,
            listeners,
            token: None,
        }
    }

    /// Makes passes stop at their next checkpoint once `token` is disposed.
    #[must_use]
    pub fn with_dispose_token(mut self, token: &'a DisposeToken) -> Self {
        self.token = Some(token);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_some_and(DisposeToken::is_disposed)
    }
}

/// Snapshot of a [`WindowingEngine`] for debugging and inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineDebugInfo {
    /// Paging direction.
    pub axis: Axis,
    /// Laid-out viewport size.
    pub viewport: Size,
    /// Last viewport bounds in content coordinates.
    pub bounds: Rect,
    /// Scrollable content size last sent to the host.
    pub content_size: Size,
    /// Current and previous page.
    pub state: EngineState,
    /// Explicit page count set on the engine.
    pub preset_page_count: Option<usize>,
    /// First index the provider had no content for.
    pub discovered_end: Option<usize>,
    /// Slot states in id order.
    pub slots: [Slot; SLOT_COUNT],
    /// Assigned pages in increasing order.
    pub assigned_pages: SmallVec<[usize; 4]>,
}

/// The core paging/windowing state machine.
#[derive(Clone, Debug)]
pub struct WindowingEngine<C> {
    axis: Axis,
    trailing_edge_inset: f64,
    viewport: Size,
    bounds: Rect,
    content_size: Size,
    content_pages: usize,
    preset_page_count: Option<usize>,
    discovered_end: Option<usize>,
    state: EngineState,
    pool: ContainerPool,
    table: PageAssignmentTable<C>,
}

impl<C: Clone + PartialEq> WindowingEngine<C> {
    /// Creates an engine with an unlaid-out (zero) viewport and no current page.
    #[must_use]
    pub fn new(config: &PagerConfig) -> Self {
        Self {
            axis: config.axis,
            trailing_edge_inset: config.trailing_edge_inset,
            viewport: Size::ZERO,
            bounds: Rect::ZERO,
            content_size: Size::ZERO,
            content_pages: 0,
            preset_page_count: config.page_count,
            discovered_end: None,
            state: EngineState::default(),
            pool: ContainerPool::new(),
            table: PageAssignmentTable::new(),
        }
    }

    /// Returns the paging direction.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the laid-out viewport size.
    #[must_use]
    pub fn viewport_size(&self) -> Size {
        self.viewport
    }

    /// Returns the last viewport bounds, in content coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the content size last sent to the host.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Returns the current/previous page state.
    #[must_use]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Returns the current page.
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.state.current
    }

    /// Returns the page that was current before the last transition.
    #[must_use]
    pub fn previous_page(&self) -> Option<usize> {
        self.state.previous
    }

    /// Returns the content assigned to the current page.
    #[must_use]
    pub fn current_content(&self) -> Option<&C> {
        self.state.current.and_then(|page| self.table.content(page))
    }

    /// Returns the slot pool.
    #[must_use]
    pub fn pool(&self) -> &ContainerPool {
        &self.pool
    }

    /// Returns the assignment table.
    #[must_use]
    pub fn table(&self) -> &PageAssignmentTable<C> {
        &self.table
    }

    /// Returns the scroll geometry for the last bounds.
    #[must_use]
    pub fn geometry(&self) -> ScrollGeometry {
        ScrollGeometry::from_bounds(self.axis, self.bounds, self.content_size)
    }

    /// Returns the frame of `page` for the current viewport size.
    #[must_use]
    pub fn frame_for_page(&self, page: usize) -> Rect {
        frame_for_page(self.axis, self.viewport, page)
    }

    /// Returns the page count candidates given the provider's count.
    #[must_use]
    pub fn page_count_sources(&self, provider_count: Option<usize>) -> PageCountSources {
        PageCountSources {
            preset: self.preset_page_count,
            provider: provider_count,
            discovered: self.discovered_end,
        }
    }

    /// Resolves the page count given the provider's count.
    #[must_use]
    pub fn page_count(&self, provider_count: Option<usize>) -> Option<ResolvedPageCount> {
        self.page_count_sources(provider_count).resolve()
    }

    /// Sets the explicit page count.
    ///
    /// The content size is updated right away only while it is still empty;
    /// otherwise the count takes effect on the next pass. Nothing is evicted
    /// here.
    pub fn set_page_count<H: PageHost<C> + ?Sized>(
        &mut self,
        page_count: Option<usize>,
        provider_count: Option<usize>,
        host: Option<&mut H>,
    ) {
        self.preset_page_count = page_count;
        if self.content_pages == 0
            && let Some(host) = host
        {
            self.sync_content_size(provider_count, host);
        }
    }

    /// Returns `true` once the viewport has extent along the paging axis.
    #[must_use]
    pub fn is_laid_out(&self) -> bool {
        self.axis.along(self.viewport) > 0.0
    }

    /// Re-applies the current layout through `cx`.
    ///
    /// Placed slots are re-framed, the content size is re-sent, the current
    /// page is scrolled back into view and a pass runs. Returns `None` while
    /// the viewport is not laid out.
    pub fn refresh<P, H>(&mut self, cx: &mut PassContext<'_, P, H>) -> Option<PassReport>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        self.relayout(cx)
    }

    /// Records layout without talking to a host.
    pub(crate) fn record_layout(&mut self, viewport: Size, axis: Axis) {
        self.viewport = viewport;
        self.axis = axis;
    }

    /// Records the host's viewport bounds without running a pass.
    ///
    /// The next relayout with no current page starts from this origin.
    pub(crate) fn record_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    /// Applies a new viewport size.
    ///
    /// Placed content is re-framed and the current page stays in view. A
    /// viewport with zero extent along the paging axis is recorded but
    /// nothing else happens until a usable size arrives.
    pub fn set_viewport_size<P, H>(
        &mut self,
        viewport: Size,
        cx: &mut PassContext<'_, P, H>,
    ) -> Option<PassReport>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        if self.viewport == viewport {
            return None;
        }
        self.viewport = viewport;
        self.relayout(cx)
    }

    /// Changes the paging direction and re-lays out placed content.
    pub fn set_axis<P, H>(&mut self, axis: Axis, cx: &mut PassContext<'_, P, H>) -> Option<PassReport>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        if self.axis == axis {
            return None;
        }
        self.axis = axis;
        self.relayout(cx)
    }

    /// Runs a windowing pass for new viewport bounds.
    pub fn scroll_pass<P, H>(&mut self, bounds: Rect, cx: &mut PassContext<'_, P, H>) -> PassReport
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        self.bounds = bounds;
        let geometry = self.geometry();
        let _span = debug_span!(
            "windowing_pass",
            offset = geometry.offset,
            extent = geometry.extent,
            current = ?self.state.current,
        )
        .entered();

        if cx.is_cancelled() {
            return PassReport {
                cancelled: true,
                ..PassReport::default()
            };
        }
        if !geometry.has_extent() || !self.is_laid_out() {
            trace!("no observation: zero extent");
            return PassReport::default();
        }

        let observed = geometry.leading_page();
        let transition = observed.and_then(|page| self.state.transition_to(page));
        self.sync_content_size(cx.provider.page_count(), cx.host);
        self.windowing_pass(observed, transition, cx)
    }

    /// Navigates to `target` using provider content.
    ///
    /// On success the host has been asked to scroll to the target frame and a
    /// forced windowing pass has run on that frame. On error the position and
    /// assignments are unchanged; a [`NavigationError::NoContent`] rejection
    /// may still record the end of an open-ended sequence and resize the
    /// content to match.
    pub fn navigate<P, H>(
        &mut self,
        target: PageTarget,
        animated: bool,
        cx: &mut PassContext<'_, P, H>,
    ) -> Result<PassReport, NavigationError>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        let page = self.check_target(target, cx)?;
        let content = match self.table.content(page) {
            Some(content) => content.clone(),
            None => match cx.provider.content_for_page(page) {
                Some(content) => content,
                None => {
                    self.discover_end(page, cx);
                    return Err(NavigationError::NoContent { page });
                }
            },
        };
        self.reopen_past(page);
        self.table
            .assign(page, content, ContentOrigin::Provider, &mut self.pool, cx.host);
        Ok(self.jump_to(page, animated, cx))
    }

    /// Navigates to `page` showing caller-supplied `content`.
    ///
    /// Supplied content replaces any different content assigned to `page` and
    /// never produces a `content_created` notification.
    pub fn present<P, H>(
        &mut self,
        page: usize,
        content: C,
        animated: bool,
        cx: &mut PassContext<'_, P, H>,
    ) -> Result<PassReport, NavigationError>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        let page = self.check_target(PageTarget::Index(page), cx)?;
        self.reopen_past(page);
        self.table
            .assign(page, content, ContentOrigin::Supplied, &mut self.pool, cx.host);
        Ok(self.jump_to(page, animated, cx))
    }

    /// Releases every assignment through the host.
    pub fn teardown<H: PageHost<C> + ?Sized>(&mut self, host: &mut H) {
        self.table.clear(&mut self.pool, host);
    }

    /// Snapshot of the engine state.
    #[must_use]
    pub fn debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo {
            axis: self.axis,
            viewport: self.viewport,
            bounds: self.bounds,
            content_size: self.content_size,
            state: self.state,
            preset_page_count: self.preset_page_count,
            discovered_end: self.discovered_end,
            slots: *self.pool.slots(),
            assigned_pages: self.table.pages(),
        }
    }

    fn check_target<P, H>(
        &mut self,
        target: PageTarget,
        cx: &mut PassContext<'_, P, H>,
    ) -> Result<usize, NavigationError>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        if cx.is_cancelled() {
            return Err(NavigationError::Disposed);
        }
        let page = match target {
            PageTarget::Index(page) => page,
            PageTarget::Next => self.state.current.map_or(0, |page| page + 1),
            PageTarget::Previous => self
                .state
                .current
                .and_then(|page| page.checked_sub(1))
                .ok_or(NavigationError::BeforeFirstPage)?,
        };
        if !self.is_laid_out() {
            return Err(NavigationError::ZeroExtent);
        }
        let sources = self.page_count_sources(cx.provider.page_count());
        if sources.is_explicit()
            && let Some(resolved) = sources.resolve()
            && page >= resolved.count
        {
            return Err(NavigationError::OutOfRange {
                page,
                page_count: resolved.count,
            });
        }
        Ok(page)
    }

    fn jump_to<P, H>(&mut self, page: usize, animated: bool, cx: &mut PassContext<'_, P, H>) -> PassReport
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        let _span = debug_span!("navigation_pass", page, animated).entered();
        let transition = self.state.transition_to(page);
        self.sync_content_size(cx.provider.page_count(), cx.host);
        let frame = self.frame_for_page(page);
        cx.host.scroll_to_frame(frame, animated);
        self.bounds = frame;
        self.windowing_pass(Some(page), transition, cx)
    }

    fn relayout<P, H>(&mut self, cx: &mut PassContext<'_, P, H>) -> Option<PassReport>
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        if !self.is_laid_out() {
            debug!(viewport = ?self.viewport, "viewport not laid out");
            return None;
        }
        let placed: SmallVec<[(usize, SlotId); SLOT_COUNT]> =
            self.table.placed().map(|(page, slot, _)| (page, slot)).collect();
        for (page, slot) in placed {
            let frame = self.frame_for_page(page);
            self.pool.reframe(slot, frame);
            if let Some(content) = self.table.content(page) {
                cx.host.place_content(content, slot, frame);
            }
        }
        self.content_size = Size::ZERO;
        self.sync_content_size(cx.provider.page_count(), cx.host);

        let bounds = match self.state.current {
            Some(current) => {
                let frame = self.frame_for_page(current);
                cx.host.scroll_to_frame(frame, false);
                frame
            }
            None => Rect::from_origin_size(self.bounds.origin(), self.viewport),
        };
        Some(self.scroll_pass(bounds, cx))
    }

    fn windowing_pass<P, H>(
        &mut self,
        observed: Option<usize>,
        transition: Option<PageChange>,
        cx: &mut PassContext<'_, P, H>,
    ) -> PassReport
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        let mut report = PassReport {
            observed,
            transition,
            ..PassReport::default()
        };
        if let Some(change) = transition {
            debug!(from = ?change.from, to = change.to, "page transition");
        }

        // Release slots first so a just-vacated slot can be reused below.
        let viewport = self.bounds;
        for slot in self.pool.stale_slots(viewport) {
            if let Some(page) = self.pool.release(slot) {
                self.table.unplace(page, slot, cx.host);
                report.released.push(slot);
            }
        }
        if !report.released.is_empty() {
            trace!(released = ?report.released, "released offscreen slots");
        }

        if cx.is_cancelled() {
            report.cancelled = true;
            return report;
        }

        let occupied = self.pool.positions_of(viewport);
        let newly_visible = self
            .geometry()
            .visible_pages(self.trailing_edge_inset)
            .into_iter()
            .find(|page| !occupied.contains(page));
        if let Some(page) = newly_visible {
            self.attach_page(page, &mut report, cx);
        }

        let anchor = self.state.current.unwrap_or(0);
        let count = self.page_count(cx.provider.page_count()).map(|r| r.count);
        let previous_content = transition
            .and_then(|change| change.from)
            .and_then(|page| self.table.content(page).cloned());
        report.evicted = self.table.trim(
            |page| page.abs_diff(anchor) <= 1 && count.is_none_or(|count| page < count),
            &mut self.pool,
            cx.host,
        );
        if !report.evicted.is_empty() {
            trace!(evicted = ?report.evicted, "trimmed assignments");
        }

        if cx.is_cancelled() {
            report.cancelled = true;
            return report;
        }
        if let Some(change) = transition {
            self.notify(change, previous_content.as_ref(), cx.listeners);
        }
        report
    }

    fn attach_page<P, H>(&mut self, page: usize, report: &mut PassReport, cx: &mut PassContext<'_, P, H>)
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        let frame = self.frame_for_page(page);
        let viewport = self.bounds;
        let outcome = if self.table.contains(page) {
            self.table
                .place_assigned(page, frame, viewport, &mut self.pool, cx.host)
        } else {
            if self
                .page_count(cx.provider.page_count())
                .is_some_and(|resolved| page >= resolved.count)
            {
                trace!(page, "page beyond count stays empty");
                report.empty_page = Some(page);
                return;
            }
            if self.pool.find_free(viewport).is_none() {
                AttachOutcome::NoFreeSlot
            } else {
                match cx.provider.content_for_page(page) {
                    Some(content) => self.table.attach(
                        page,
                        content,
                        ContentOrigin::Provider,
                        frame,
                        viewport,
                        &mut self.pool,
                        cx.host,
                    ),
                    None => {
                        report.empty_page = Some(page);
                        self.discover_end(page, cx);
                        return;
                    }
                }
            }
        };

        match outcome {
            AttachOutcome::Placed {
                first_placement: true,
                ..
            } => {
                if let Some(content) = self.table.content(page) {
                    cx.listeners.content_created(page, content);
                }
            }
            AttachOutcome::NoFreeSlot => {
                trace!(page, "no free slot; page deferred to a later pass");
            }
            _ => {}
        }
        trace!(page, ?outcome, "attach phase");
        report.attached = Some((page, outcome));
    }

    fn notify(&self, change: PageChange, previous_content: Option<&C>, listeners: &mut ListenerSet<C>) {
        let content = self.table.content(change.to);
        listeners.page_presented(change.to, content);
        if let Some(content) = content {
            listeners.page_activated(change.to, content, change.from);
        }
        if let (Some(previous), Some(previous_content)) = (change.from, previous_content) {
            listeners.page_deactivated(previous, previous_content, change.to);
        }
    }

    fn discover_end<P, H>(&mut self, page: usize, cx: &mut PassContext<'_, P, H>)
    where
        P: ContentProvider<Content = C>,
        H: PageHost<C> + ?Sized,
    {
        let provider_count = cx.provider.page_count();
        if self.page_count_sources(provider_count).is_explicit() {
            return;
        }
        let end = self.discovered_end.map_or(page, |end| end.min(page));
        if self.discovered_end != Some(end) {
            debug!(end, "discovered end of page sequence");
            self.discovered_end = Some(end);
            self.sync_content_size(provider_count, cx.host);
        }
    }

    /// Content exists at `page`, so a discovered end at or before it is stale.
    fn reopen_past(&mut self, page: usize) {
        if self.discovered_end.is_some_and(|end| page >= end) {
            debug!(page, "page sequence extends past its discovered end");
            self.discovered_end = None;
        }
    }

    fn target_content_pages(&self, provider_count: Option<usize>) -> usize {
        let sources = self.page_count_sources(provider_count);
        if sources.is_explicit() {
            return sources.resolve().map_or(0, |resolved| resolved.count);
        }
        // Open-ended: keep one page past the current one scrollable.
        let wanted = self
            .content_pages
            .max(self.state.current.map_or(1, |page| page + 2));
        sources.discovered.map_or(wanted, |end| wanted.min(end))
    }

    fn sync_content_size<H: PageHost<C> + ?Sized>(&mut self, provider_count: Option<usize>, host: &mut H) {
        let pages = self.target_content_pages(provider_count);
        let size = content_size_for_pages(self.axis, self.viewport, pages);
        if pages != self.content_pages || size != self.content_size {
            trace!(pages, ?size, "content size");
            self.content_pages = pages;
            self.content_size = size;
            host.set_content_size(size);
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Rect, Size};

    use super::{PageTarget, PassContext, WindowingEngine};
    use crate::config::PagerConfig;
    use crate::error::NavigationError;
    use crate::host::{ContentProvider, ListenerSet, PageHost};
    use crate::pool::SlotId;
    use crate::sequencer::NavigationSequencer;

    struct Numbers(Option<usize>);

    impl ContentProvider for Numbers {
        type Content = usize;

        fn content_for_page(&mut self, page: usize) -> Option<usize> {
            Some(page)
        }

        fn page_count(&self) -> Option<usize> {
            self.0
        }
    }

    #[derive(Default)]
    struct Host {
        placed: Vec<(usize, Rect)>,
        released: Vec<usize>,
        scrolls: usize,
    }

    impl PageHost<usize> for Host {
        fn place_content(&mut self, content: &usize, _slot: SlotId, frame: Rect) {
            self.placed.retain(|(page, _)| page != content);
            self.placed.push((*content, frame));
        }

        fn remove_content(&mut self, content: &usize, _slot: SlotId) {
            self.placed.retain(|(page, _)| page != content);
        }

        fn release_content(&mut self, page: usize, _content: usize) {
            self.released.push(page);
        }

        fn set_content_size(&mut self, _size: Size) {}

        fn scroll_to_frame(&mut self, _frame: Rect, _animated: bool) {
            self.scrolls += 1;
        }
    }

    fn engine(viewport: Size, provider: &mut Numbers, host: &mut Host) -> WindowingEngine<usize> {
        let mut engine = WindowingEngine::new(&PagerConfig::default());
        let mut listeners = ListenerSet::new();
        let mut cx = PassContext::new(provider, host, &mut listeners);
        engine.set_viewport_size(viewport, &mut cx);
        engine
    }

    #[test]
    fn navigation_needs_a_laid_out_viewport() {
        let mut provider = Numbers(Some(3));
        let mut host = Host::default();
        let mut listeners = ListenerSet::new();
        let mut engine = WindowingEngine::new(&PagerConfig::default());
        let mut cx = PassContext::new(&mut provider, &mut host, &mut listeners);

        assert_eq!(
            engine.navigate(PageTarget::Index(1), false, &mut cx),
            Err(NavigationError::ZeroExtent)
        );
        assert_eq!(engine.current_page(), None);
        assert_eq!(engine.scroll_pass(Rect::new(0.0, 0.0, 100.0, 0.0), &mut cx).observed, None);
        assert!(host.placed.is_empty(), "no content reached the host");
    }

    #[test]
    fn relative_targets_before_any_page() {
        let mut provider = Numbers(Some(3));
        let mut host = Host::default();
        let mut listeners = ListenerSet::new();
        let mut engine = WindowingEngine::new(&PagerConfig::default());
        {
            let mut cx = PassContext::new(&mut provider, &mut host, &mut listeners);
            // Only record the size; no pass has observed a page yet.
            engine.record_layout(Size::new(100.0, 100.0), engine.axis());
            assert_eq!(
                engine.navigate(PageTarget::Previous, false, &mut cx),
                Err(NavigationError::BeforeFirstPage)
            );
            let report = engine.navigate(PageTarget::Next, false, &mut cx).unwrap();
            assert_eq!(report.transition.map(|change| (change.from, change.to)), Some((None, 0)));
        }
        assert_eq!(host.placed, [(0, Rect::new(0.0, 0.0, 100.0, 100.0))]);
    }

    #[test]
    fn zero_page_count_disables_materialization() {
        let mut provider = Numbers(Some(0));
        let mut host = Host::default();
        let engine = engine(Size::new(100.0, 100.0), &mut provider, &mut host);

        assert!(engine.table().is_empty(), "teardown empties the table");
        assert_eq!(engine.pool().occupied_count(), 0);
        assert_eq!(engine.content_size(), Size::new(0.0, 100.0));
        assert!(host.placed.is_empty(), "no content reached the host");
    }

    #[test]
    fn zero_page_count_rejects_navigation() {
        let mut provider = Numbers(Some(0));
        let mut host = Host::default();
        let mut engine = engine(Size::new(100.0, 100.0), &mut provider, &mut host);
        let mut listeners = ListenerSet::new();
        let mut cx = PassContext::new(&mut provider, &mut host, &mut listeners);

        assert_eq!(
            engine.navigate(PageTarget::Index(0), false, &mut cx),
            Err(NavigationError::OutOfRange {
                page: 0,
                page_count: 0
            })
        );
    }

    #[test]
    fn resize_keeps_current_page_in_view() {
        let mut provider = Numbers(Some(4));
        let mut host = Host::default();
        let mut engine = engine(Size::new(100.0, 100.0), &mut provider, &mut host);
        let mut listeners = ListenerSet::new();
        {
            let mut cx = PassContext::new(&mut provider, &mut host, &mut listeners);
            engine.navigate(PageTarget::Index(2), false, &mut cx).unwrap();
            engine.set_viewport_size(Size::new(200.0, 50.0), &mut cx).unwrap();
        }

        let frame = Rect::new(400.0, 0.0, 600.0, 50.0);
        assert_eq!(engine.current_page(), Some(2));
        assert_eq!(engine.bounds(), frame);
        assert_eq!(engine.content_size(), Size::new(800.0, 50.0));
        assert_eq!(host.placed, [(2, frame)]);
    }

    #[test]
    fn disposed_token_cancels_before_any_host_call() {
        let mut provider = Numbers(Some(4));
        let mut host = Host::default();
        let mut engine = engine(Size::new(100.0, 100.0), &mut provider, &mut host);
        let placed_before = host.placed.clone();
        let sequencer = NavigationSequencer::<()>::new();
        let token = sequencer.token();
        sequencer.dispose();

        let mut listeners = ListenerSet::new();
        let mut cx =
            PassContext::new(&mut provider, &mut host, &mut listeners).with_dispose_token(&token);
        let report = engine.scroll_pass(Rect::new(50.0, 0.0, 150.0, 100.0), &mut cx);
        assert!(report.cancelled);
        assert_eq!(
            engine.navigate(PageTarget::Index(1), false, &mut cx),
            Err(NavigationError::Disposed)
        );
        assert_eq!(host.placed, placed_before);
    }

    #[test]
    fn teardown_releases_every_assignment() {
        let mut provider = Numbers(Some(4));
        let mut host = Host::default();
        let mut engine = engine(Size::new(100.0, 100.0), &mut provider, &mut host);
        {
            let mut listeners = ListenerSet::new();
            let mut cx = PassContext::new(&mut provider, &mut host, &mut listeners);
            engine.scroll_pass(Rect::new(50.0, 0.0, 150.0, 100.0), &mut cx);
        }
        assert_eq!(engine.table().len(), 2);

        engine.teardown(&mut host);
        assert!(engine.table().is_empty(), "teardown empties the table");
        assert_eq!(engine.pool().occupied_count(), 0);
        assert_eq!(host.released, [0, 1]);
        assert!(host.placed.is_empty(), "no content reached the host");
    }
}
