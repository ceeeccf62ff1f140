// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The paged content host facade.
//!
//! [`Pager`] owns a [`WindowingEngine`], its collaborators and a
//! [`NavigationSequencer`]. Scroll notifications and navigation requests are
//! queued as [`PagerCommand`]s and run strictly one after another, so at most
//! one windowing pass is ever in progress. Layout changes are applied
//! directly. The queue is held back while the viewport has no extent or no
//! host is attached.

use std::fmt;

use kurbo::{Rect, Size};
use tracing::{debug, trace, warn};

use crate::axis::Axis;
use crate::config::PagerConfig;
use crate::engine::{EngineDebugInfo, PageTarget, PassContext, PassReport, WindowingEngine};
use crate::error::NavigationError;
use crate::host::{ContentProvider, ListenerId, ListenerSet, PageHost, PageListener};
use crate::page_count::ResolvedPageCount;
use crate::sequencer::{DisposeToken, NavigationSequencer, Submitter, Ticket};

/// A unit of work run by a [`Pager`]'s sequencer.
#[derive(Clone, Debug, PartialEq)]
pub enum PagerCommand<C> {
    /// The host reported new viewport bounds.
    Scroll(Rect),
    /// Navigate using provider content.
    Navigate {
        /// Where to go.
        target: PageTarget,
        /// Whether the host should animate the scroll.
        animated: bool,
    },
    /// Navigate to `page` showing `content`.
    Present {
        /// Page index.
        page: usize,
        /// Content to show.
        content: C,
        /// Whether the host should animate the scroll.
        animated: bool,
    },
}

/// Result of running one [`PagerCommand`].
///
/// `Ok(None)` means the command did not run a pass: it is still queued, or no
/// host was attached when it ran.
pub type CommandOutcome = Result<Option<PassReport>, NavigationError>;

/// Snapshot of a [`Pager`] for debugging and inspection.
#[derive(Clone, Debug, PartialEq)]
pub struct PagerDebugInfo {
    /// Engine state.
    pub engine: EngineDebugInfo,
    /// Resolved page count.
    pub page_count: Option<ResolvedPageCount>,
    /// Queued commands.
    pub pending: usize,
    /// `true` while the queue is held back.
    pub suspended: bool,
    /// `true` once disposed.
    pub disposed: bool,
    /// Number of registered listeners.
    pub listeners: usize,
    /// `true` if a host is attached.
    pub host_attached: bool,
}

/// A paged content host.
///
/// ```
/// use kurbo::{Rect, Size};
/// use understory_pager::{ContentProvider, PageHost, Pager, PagerConfig, SlotId};
///
/// struct Numbers;
///
/// impl ContentProvider for Numbers {
///     type Content = u32;
///
///     fn content_for_page(&mut self, page: usize) -> Option<u32> {
///         u32::try_from(page).ok()
///     }
///
///     fn page_count(&self) -> Option<usize> {
///         Some(5)
///     }
/// }
///
/// #[derive(Default)]
/// struct Host {
///     placed: Vec<(u32, usize)>,
/// }
///
/// impl PageHost<u32> for Host {
///     fn place_content(&mut self, content: &u32, slot: SlotId, _frame: Rect) {
///         self.placed.push((*content, slot.index()));
///     }
///     fn remove_content(&mut self, content: &u32, _slot: SlotId) {
///         self.placed.retain(|(c, _)| c != content);
///     }
///     fn set_content_size(&mut self, _size: Size) {}
///     fn scroll_to_frame(&mut self, _frame: Rect, _animated: bool) {}
/// }
///
/// let mut pager = Pager::new(Numbers, PagerConfig::default());
/// pager.attach_host(Host::default());
/// pager.set_viewport_size(Size::new(320.0, 480.0));
///
/// pager.goto_page(3, false).unwrap();
/// assert_eq!(pager.current_page(), Some(3));
/// assert_eq!(pager.host().unwrap().placed, [(3, 0)]);
/// ```
pub struct Pager<P: ContentProvider, H: PageHost<P::Content>> {
    engine: WindowingEngine<P::Content>,
    provider: P,
    host: Option<H>,
    listeners: ListenerSet<P::Content>,
    sequencer: NavigationSequencer<PagerCommand<P::Content>>,
    token: DisposeToken,
    torn_down: bool,
}

impl<P, H> fmt::Debug for Pager<P, H>
where
    P: ContentProvider,
    H: PageHost<P::Content>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pager")
            .field("current_page", &self.engine.current_page())
            .field("previous_page", &self.engine.previous_page())
            .field("host_attached", &self.host.is_some())
            .field("listeners", &self.listeners)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

impl<P, H> Pager<P, H>
where
    P: ContentProvider,
    H: PageHost<P::Content>,
{
    /// Creates a pager with no host and an unlaid-out viewport.
    ///
    /// Commands submitted before a host is attached and the viewport is laid
    /// out are queued, and run once both are in place.
    #[must_use]
    pub fn new(provider: P, config: PagerConfig) -> Self {
        let sequencer = NavigationSequencer::new();
        sequencer.set_suspended(true);
        let token = sequencer.token();
        Self {
            engine: WindowingEngine::new(&config),
            provider,
            host: None,
            listeners: ListenerSet::new(),
            sequencer,
            token,
            torn_down: false,
        }
    }

    /// Attaches `host`, returning the previously attached one.
    ///
    /// A previous host has its content released first. If the viewport is
    /// already laid out the new host is brought up to date and queued work
    /// runs.
    pub fn attach_host(&mut self, host: H) -> Option<H> {
        let previous = self.detach_host();
        self.host = Some(host);
        if !self.is_disposed() {
            self.with_context(|engine, cx| engine.refresh(cx));
            self.update_suspension();
        }
        previous
    }

    /// Releases all content through the attached host and returns it.
    ///
    /// Commands queued while no host is attached wait for the next one.
    pub fn detach_host(&mut self) -> Option<H> {
        let mut host = self.host.take()?;
        self.engine.teardown(&mut host);
        if !self.is_disposed() {
            self.update_suspension();
        }
        Some(host)
    }

    /// Returns the attached host.
    #[must_use]
    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    /// Returns the attached host mutably.
    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    /// Returns the content provider.
    #[must_use]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Returns the content provider mutably.
    pub fn provider_mut(&mut self) -> &mut P {
        &mut self.provider
    }

    /// Returns the engine for inspection.
    #[must_use]
    pub fn engine(&self) -> &WindowingEngine<P::Content> {
        &self.engine
    }

    /// Registers a listener.
    pub fn add_listener(&mut self, listener: impl PageListener<P::Content> + 'static) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Unregisters a listener.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    /// Returns the current page.
    #[must_use]
    pub fn current_page(&self) -> Option<usize> {
        self.engine.current_page()
    }

    /// Returns the page that was current before the last transition.
    #[must_use]
    pub fn previous_page(&self) -> Option<usize> {
        self.engine.previous_page()
    }

    /// Returns the content shown for the current page.
    #[must_use]
    pub fn current_content(&self) -> Option<&P::Content> {
        self.engine.current_content()
    }

    /// Returns the resolved page count, or `None` while open-ended.
    #[must_use]
    pub fn page_count(&self) -> Option<usize> {
        self.resolved_page_count().map(|resolved| resolved.count)
    }

    /// Returns the resolved page count together with its source.
    #[must_use]
    pub fn resolved_page_count(&self) -> Option<ResolvedPageCount> {
        self.engine.page_count(self.provider.page_count())
    }

    /// Sets (or clears) the explicit page count.
    pub fn set_page_count(&mut self, page_count: Option<usize>) {
        if self.is_disposed() {
            return;
        }
        let provider_count = self.provider.page_count();
        self.engine
            .set_page_count(page_count, provider_count, self.host.as_mut());
    }

    /// Returns the paging direction.
    #[must_use]
    pub fn axis(&self) -> Axis {
        self.engine.axis()
    }

    /// Changes the paging direction.
    pub fn set_axis(&mut self, axis: Axis) {
        if self.is_disposed() {
            return;
        }
        if self.host.is_some() {
            self.with_context(|engine, cx| engine.set_axis(axis, cx));
        } else {
            self.engine.record_layout(self.engine.viewport_size(), axis);
        }
        self.update_suspension();
    }

    /// Applies a new viewport size.
    ///
    /// A size with no extent along the paging axis holds back queued work;
    /// the first usable size releases it.
    pub fn set_viewport_size(&mut self, viewport: Size) {
        if self.is_disposed() {
            return;
        }
        if self.host.is_some() {
            self.with_context(|engine, cx| engine.set_viewport_size(viewport, cx));
        } else {
            self.engine.record_layout(viewport, self.engine.axis());
        }
        self.update_suspension();
    }

    /// Reports new viewport bounds from the host and runs the resulting pass.
    ///
    /// Returns `None` if nothing ran. While the pager is suspended the latest
    /// bounds are kept, and the pass that runs on resuming starts from them.
    pub fn scrolled(&mut self, bounds: Rect) -> Option<PassReport> {
        if self.is_disposed() {
            return None;
        }
        if self.sequencer.is_suspended() {
            trace!(?bounds, "viewport bounds recorded while suspended");
            self.engine.record_bounds(bounds);
            return None;
        }
        self.submit_and_run(PagerCommand::Scroll(bounds))
            .ok()
            .flatten()
    }

    /// Navigates to `page`.
    pub fn goto_page(&mut self, page: usize, animated: bool) -> CommandOutcome {
        self.goto(PageTarget::Index(page), animated)
    }

    /// Navigates to the next page.
    pub fn goto_next(&mut self, animated: bool) -> CommandOutcome {
        self.goto(PageTarget::Next, animated)
    }

    /// Navigates to the previous page.
    pub fn goto_previous(&mut self, animated: bool) -> CommandOutcome {
        self.goto(PageTarget::Previous, animated)
    }

    /// Navigates to `target`.
    ///
    /// The request is queued behind any pending work and run before this
    /// returns, unless the viewport is not laid out yet, in which case it
    /// returns `Ok(None)` and runs after layout.
    ///
    /// # Panics
    ///
    /// Panics if no host is attached.
    pub fn goto(&mut self, target: PageTarget, animated: bool) -> CommandOutcome {
        self.submit_navigation(PagerCommand::Navigate { target, animated })
    }

    /// Navigates to `page` showing caller-supplied `content`.
    ///
    /// # Panics
    ///
    /// Panics if no host is attached.
    pub fn present(&mut self, page: usize, content: P::Content, animated: bool) -> CommandOutcome {
        self.submit_navigation(PagerCommand::Present {
            page,
            content,
            animated,
        })
    }

    /// Returns a handle for queueing commands from other threads.
    ///
    /// Submitted commands run at the next call that drains the queue, such as
    /// [`Pager::run_pending`].
    #[must_use]
    pub fn submitter(&self) -> Submitter<PagerCommand<P::Content>> {
        self.sequencer.submitter()
    }

    /// Runs queued commands; returns how many ran.
    pub fn run_pending(&mut self) -> usize {
        self.run_queue(|_, _| {})
    }

    /// Tears the pager down: queued work is dropped, any running pass stops at
    /// its next checkpoint, and all content is released through the host.
    pub fn dispose(&mut self) {
        if self.sequencer.dispose() {
            debug!("pager disposed");
        }
        self.finish_dispose();
    }

    /// Returns `true` once disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.sequencer.is_disposed()
    }

    /// Snapshot of the pager state.
    #[must_use]
    pub fn debug_info(&self) -> PagerDebugInfo {
        PagerDebugInfo {
            engine: self.engine.debug_info(),
            page_count: self.resolved_page_count(),
            pending: self.sequencer.pending(),
            suspended: self.sequencer.is_suspended(),
            disposed: self.is_disposed(),
            listeners: self.listeners.len(),
            host_attached: self.host.is_some(),
        }
    }

    fn update_suspension(&mut self) {
        let suspended = !self.engine.is_laid_out() || self.host.is_none();
        if suspended != self.sequencer.is_suspended() {
            debug!(suspended, "navigation queue suspension changed");
            self.sequencer.set_suspended(suspended);
        }
        if !suspended {
            self.run_pending();
        }
    }

    fn submit_navigation(&mut self, command: PagerCommand<P::Content>) -> CommandOutcome {
        if self.is_disposed() {
            return Err(NavigationError::Disposed);
        }
        assert!(self.host.is_some(), "navigation requires an attached host");
        self.submit_and_run(command)
    }

    fn submit_and_run(&mut self, command: PagerCommand<P::Content>) -> CommandOutcome {
        let ticket = self
            .sequencer
            .submit(command)
            .ok_or(NavigationError::Disposed)?;
        let mut outcome = Ok(None);
        self.run_queue(|ran, result| {
            if ran == ticket {
                outcome = result;
            }
        });
        outcome
    }

    fn run_queue(&mut self, mut on_outcome: impl FnMut(Ticket, CommandOutcome)) -> usize {
        let Self {
            engine,
            provider,
            host,
            listeners,
            sequencer,
            token,
            ..
        } = self;
        let ran = sequencer.drain(|ticket, command| {
            let outcome = Self::execute(engine, provider, host.as_mut(), listeners, token, command);
            if let Err(err) = &outcome {
                debug!(%err, "navigation rejected");
            }
            on_outcome(ticket, outcome);
        });
        if self.is_disposed() {
            self.finish_dispose();
        }
        ran
    }

    fn execute(
        engine: &mut WindowingEngine<P::Content>,
        provider: &mut P,
        host: Option<&mut H>,
        listeners: &mut ListenerSet<P::Content>,
        token: &DisposeToken,
        command: PagerCommand<P::Content>,
    ) -> CommandOutcome {
        let Some(host) = host else {
            warn!("no host attached; queued command dropped");
            return Ok(None);
        };
        let mut cx = PassContext::new(provider, host, listeners).with_dispose_token(token);
        match command {
            PagerCommand::Scroll(bounds) => Ok(Some(engine.scroll_pass(bounds, &mut cx))),
            PagerCommand::Navigate { target, animated } => {
                debug!(?target, animated, "navigate");
                engine.navigate(target, animated, &mut cx).map(Some)
            }
            PagerCommand::Present {
                page,
                content,
                animated,
            } => {
                debug!(page, animated, "present");
                engine.present(page, content, animated, &mut cx).map(Some)
            }
        }
    }

    fn with_context<R>(
        &mut self,
        f: impl FnOnce(
            &mut WindowingEngine<P::Content>,
            &mut PassContext<'_, P, H>,
        ) -> R,
    ) -> Option<R> {
        let host = self.host.as_mut()?;
        let mut cx = PassContext::new(&mut self.provider, host, &mut self.listeners)
            .with_dispose_token(&self.token);
        Some(f(&mut self.engine, &mut cx))
    }

    fn finish_dispose(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(host) = self.host.as_mut() {
            self.engine.teardown(host);
        }
    }
}

impl<P, H> Drop for Pager<P, H>
where
    P: ContentProvider,
    H: PageHost<P::Content>,
{
    fn drop(&mut self) {
        self.dispose();
    }
}
