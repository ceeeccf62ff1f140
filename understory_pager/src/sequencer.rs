// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serialized execution of navigation work.
//!
//! A [`NavigationSequencer`] is a FIFO of pending work items with three
//! guarantees:
//!
//! - Items run one at a time, in submission order, on the thread that calls
//!   [`NavigationSequencer::drain`].
//! - Draining is never re-entrant: a `drain` issued while one is already
//!   running returns immediately and the running drain picks up the new items.
//! - Once disposed, nothing further runs and submissions are rejected.
//!
//! Work can be submitted from any thread through a [`Submitter`]; it runs at
//! the owner's next drain. A [`DisposeToken`] lets long-running work check for
//! disposal between phases.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::trace;

/// Position of a submitted item in the sequencer's total order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(u64);

#[derive(Debug)]
struct QueueState<T> {
    queue: VecDeque<(Ticket, T)>,
    next_ticket: u64,
    suspended: bool,
    draining: bool,
}

#[derive(Debug)]
struct Shared<T> {
    state: Mutex<QueueState<T>>,
    disposed: Arc<AtomicBool>,
}

impl<T> Shared<T> {
    fn submit(&self, item: T) -> Option<Ticket> {
        if self.disposed.load(Ordering::Acquire) {
            return None;
        }
        let mut state = self.state.lock();
        let ticket = Ticket(state.next_ticket);
        state.next_ticket += 1;
        state.queue.push_back((ticket, item));
        Some(ticket)
    }

    fn dispose(&self) -> bool {
        let first = !self.disposed.swap(true, Ordering::AcqRel);
        self.state.lock().queue.clear();
        first
    }
}

/// Observes whether a sequencer has been disposed.
#[derive(Clone, Default)]
pub struct DisposeToken(Arc<AtomicBool>);

impl fmt::Debug for DisposeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DisposeToken")
            .field(&self.is_disposed())
            .finish()
    }
}

impl DisposeToken {
    /// Returns `true` once the owning sequencer has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Thread-safe handle for submitting work to a [`NavigationSequencer`].
pub struct Submitter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Submitter<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Submitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Submitter")
            .field("disposed", &self.is_disposed())
            .finish_non_exhaustive()
    }
}

impl<T> Submitter<T> {
    /// Queues `item`; returns `None` if the sequencer is disposed.
    pub fn submit(&self, item: T) -> Option<Ticket> {
        self.shared.submit(item)
    }

    /// Disposes the sequencer.
    pub fn dispose(&self) {
        self.shared.dispose();
    }

    /// Returns `true` once the sequencer has been disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::Acquire)
    }
}

/// Single-consumer FIFO of navigation work.
pub struct NavigationSequencer<T> {
    shared: Arc<Shared<T>>,
}

impl<T> fmt::Debug for NavigationSequencer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("NavigationSequencer")
            .field("pending", &state.queue.len())
            .field("suspended", &state.suspended)
            .field("draining", &state.draining)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

impl<T> Default for NavigationSequencer<T> {
    fn default() -> Self {
        Self::new()
    }
}

struct DrainGuard<'a, T>(&'a Shared<T>);

impl<T> Drop for DrainGuard<'_, T> {
    fn drop(&mut self) {
        self.0.state.lock().draining = false;
    }
}

impl<T> NavigationSequencer<T> {
    /// Creates an empty, running sequencer.
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(QueueState {
                    queue: VecDeque::new(),
                    next_ticket: 0,
                    suspended: false,
                    draining: false,
                }),
                disposed: Arc::new(AtomicBool::new(false)),
            }),
        }
    }

    /// Queues `item`; returns `None` if the sequencer is disposed.
    pub fn submit(&self, item: T) -> Option<Ticket> {
        self.shared.submit(item)
    }

    /// Returns the number of queued items.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Returns `true` while draining is held back.
    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.shared.state.lock().suspended
    }

    /// Holds back (or resumes) draining. Queued items are kept.
    pub fn set_suspended(&self, suspended: bool) {
        self.shared.state.lock().suspended = suspended;
    }

    /// Returns `true` while a drain is running.
    #[must_use]
    pub fn is_draining(&self) -> bool {
        self.shared.state.lock().draining
    }

    /// Runs queued items in order until the queue is empty, the sequencer is
    /// suspended, or it is disposed. Returns the number of items run.
    ///
    /// The queue lock is not held while `run` executes, so `run` may submit
    /// more work; it runs in the same drain.
    pub fn drain(&self, mut run: impl FnMut(Ticket, T)) -> usize {
        {
            let mut state = self.shared.state.lock();
            if state.draining || self.is_disposed() {
                return 0;
            }
            state.draining = true;
        }
        let _guard = DrainGuard(&self.shared);

        let mut ran = 0;
        loop {
            let item = {
                let mut state = self.shared.state.lock();
                if state.suspended || self.is_disposed() {
                    break;
                }
                state.queue.pop_front()
            };
            let Some((ticket, item)) = item else {
                break;
            };
            run(ticket, item);
            ran += 1;
        }
        if ran > 0 {
            trace!(ran, "drained navigation work");
        }
        ran
    }

    /// Clears the queue and rejects further work. Returns `true` the first time.
    pub fn dispose(&self) -> bool {
        self.shared.dispose()
    }

    /// Returns `true` once disposed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.shared.disposed.load(Ordering::Acquire)
    }

    /// Returns a token that observes disposal.
    #[must_use]
    pub fn token(&self) -> DisposeToken {
        DisposeToken(Arc::clone(&self.shared.disposed))
    }

    /// Returns a handle that can submit work from other threads.
    #[must_use]
    pub fn submitter(&self) -> Submitter<T> {
        Submitter {
            shared: Arc::clone(&self.shared),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::thread;

    use super::NavigationSequencer;

    #[test]
    fn items_run_in_submission_order() {
        let sequencer = NavigationSequencer::new();
        let tickets: Vec<_> = [3, 1, 2]
            .into_iter()
            .map(|item| sequencer.submit(item).unwrap())
            .collect();
        assert!(
            tickets.windows(2).all(|pair| pair[0] < pair[1]),
            "tickets increase in submission order"
        );

        let mut seen = Vec::new();
        assert_eq!(sequencer.drain(|ticket, item| seen.push((ticket, item))), 3);
        assert_eq!(
            seen,
            [(tickets[0], 3), (tickets[1], 1), (tickets[2], 2)]
        );
        assert_eq!(sequencer.pending(), 0);
    }

    #[test]
    fn nested_drain_returns_immediately_and_outer_picks_up_new_work() {
        let sequencer = NavigationSequencer::new();
        sequencer.submit(0);
        let seen = RefCell::new(Vec::new());
        let ran = sequencer.drain(|_, item| {
            seen.borrow_mut().push(item);
            if item < 2 {
                sequencer.submit(item + 1);
                assert_eq!(sequencer.drain(|_, _| {}), 0);
                assert!(sequencer.is_draining(), "drain is running");
            }
        });
        assert_eq!(ran, 3);
        assert_eq!(*seen.borrow(), [0, 1, 2]);
        assert!(!sequencer.is_draining(), "drain finished");
    }

    #[test]
    fn suspension_holds_work_until_resumed() {
        let sequencer = NavigationSequencer::new();
        sequencer.set_suspended(true);
        sequencer.submit("goto");
        assert_eq!(sequencer.drain(|_, _| {}), 0);
        assert_eq!(sequencer.pending(), 1);

        sequencer.set_suspended(false);
        assert_eq!(sequencer.drain(|_, _| {}), 1);
    }

    #[test]
    fn dispose_discards_queue_and_rejects_work() {
        let sequencer = NavigationSequencer::new();
        let token = sequencer.token();
        sequencer.submit(1);
        sequencer.submit(2);

        let mut seen = Vec::new();
        sequencer.drain(|_, item| {
            seen.push(item);
            sequencer.dispose();
        });
        assert_eq!(seen, [1]);
        assert!(token.is_disposed(), "token sees disposal");
        assert_eq!(sequencer.submit(3), None);
        assert_eq!(sequencer.pending(), 0);
        assert!(!sequencer.dispose(), "second dispose is a no-op");
    }

    #[test]
    fn submitter_works_across_threads() {
        let sequencer = NavigationSequencer::new();
        let submitter = sequencer.submitter();
        let handle = thread::spawn(move || {
            for item in 0..4 {
                assert!(submitter.submit(item).is_some(), "live sequencer accepts work");
            }
        });
        handle.join().unwrap();

        let mut seen = Vec::new();
        sequencer.drain(|_, item| seen.push(item));
        assert_eq!(seen, [0, 1, 2, 3]);

        sequencer.submitter().dispose();
        assert!(sequencer.is_disposed(), "submitter disposed the sequencer");
    }
}
